//! Start-edge detection on a GPIO input
//!
//! The driver loop only listens for a falling edge while the gate is
//! enabled. Edges that happen while the receiver has the gate closed
//! (data bits mid-frame) are never seen: the hardware edge latch is
//! cleared each time the loop starts listening again.

use embassy_rp::gpio::Input;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use portable_atomic::{AtomicBool, Ordering};
use softuart_hal::{EdgeHandler, EdgeMonitor};

/// Shared state between an [`EdgeGate`] and its driver loop
pub struct EdgeControl {
    enabled: AtomicBool,
    opened: Signal<CriticalSectionRawMutex, ()>,
}

impl Default for EdgeControl {
    fn default() -> Self {
        Self::new()
    }
}

impl EdgeControl {
    /// Create a closed gate
    pub const fn new() -> Self {
        Self {
            enabled: AtomicBool::new(false),
            opened: Signal::new(),
        }
    }

    /// Create the `EdgeMonitor` handle
    pub fn gate(&'static self) -> EdgeGate {
        EdgeGate { control: self }
    }

    /// Check if edges are being delivered
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Driver loop: deliver falling edges on `input` to `handler`
    ///
    /// `input` should be configured with a pull-up so an open line idles
    /// high.
    pub async fn run<H: EdgeHandler>(&self, mut input: Input<'_>, handler: &H) -> ! {
        loop {
            while !self.is_enabled() {
                self.opened.wait().await;
            }

            input.wait_for_falling_edge().await;

            if self.is_enabled() {
                handler.on_edge();
            }
        }
    }
}

/// `EdgeMonitor` handle backed by an [`EdgeControl`]
pub struct EdgeGate {
    control: &'static EdgeControl,
}

impl EdgeMonitor for EdgeGate {
    fn enable(&mut self) {
        self.control.enabled.store(true, Ordering::Release);
        self.control.opened.signal(());
    }

    fn disable(&mut self) {
        self.control.enabled.store(false, Ordering::Release);
    }

    fn is_enabled(&self) -> bool {
        self.control.is_enabled()
    }
}
