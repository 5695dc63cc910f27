//! Bit timers paced by embassy-time
//!
//! A [`TimerControl`] lives in a `static` and is shared by two sides:
//!
//! - [`TickTimer`], the `BitTimer` handed to the transceiver core, which
//!   flips the active flag and posts the first deadline
//! - [`TimerControl::run`], the driver loop, which sleeps until each
//!   deadline and calls the tick handler
//!
//! Deadlines are absolute (`first + n * period`) so handler latency does
//! not accumulate into drift across a frame.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Instant, Timer};
use portable_atomic::{AtomicBool, Ordering};
use softuart_hal::{BitTimer, FirstTick, LinkConfig, TickHandler};

/// Schedule posted by `arm`
#[derive(Debug, Clone, Copy)]
struct Arming {
    first: Instant,
    period: Duration,
}

/// Shared state between a [`TickTimer`] and its driver loop
pub struct TimerControl {
    active: AtomicBool,
    armed: Signal<CriticalSectionRawMutex, Arming>,
}

impl Default for TimerControl {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerControl {
    /// Create a disarmed timer
    pub const fn new() -> Self {
        Self {
            active: AtomicBool::new(false),
            armed: Signal::new(),
        }
    }

    /// Create the `BitTimer` handle for a link
    pub fn timer(&'static self, link: LinkConfig) -> TickTimer {
        TickTimer {
            control: self,
            bit_period_ns: link.bit_period_ns(),
        }
    }

    /// Check if the timer is firing
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Driver loop: deliver ticks to `handler` while armed
    pub async fn run<H: TickHandler>(&self, handler: &H) -> ! {
        loop {
            let arming = self.armed.wait().await;
            let mut deadline = arming.first;

            loop {
                Timer::at(deadline).await;

                // Disarmed, or re-armed with a fresh schedule
                if !self.is_active() || self.armed.signaled() {
                    break;
                }

                handler.on_tick();
                deadline += arming.period;
            }
        }
    }
}

/// `BitTimer` handle backed by a [`TimerControl`]
pub struct TickTimer {
    control: &'static TimerControl,
    bit_period_ns: u32,
}

impl BitTimer for TickTimer {
    fn arm(&mut self, first: FirstTick) {
        let offset = Duration::from_nanos(first.delay_ns(self.bit_period_ns) as u64);
        self.control.active.store(true, Ordering::Release);
        self.control.armed.signal(Arming {
            first: Instant::now() + offset,
            period: Duration::from_nanos(self.bit_period_ns as u64),
        });
    }

    fn disarm(&mut self) {
        self.control.active.store(false, Ordering::Release);
    }

    fn is_active(&self) -> bool {
        self.control.is_active()
    }
}
