//! Receive state machine
//!
//! A falling edge on an idle line starts a frame. The RX timer is armed
//! with a half-bit offset so each following tick lands mid-bit:
//!
//! ```text
//!  line  ‾‾‾‾\____/‾‾‾‾\____ ... ____/‾‾‾‾‾‾‾‾
//!             start  b0   b1       b7  stop
//!  ticks        ^     ^    ^        ^    ^
//!             Start  Bit  Bit      Bit  Stop
//! ```
//!
//! The stop bit level is not checked; whatever the line reads, the byte is
//! accepted as sampled.

use softuart_hal::uart::DATA_BITS;
use softuart_hal::{BitTimer, EdgeMonitor, FirstTick, InputPin};

/// Receiver states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RxState {
    /// Waiting for a start edge
    Idle,
    /// Start edge seen, next tick settles the start bit
    Start,
    /// Sampling data bits
    Bit,
    /// All data bits sampled, next tick consumes the stop bit
    Stop,
}

/// Receive half of the transceiver
///
/// Owns the RX line, the RX bit timer and the edge monitor.
pub struct Receiver<P, T, E> {
    line: P,
    timer: T,
    edge: E,
    state: RxState,
    bit_index: u8,
    shift: u8,
}

impl<P, T, E> Receiver<P, T, E>
where
    P: InputPin,
    T: BitTimer,
    E: EdgeMonitor,
{
    /// Create a receiver
    ///
    /// Does not touch the hardware; call [`reset`](Self::reset) before use.
    pub fn new(line: P, timer: T, edge: E) -> Self {
        Self {
            line,
            timer,
            edge,
            state: RxState::Idle,
            bit_index: 0,
            shift: 0,
        }
    }

    /// Return to `Idle` with the timer stopped and the edge monitor armed
    pub fn reset(&mut self) {
        self.timer.disarm();
        self.state = RxState::Idle;
        self.bit_index = 0;
        self.shift = 0;
        self.edge.enable();
    }

    /// Current state
    pub fn state(&self) -> RxState {
        self.state
    }

    /// Check if a frame is in progress
    pub fn is_busy(&self) -> bool {
        self.state != RxState::Idle
    }

    /// Handle a falling edge on the RX line
    ///
    /// Starts a frame only if the receiver is idle and the monitor is
    /// enabled. Returns `true` if a frame was started.
    pub fn on_edge(&mut self) -> bool {
        if self.state != RxState::Idle || !self.edge.is_enabled() {
            return false;
        }

        self.state = RxState::Start;
        self.edge.disable();
        self.timer.arm(FirstTick::HalfBit);
        true
    }

    /// Handle one RX timer tick
    ///
    /// Returns the received byte on the tick that samples the last data
    /// bit.
    pub fn on_tick(&mut self) -> Option<u8> {
        match self.state {
            RxState::Idle => None,
            RxState::Start => {
                self.bit_index = 0;
                self.shift = 0;
                self.state = RxState::Bit;
                None
            }
            RxState::Bit => {
                if self.line.is_high() {
                    self.shift |= 1 << self.bit_index;
                }
                self.bit_index += 1;

                if self.bit_index == DATA_BITS {
                    self.state = RxState::Stop;
                    Some(self.shift)
                } else {
                    None
                }
            }
            RxState::Stop => {
                self.timer.disarm();
                self.state = RxState::Idle;
                self.edge.enable();
                None
            }
        }
    }
}
