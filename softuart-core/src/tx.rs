//! Transmit state machine
//!
//! The TX timer is armed when a byte is queued while the timer is idle.
//! The first tick after arming only leaves `Idle`; every following tick
//! drives one bit:
//!
//! ```text
//!  ticks   Idle  Start  Bit0 .. Bit7  Stop  (Start ...)
//!  line    ‾‾‾‾  ____   b0   .. b7    ‾‾‾‾
//! ```
//!
//! Back-to-back bytes keep the timer running: `Stop` loops straight to
//! `Start` while the queue is non-empty.

use softuart_hal::uart::DATA_BITS;
use softuart_hal::{BitTimer, FirstTick, OutputPin};

use crate::shared::SharedRingBuffer;

/// Transmitter states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TxState {
    /// Line idle high, nothing in flight
    Idle,
    /// Next tick drives the start bit
    Start,
    /// Driving data bits
    Bit,
    /// Next tick drives the stop bit
    Stop,
}

/// Transmit half of the transceiver
///
/// Owns the TX line and the TX bit timer.
pub struct Transmitter<P, T> {
    line: P,
    timer: T,
    state: TxState,
    bit_index: u8,
    shift: u8,
}

impl<P, T> Transmitter<P, T>
where
    P: OutputPin,
    T: BitTimer,
{
    /// Create a transmitter
    ///
    /// Does not touch the hardware; call [`reset`](Self::reset) before use.
    pub fn new(line: P, timer: T) -> Self {
        Self {
            line,
            timer,
            state: TxState::Idle,
            bit_index: 0,
            shift: 0,
        }
    }

    /// Return to `Idle` with the line high and the timer stopped
    pub fn reset(&mut self) {
        self.timer.disarm();
        self.line.set_high();
        self.state = TxState::Idle;
        self.bit_index = 0;
        self.shift = 0;
    }

    /// Current state
    pub fn state(&self) -> TxState {
        self.state
    }

    /// Check if nothing is on the wire and the timer is stopped
    pub fn is_idle(&self) -> bool {
        self.state == TxState::Idle && !self.timer.is_active()
    }

    /// Start the timer if it is not already running
    ///
    /// Returns `true` if the timer was armed by this call.
    pub fn kick(&mut self) -> bool {
        if self.timer.is_active() {
            return false;
        }
        self.timer.arm(FirstTick::FullBit);
        true
    }

    /// Handle one TX timer tick, pulling bytes from `queue`
    pub fn on_tick<const N: usize>(&mut self, queue: &SharedRingBuffer<u8, N>) {
        match self.state {
            TxState::Idle => {
                self.state = TxState::Start;
            }
            TxState::Start => match queue.pop() {
                Some(byte) => {
                    self.line.set_low();
                    self.shift = byte;
                    self.bit_index = 0;
                    self.state = TxState::Bit;
                }
                None => {
                    // Queue cleared under us; nothing to frame
                    self.timer.disarm();
                    self.state = TxState::Idle;
                }
            },
            TxState::Bit => {
                self.line.set_level(self.shift & (1 << self.bit_index) != 0);
                self.bit_index += 1;

                if self.bit_index == DATA_BITS {
                    self.state = TxState::Stop;
                }
            }
            TxState::Stop => {
                self.line.set_high();

                if queue.is_empty() {
                    self.timer.disarm();
                    self.state = TxState::Idle;
                } else {
                    self.state = TxState::Start;
                }
            }
        }
    }
}
