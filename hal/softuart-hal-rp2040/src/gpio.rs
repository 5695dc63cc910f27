//! GPIO line adapters
//!
//! The RX line has two users: the edge driver, which owns the embassy
//! `Input` to await falling edges, and the receiver, which samples it on
//! every tick. [`SioLine`] reads the level straight from the SIO input
//! register so the receiver does not need the `Input` itself.

use embassy_rp::gpio::{Level, Output, Pin};
use embassy_rp::pac;
use embassy_rp::Peri;
use softuart_hal::{InputPin, OutputPin};

/// Number of user GPIOs in bank 0
pub const GPIO_COUNT: u8 = 30;

/// Error when building a line adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range (0-29 valid)
    InvalidPin,
}

/// Bit mask of a bank 0 GPIO in the SIO registers
pub fn pin_mask(pin: u8) -> Result<u32, PinError> {
    if pin >= GPIO_COUNT {
        return Err(PinError::InvalidPin);
    }
    Ok(1 << pin)
}

/// Read-only view of a bank 0 GPIO input level
///
/// Pull and function selection are configured by whoever owns the pin
/// (normally the edge driver's `Input`).
pub struct SioLine {
    mask: u32,
}

impl SioLine {
    /// Create a reader for GPIO `pin`
    pub fn new(pin: u8) -> Result<Self, PinError> {
        Ok(Self {
            mask: pin_mask(pin)?,
        })
    }

    /// GPIO number this line reads
    pub fn pin(&self) -> u8 {
        self.mask.trailing_zeros() as u8
    }
}

impl InputPin for SioLine {
    fn is_high(&self) -> bool {
        pac::SIO.gpio_in(0).read() & self.mask != 0
    }
}

/// TX line driven as a push-pull output
pub struct LineOutput<'d> {
    pin: Output<'d>,
}

impl<'d> LineOutput<'d> {
    /// Configure `pin` as an output at the idle (high) level
    pub fn new(pin: Peri<'d, impl Pin>) -> Self {
        Self {
            pin: Output::new(pin, Level::High),
        }
    }
}

impl OutputPin for LineOutput<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}
