//! GPIO pin abstractions
//!
//! The transceiver drives its TX line through [`OutputPin`] and samples its
//! RX line through [`InputPin`]. Pin direction and pull configuration are
//! the binding's job; by the time a pin reaches the core it is ready to use.

/// Digital output pin
///
/// The TX line. High is the idle/stop level, low is the start level.
pub trait OutputPin {
    /// Drive the line high (logic 1)
    fn set_high(&mut self);

    /// Drive the line low (logic 0)
    fn set_low(&mut self);

    /// Drive the line to a specific level
    fn set_level(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the line is currently driven high
    fn is_set_high(&self) -> bool;

    /// Check if the line is currently driven low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Digital input pin
///
/// The RX line. Expected to have a pull-up so a disconnected line reads
/// idle (high).
pub trait InputPin {
    /// Check if the line reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the line reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}
