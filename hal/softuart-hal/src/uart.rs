//! Serial link configuration
//!
//! The frame shape is fixed: one start bit, eight data bits sent
//! least-significant bit first, one stop bit, no parity. Only the baud
//! rate is configurable, and only at build time.

/// Data bits per frame
pub const DATA_BITS: u8 = 8;

/// Total bits on the wire per frame (start + data + stop)
pub const FRAME_BITS: u8 = 1 + DATA_BITS + 1;

/// Nanoseconds per second
const NANOS_PER_SEC: u32 = 1_000_000_000;

/// Errors from building a [`LinkConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkConfigError {
    /// Baud rate below [`LinkConfig::MIN_BAUDRATE`]
    BaudTooLow,
    /// Baud rate above [`LinkConfig::MAX_BAUDRATE`]
    BaudTooHigh,
}

/// Serial link configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkConfig {
    baudrate: u32,
}

impl Default for LinkConfig {
    fn default() -> Self {
        // EM-406A style GPS receivers talk 4800 8N1
        Self { baudrate: 4800 }
    }
}

impl LinkConfig {
    /// Slowest supported baud rate
    pub const MIN_BAUDRATE: u32 = 300;

    /// Fastest supported baud rate
    ///
    /// Every bit costs two interrupts (one per direction) plus the
    /// handler latency, so software links top out well below hardware UARTs.
    pub const MAX_BAUDRATE: u32 = 57_600;

    /// Create a configuration for the given baud rate
    pub const fn new(baudrate: u32) -> Result<Self, LinkConfigError> {
        if baudrate < Self::MIN_BAUDRATE {
            return Err(LinkConfigError::BaudTooLow);
        }
        if baudrate > Self::MAX_BAUDRATE {
            return Err(LinkConfigError::BaudTooHigh);
        }
        Ok(Self { baudrate })
    }

    /// Baud rate in bits per second
    pub const fn baudrate(&self) -> u32 {
        self.baudrate
    }

    /// Duration of one bit in nanoseconds
    pub const fn bit_period_ns(&self) -> u32 {
        NANOS_PER_SEC / self.baudrate
    }

    /// Duration of one bit in microseconds
    pub const fn bit_period_us(&self) -> u32 {
        1_000_000 / self.baudrate
    }

    /// Duration of a whole frame in nanoseconds
    pub const fn frame_time_ns(&self) -> u32 {
        self.bit_period_ns() * FRAME_BITS as u32
    }

    /// Payload throughput in bytes per second
    pub const fn bytes_per_second(&self) -> u32 {
        self.baudrate / FRAME_BITS as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_4800() {
        let config = LinkConfig::default();
        assert_eq!(config.baudrate(), 4800);
        assert_eq!(config.bit_period_us(), 208);
        assert_eq!(config.bit_period_ns(), 208_333);
    }

    #[test]
    fn test_frame_time() {
        let config = LinkConfig::new(9600).unwrap();
        assert_eq!(config.bit_period_ns(), 104_166);
        assert_eq!(config.frame_time_ns(), 1_041_660);
        assert_eq!(config.bytes_per_second(), 960);
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert_eq!(LinkConfig::new(110), Err(LinkConfigError::BaudTooLow));
        assert_eq!(LinkConfig::new(115_200), Err(LinkConfigError::BaudTooHigh));
        assert!(LinkConfig::new(LinkConfig::MIN_BAUDRATE).is_ok());
        assert!(LinkConfig::new(LinkConfig::MAX_BAUDRATE).is_ok());
    }
}
