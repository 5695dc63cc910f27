//! Build-time link defaults
//!
//! Both ends of the link must agree out-of-band on these; nothing is
//! negotiated on the wire.

use softuart_hal::LinkConfig;

/// Default baud rate
pub const DEFAULT_BAUDRATE: u32 = 4800;

/// Default RX ring capacity in bytes
///
/// Sized to hold a full NMEA sentence (82 bytes) with room to spare while
/// the main loop is busy.
pub const DEFAULT_RX_CAPACITY: usize = 128;

/// Default TX ring capacity in bytes
pub const DEFAULT_TX_CAPACITY: usize = 32;

/// Link configuration at the default baud rate
pub const DEFAULT_LINK: LinkConfig = match LinkConfig::new(DEFAULT_BAUDRATE) {
    Ok(config) => config,
    Err(_) => panic!("default baud rate out of range"),
};
