//! Link configuration generated from link.toml
//!
//! build.rs validates link.toml and writes the constants and the
//! `take_link_pins!` macro included below. Edit link.toml and rebuild to
//! change pins, baud rate or buffer sizes.

use softuart_hal::LinkConfig;

include!(concat!(env!("OUT_DIR"), "/link_config.rs"));

/// Soft UART link timing
pub const LINK: LinkConfig = match LinkConfig::new(SOFT_BAUDRATE) {
    Ok(link) => link,
    Err(_) => panic!("link.toml baud rate out of range"),
};
