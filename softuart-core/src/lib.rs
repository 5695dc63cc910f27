//! Board-agnostic core of the software serial transceiver
//!
//! Reconstructs full-duplex 8N1 serial communication over two plain GPIO
//! lines, paced by two periodic bit timers and a start-edge detector. All
//! hardware access goes through the `softuart-hal` traits:
//!
//! - Ring buffers, plain and critical-section guarded
//! - Receive state machine (edge-armed, mid-bit sampling)
//! - Transmit state machine (queue-armed, back-to-back frames)
//! - [`SoftUart`] facade with the byte-level API
//! - `embedded-io` adapters for byte-stream consumers

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod io;
pub mod ring_buffer;
pub mod rx;
pub mod shared;
pub mod transceiver;
pub mod tx;

#[cfg(test)]
mod sim;

pub use config::{DEFAULT_BAUDRATE, DEFAULT_LINK, DEFAULT_RX_CAPACITY, DEFAULT_TX_CAPACITY};
pub use ring_buffer::RingBuffer;
pub use rx::{Receiver, RxState};
pub use shared::SharedRingBuffer;
pub use transceiver::{LinkStats, SoftUart};
pub use tx::{Transmitter, TxState};
