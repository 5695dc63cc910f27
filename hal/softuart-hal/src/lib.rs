//! softuart Hardware Abstraction Layer
//!
//! This crate defines the hardware seams of the software serial
//! transceiver. The transceiver core only ever talks to these traits, so
//! the same state machines run on a chip binding (RP2040, ...) or on a
//! simulated wire in host tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (softuart-firmware, etc.)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  softuart-core (state machines, rings)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  softuart-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ softuart-hal- │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`timer::BitTimer`] - Periodic per-bit timing source
//! - [`edge::EdgeMonitor`] - Start-bit falling edge detection
//! - [`timer::TickHandler`], [`edge::EdgeHandler`] - Interrupt-context callbacks

#![no_std]
#![deny(unsafe_code)]

pub mod edge;
pub mod gpio;
pub mod timer;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use edge::{EdgeHandler, EdgeMonitor};
pub use gpio::{InputPin, OutputPin};
pub use timer::{BitTimer, FirstTick, TickHandler};
pub use uart::{LinkConfig, LinkConfigError};
