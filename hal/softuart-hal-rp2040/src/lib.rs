//! RP2040-specific bindings for the software serial transceiver
//!
//! Implements the `softuart-hal` traits on top of embassy-rp:
//!
//! - [`gpio::SioLine`] - RX sampling straight from the SIO input register
//! - [`gpio::LineOutput`] - TX push-pull output
//! - [`timer::TimerControl`] - Bit timers paced by embassy-time deadlines
//! - [`edge::EdgeControl`] - Start-edge detection on a GPIO input
//!
//! Timer and edge drivers are `async fn run(..) -> !` loops. Spawn them on
//! an `InterruptExecutor` so their handlers preempt the main loop.

#![no_std]

pub mod edge;
pub mod gpio;
pub mod timer;

// Re-export shared traits from softuart-hal for convenience
pub use softuart_hal::{BitTimer, EdgeMonitor, InputPin, OutputPin};
