//! Board wiring of the soft UART
//!
//! The timer and edge drivers are shared between the transceiver (through
//! its `BitTimer`/`EdgeMonitor` handles) and the tasks running their
//! driver loops, so they live in statics.

use softuart_core::SoftUart;
use softuart_hal_rp2040::edge::{EdgeControl, EdgeGate};
use softuart_hal_rp2040::gpio::{LineOutput, SioLine};
use softuart_hal_rp2040::timer::{TickTimer, TimerControl};

use crate::config::{RX_CAPACITY, TX_CAPACITY};

/// The soft UART as wired on this board
pub type BoardUart = SoftUart<
    SioLine,
    LineOutput<'static>,
    TickTimer,
    TickTimer,
    EdgeGate,
    RX_CAPACITY,
    TX_CAPACITY,
>;

/// RX bit timer
pub static RX_TIMER: TimerControl = TimerControl::new();

/// TX bit timer
pub static TX_TIMER: TimerControl = TimerControl::new();

/// RX start-edge detector
pub static RX_EDGE: EdgeControl = EdgeControl::new();
