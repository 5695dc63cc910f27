//! Embassy async tasks
//!
//! Line tasks run on the interrupt executor and drive the soft UART's
//! state machines. Bridge and diagnostics tasks run on the thread
//! executor and only use the byte API.

pub mod bridge;
pub mod diagnostics;
pub mod line;

pub use bridge::{downlink_task, uplink_task};
pub use diagnostics::diagnostics_task;
pub use line::{rx_edge_task, rx_timer_task, tx_timer_task};
