//! Line driver tasks
//!
//! Each task parks in its driver loop forever, forwarding ticks or edges
//! to the soft UART.

use defmt::*;
use embassy_rp::gpio::Input;

use crate::link::{BoardUart, RX_EDGE, RX_TIMER, TX_TIMER};

/// RX bit timer task
#[embassy_executor::task]
pub async fn rx_timer_task(uart: &'static BoardUart) {
    debug!("RX timer task started");
    RX_TIMER.run(&|| uart.on_rx_tick()).await
}

/// TX bit timer task
#[embassy_executor::task]
pub async fn tx_timer_task(uart: &'static BoardUart) {
    debug!("TX timer task started");
    TX_TIMER.run(&|| uart.on_tx_tick()).await
}

/// RX start-edge task
///
/// Owns the RX `Input`; the receiver samples the same pin through the SIO
/// register.
#[embassy_executor::task]
pub async fn rx_edge_task(uart: &'static BoardUart, input: Input<'static>) {
    debug!("RX edge task started");
    RX_EDGE.run(input, &|| uart.on_rx_edge()).await
}
