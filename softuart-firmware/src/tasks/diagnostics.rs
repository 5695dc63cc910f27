//! Link diagnostics task
//!
//! Periodically logs ring buffer levels and warns when either ring has
//! started dropping bytes.

use defmt::*;
use embassy_time::{Duration, Ticker};
use softuart_core::LinkStats;

use crate::link::BoardUart;

/// Report interval in seconds
pub const REPORT_INTERVAL_SECS: u64 = 5;

/// Diagnostics task - logs `LinkStats` and flags new drops
#[embassy_executor::task]
pub async fn diagnostics_task(uart: &'static BoardUart) {
    info!("Diagnostics task started");

    let mut ticker = Ticker::every(Duration::from_secs(REPORT_INTERVAL_SECS));
    let mut last = LinkStats::default();

    loop {
        ticker.next().await;

        let stats = uart.stats();

        if stats.rx_dropped > last.rx_dropped {
            warn!(
                "Soft RX ring overflowed: {} bytes dropped",
                stats.rx_dropped - last.rx_dropped
            );
        }
        if stats.tx_dropped > last.tx_dropped {
            warn!(
                "Soft TX ring overflowed: {} bytes dropped",
                stats.tx_dropped - last.tx_dropped
            );
        }

        debug!(
            "Link: rx={:?} tx={:?} {}",
            uart.rx_state(),
            uart.tx_state(),
            stats
        );

        last = stats;
    }
}
