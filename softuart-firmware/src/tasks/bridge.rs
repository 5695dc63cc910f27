//! Bridge between the soft UART and the hardware UART
//!
//! - Downlink: bytes received on the soft line go out on UART0
//! - Uplink: bytes received on UART0 are queued on the soft line
//!
//! The soft UART has no wakers, so the downlink polls its RX ring and the
//! uplink backs off for one frame time when the TX ring is full.

use defmt::*;
use embassy_rp::uart::{BufferedUartRx, BufferedUartTx};
use embassy_time::{Duration, Timer};
use embedded_io_async::{Read, Write};

use crate::config::LINK;
use crate::link::BoardUart;

/// Downlink poll interval while the soft RX ring is empty
const POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Largest chunk moved per iteration
const CHUNK: usize = 64;

/// Downlink task - forwards soft UART RX to the hardware UART
#[embassy_executor::task]
pub async fn downlink_task(uart: &'static BoardUart, mut tx: BufferedUartTx) {
    info!("Downlink task started");

    let mut buf = [0u8; CHUNK];

    loop {
        let mut len = 0;
        while len < buf.len() {
            match uart.try_get_byte() {
                Some(byte) => {
                    buf[len] = byte;
                    len += 1;
                }
                None => break,
            }
        }

        if len == 0 {
            Timer::after(POLL_INTERVAL).await;
            continue;
        }

        if let Err(e) = tx.write_all(&buf[..len]).await {
            warn!("Downlink write failed: {:?}", e);
        } else {
            trace!("Downlink {} bytes", len);
        }
    }
}

/// Uplink task - queues hardware UART RX on the soft UART
#[embassy_executor::task]
pub async fn uplink_task(uart: &'static BoardUart, mut rx: BufferedUartRx) {
    info!("Uplink task started");

    let frame_time = Duration::from_nanos(LINK.frame_time_ns() as u64);
    let mut buf = [0u8; CHUNK];

    loop {
        let len = match rx.read(&mut buf).await {
            Ok(len) => len,
            Err(e) => {
                warn!("Uplink read error: {:?}", e);
                continue;
            }
        };

        let mut pending = &buf[..len];
        while !pending.is_empty() {
            let free = uart.tx_free();
            if free == 0 {
                Timer::after(frame_time).await;
                continue;
            }

            let (now, rest) = pending.split_at(free.min(pending.len()));
            uart.write_bytes(now);
            pending = rest;
        }
    }
}
