//! `embedded-io` adapters
//!
//! Lets byte-stream consumers (parsers, formatters, bridges) use a shared
//! `&SoftUart` directly. These calls spin while the transceiver has
//! nothing to give or no room to take; code that must never wait should
//! stay on the non-blocking byte API.

use core::convert::Infallible;

use embedded_io::{ErrorType, Read, ReadReady, Write, WriteReady};
use softuart_hal::{BitTimer, EdgeMonitor, InputPin, OutputPin};

use crate::transceiver::SoftUart;

impl<RxPin, TxPin, RxTimer, TxTimer, Edge, const RX_N: usize, const TX_N: usize> ErrorType
    for &SoftUart<RxPin, TxPin, RxTimer, TxTimer, Edge, RX_N, TX_N>
{
    type Error = Infallible;
}

impl<RxPin, TxPin, RxTimer, TxTimer, Edge, const RX_N: usize, const TX_N: usize> Read
    for &SoftUart<RxPin, TxPin, RxTimer, TxTimer, Edge, RX_N, TX_N>
where
    RxPin: InputPin,
    TxPin: OutputPin,
    RxTimer: BitTimer,
    TxTimer: BitTimer,
    Edge: EdgeMonitor,
{
    /// Wait for at least one byte, then take as many as are waiting
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if buf.is_empty() {
            return Ok(0);
        }

        while self.rx_empty() {
            core::hint::spin_loop();
        }

        let mut count = 0;
        for slot in buf.iter_mut() {
            match self.try_get_byte() {
                Some(byte) => {
                    *slot = byte;
                    count += 1;
                }
                None => break,
            }
        }
        Ok(count)
    }
}

impl<RxPin, TxPin, RxTimer, TxTimer, Edge, const RX_N: usize, const TX_N: usize> ReadReady
    for &SoftUart<RxPin, TxPin, RxTimer, TxTimer, Edge, RX_N, TX_N>
where
    RxPin: InputPin,
    TxPin: OutputPin,
    RxTimer: BitTimer,
    TxTimer: BitTimer,
    Edge: EdgeMonitor,
{
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.rx_empty())
    }
}

impl<RxPin, TxPin, RxTimer, TxTimer, Edge, const RX_N: usize, const TX_N: usize> Write
    for &SoftUart<RxPin, TxPin, RxTimer, TxTimer, Edge, RX_N, TX_N>
where
    RxPin: InputPin,
    TxPin: OutputPin,
    RxTimer: BitTimer,
    TxTimer: BitTimer,
    Edge: EdgeMonitor,
{
    /// Wait for a free slot, then queue as much of `buf` as fits
    ///
    /// Unlike `write_bytes`, never drops: the count returned is exactly
    /// what was queued.
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        if buf.is_empty() {
            return Ok(0);
        }

        while self.tx_full() {
            core::hint::spin_loop();
        }

        // Only this context produces, so free space can only grow from here
        let count = buf.len().min(self.tx_free());
        self.write_bytes(&buf[..count]);
        Ok(count)
    }

    /// Wait until every queued byte has left the wire
    fn flush(&mut self) -> Result<(), Self::Error> {
        while !self.is_tx_idle() {
            core::hint::spin_loop();
        }
        Ok(())
    }
}

impl<RxPin, TxPin, RxTimer, TxTimer, Edge, const RX_N: usize, const TX_N: usize> WriteReady
    for &SoftUart<RxPin, TxPin, RxTimer, TxTimer, Edge, RX_N, TX_N>
where
    RxPin: InputPin,
    TxPin: OutputPin,
    RxTimer: BitTimer,
    TxTimer: BitTimer,
    Edge: EdgeMonitor,
{
    fn write_ready(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.tx_full())
    }
}
