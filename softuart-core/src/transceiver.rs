//! Transceiver facade
//!
//! [`SoftUart`] is the one context object tying both directions together.
//! It is shared by reference between the interrupt context (tick and edge
//! handlers) and the main loop (byte API), so every method takes `&self`
//! and all mutable state sits behind critical-section mutexes.
//!
//! ```text
//!  edge ──► on_rx_edge ─┐
//!  tick ──► on_rx_tick ─┴─► Receiver ──► RX ring ──► get_byte / try_get_byte
//!
//!  put_byte / write_bytes ──► TX ring ──► Transmitter ◄── on_tx_tick ◄── tick
//! ```

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use softuart_hal::{BitTimer, EdgeMonitor, InputPin, OutputPin};

use crate::config::{DEFAULT_RX_CAPACITY, DEFAULT_TX_CAPACITY};
use crate::rx::{Receiver, RxState};
use crate::shared::SharedRingBuffer;
use crate::tx::{Transmitter, TxState};

/// Buffer counters for diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkStats {
    /// Received bytes dropped because the RX ring was full
    pub rx_dropped: u32,
    /// Queued bytes dropped because the TX ring was full
    pub tx_dropped: u32,
    /// Received bytes waiting to be read
    pub rx_pending: usize,
    /// Bytes waiting to be transmitted
    pub tx_pending: usize,
}

/// Software serial transceiver
///
/// - `RxPin`, `RxTimer`, `Edge`: receive line, its bit timer and the
///   start-edge monitor
/// - `TxPin`, `TxTimer`: transmit line and its bit timer
/// - `RX_N`, `TX_N`: ring buffer capacities
pub struct SoftUart<
    RxPin,
    TxPin,
    RxTimer,
    TxTimer,
    Edge,
    const RX_N: usize = { DEFAULT_RX_CAPACITY },
    const TX_N: usize = { DEFAULT_TX_CAPACITY },
> {
    rx: Mutex<CriticalSectionRawMutex, RefCell<Receiver<RxPin, RxTimer, Edge>>>,
    tx: Mutex<CriticalSectionRawMutex, RefCell<Transmitter<TxPin, TxTimer>>>,
    rx_buf: SharedRingBuffer<u8, RX_N>,
    tx_buf: SharedRingBuffer<u8, TX_N>,
}

impl<RxPin, TxPin, RxTimer, TxTimer, Edge, const RX_N: usize, const TX_N: usize>
    SoftUart<RxPin, TxPin, RxTimer, TxTimer, Edge, RX_N, TX_N>
where
    RxPin: InputPin,
    TxPin: OutputPin,
    RxTimer: BitTimer,
    TxTimer: BitTimer,
    Edge: EdgeMonitor,
{
    /// Bundle the hardware into a transceiver
    ///
    /// The binding must already have configured `tx_pin` as an output and
    /// `rx_pin` as an input with pull-up. Nothing runs until
    /// [`init`](Self::init).
    pub fn new(
        rx_pin: RxPin,
        tx_pin: TxPin,
        rx_timer: RxTimer,
        tx_timer: TxTimer,
        edge: Edge,
    ) -> Self {
        Self {
            rx: Mutex::new(RefCell::new(Receiver::new(rx_pin, rx_timer, edge))),
            tx: Mutex::new(RefCell::new(Transmitter::new(tx_pin, tx_timer))),
            rx_buf: SharedRingBuffer::new(),
            tx_buf: SharedRingBuffer::new(),
        }
    }

    /// Bring the link up
    ///
    /// Drives the TX line idle, resets both state machines, empties both
    /// rings and enables start-edge detection. The TX timer stays
    /// disarmed until the first byte is queued.
    pub fn init(&self) {
        self.tx.lock(|tx| tx.borrow_mut().reset());
        self.tx_buf.clear();
        self.rx.lock(|rx| rx.borrow_mut().reset());
        self.rx_buf.clear();
    }

    /// Take the oldest received byte, or `0` if none is waiting
    ///
    /// Check [`rx_empty`](Self::rx_empty) first, or use
    /// [`try_get_byte`](Self::try_get_byte).
    pub fn get_byte(&self) -> u8 {
        self.rx_buf.get()
    }

    /// Take the oldest received byte if one is waiting
    pub fn try_get_byte(&self) -> Option<u8> {
        self.rx_buf.pop()
    }

    /// Check if no received bytes are waiting
    pub fn rx_empty(&self) -> bool {
        self.rx_buf.is_empty()
    }

    /// Check if no bytes are waiting to be transmitted
    ///
    /// The last byte may still be on the wire; see
    /// [`is_tx_idle`](Self::is_tx_idle).
    pub fn tx_empty(&self) -> bool {
        self.tx_buf.is_empty()
    }

    /// Check if the TX ring has no free slot
    pub fn tx_full(&self) -> bool {
        self.tx_buf.is_full()
    }

    /// Number of free TX slots
    pub fn tx_free(&self) -> usize {
        self.tx_buf.free()
    }

    /// Check if every queued byte has left the wire
    pub fn is_tx_idle(&self) -> bool {
        self.tx_buf.is_empty() && self.tx.lock(|tx| tx.borrow().is_idle())
    }

    /// Queue one byte for transmission
    ///
    /// Dropped silently if the TX ring is full.
    pub fn put_byte(&self, byte: u8) {
        self.tx_buf.put(byte);
        self.kick_tx();
    }

    /// Queue bytes for transmission
    ///
    /// Bytes that do not fit are dropped silently.
    pub fn write_bytes(&self, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        for &byte in bytes {
            self.tx_buf.put(byte);
        }
        self.kick_tx();
    }

    /// Receiver state, for diagnostics
    pub fn rx_state(&self) -> RxState {
        self.rx.lock(|rx| rx.borrow().state())
    }

    /// Transmitter state, for diagnostics
    pub fn tx_state(&self) -> TxState {
        self.tx.lock(|tx| tx.borrow().state())
    }

    /// Snapshot of the buffer counters
    pub fn stats(&self) -> LinkStats {
        LinkStats {
            rx_dropped: self.rx_buf.dropped(),
            tx_dropped: self.tx_buf.dropped(),
            rx_pending: self.rx_buf.len(),
            tx_pending: self.tx_buf.len(),
        }
    }

    /// Falling-edge handler for the RX line (interrupt context)
    pub fn on_rx_edge(&self) {
        self.rx.lock(|rx| {
            rx.borrow_mut().on_edge();
        });
    }

    /// RX timer tick handler (interrupt context)
    pub fn on_rx_tick(&self) {
        let received = self.rx.lock(|rx| rx.borrow_mut().on_tick());
        if let Some(byte) = received {
            self.rx_buf.put(byte);
        }
    }

    /// TX timer tick handler (interrupt context)
    pub fn on_tx_tick(&self) {
        self.tx.lock(|tx| tx.borrow_mut().on_tick(&self.tx_buf));
    }

    fn kick_tx(&self) {
        // Check-and-arm under the TX lock so a concurrent Stop tick cannot
        // disarm between the check and the arm
        self.tx.lock(|tx| {
            tx.borrow_mut().kick();
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimBench;

    /// Steps a frame takes on the wire, in half-bit units
    const FRAME_STEPS: u32 = 20;

    #[test]
    fn test_init_state() {
        let bench = SimBench::loopback();
        let uart = bench.uart::<16, 8>();

        assert!(bench.tx_wire.get());
        assert!(bench.edge_enabled.get());
        assert!(!bench.tx_timer.is_active());
        assert!(!bench.rx_timer.is_active());
        assert_eq!(uart.rx_state(), RxState::Idle);
        assert_eq!(uart.tx_state(), TxState::Idle);
        assert!(uart.is_tx_idle());
    }

    #[test]
    fn test_idle_queries_are_idempotent() {
        let bench = SimBench::loopback();
        let uart = bench.uart::<16, 8>();

        for _ in 0..5 {
            assert!(uart.rx_empty());
            assert!(uart.tx_empty());
        }
        assert_eq!(uart.stats(), LinkStats::default());
        assert_eq!(uart.rx_state(), RxState::Idle);
        assert_eq!(uart.tx_state(), TxState::Idle);
        assert_eq!(bench.tx_timer.arms(), 0);
        assert_eq!(bench.rx_timer.arms(), 0);
    }

    #[test]
    fn test_loopback_round_trip() {
        let bench = SimBench::loopback();
        let uart = bench.uart::<16, 8>();

        uart.put_byte(0x41);
        bench.run_until_idle(&uart, 100);

        assert!(!uart.rx_empty());
        assert_eq!(uart.get_byte(), 0x41);
        assert!(uart.rx_empty());
        assert!(uart.is_tx_idle());
    }

    #[test]
    fn test_loopback_every_byte_value() {
        let bench = SimBench::loopback();
        let uart = bench.uart::<16, 8>();

        for value in 0..=255u8 {
            uart.put_byte(value);
            bench.run_until_idle(&uart, 100);
            assert_eq!(uart.try_get_byte(), Some(value));
        }
        assert_eq!(uart.stats(), LinkStats::default());
    }

    #[test]
    fn test_loopback_burst_preserves_order() {
        let bench = SimBench::loopback();
        let uart = bench.uart::<16, 8>();
        let message = b"$GPRMC";

        uart.write_bytes(message);
        assert_eq!(bench.tx_timer.arms(), 1);
        bench.run_until_idle(&uart, 400);

        for &expected in message {
            assert_eq!(uart.try_get_byte(), Some(expected));
        }
        assert!(uart.rx_empty());
        // One arm for the whole burst, one RX arm per frame
        assert_eq!(bench.tx_timer.arms(), 1);
        assert_eq!(bench.rx_timer.arms(), message.len() as u32);
    }

    #[test]
    fn test_bit_order_on_wire() {
        let bench = SimBench::loopback();
        let uart = bench.uart::<16, 8>();

        uart.put_byte(0x41);
        bench.run_until_idle(&uart, 100);

        let log = bench.tx_log.borrow();
        // Idle tick, start bit, then data bits LSB first, then stop
        assert!(log[0]);
        assert!(!log[1]);
        assert_eq!(
            &log[2..10],
            &[true, false, false, false, false, false, true, false]
        );
        assert!(log[10]);
        assert_eq!(log.len(), 11);
    }

    #[test]
    fn test_put_while_busy_does_not_rearm() {
        let bench = SimBench::loopback();
        let uart = bench.uart::<16, 8>();

        uart.put_byte(b'a');
        bench.run(&uart, 7);
        uart.put_byte(b'b');
        assert_eq!(bench.tx_timer.arms(), 1);

        bench.run_until_idle(&uart, 200);
        assert_eq!(uart.try_get_byte(), Some(b'a'));
        assert_eq!(uart.try_get_byte(), Some(b'b'));
    }

    #[test]
    fn test_tx_overflow_drops_newest() {
        let bench = SimBench::loopback();
        let uart = bench.uart::<16, 4>();

        uart.write_bytes(&[1, 2, 3, 4, 5, 6]);
        assert!(uart.tx_full());
        assert_eq!(uart.stats().tx_dropped, 2);

        bench.run_until_idle(&uart, 400);
        for expected in 1..=4 {
            assert_eq!(uart.try_get_byte(), Some(expected));
        }
        assert_eq!(uart.try_get_byte(), None);
    }

    #[test]
    fn test_rx_overflow_drops_newest() {
        let bench = SimBench::split();
        let uart = bench.uart::<4, 8>();

        for value in 10..16 {
            bench.send_frame(&uart, value);
        }

        let stats = uart.stats();
        assert_eq!(stats.rx_pending, 4);
        assert_eq!(stats.rx_dropped, 2);
        for expected in 10..14 {
            assert_eq!(uart.get_byte(), expected);
        }
        assert_eq!(uart.get_byte(), 0);
    }

    #[test]
    fn test_receive_from_remote() {
        let bench = SimBench::split();
        let uart = bench.uart::<16, 8>();

        bench.send_frame(&uart, 0x55);
        bench.send_frame(&uart, 0xAA);

        assert_eq!(uart.try_get_byte(), Some(0x55));
        assert_eq!(uart.try_get_byte(), Some(0xAA));
        assert_eq!(uart.rx_state(), RxState::Idle);
        assert!(bench.edge_enabled.get());
    }

    #[test]
    fn test_second_edge_mid_frame_is_ignored() {
        let bench = SimBench::split();
        let uart = bench.uart::<16, 8>();

        // Start bit and the first few data bits of 0x00
        bench.send_bit(&uart, false);
        bench.send_bit(&uart, false);
        bench.send_bit(&uart, false);
        assert_eq!(uart.rx_state(), RxState::Bit);
        assert!(!bench.edge_enabled.get());

        // Spurious edge straight into the handler
        uart.on_rx_edge();
        assert_eq!(bench.rx_timer.arms(), 1);

        for _ in 0..6 {
            bench.send_bit(&uart, false);
        }
        bench.send_bit(&uart, true);

        assert_eq!(uart.try_get_byte(), Some(0x00));
        assert_eq!(uart.try_get_byte(), None);
        assert_eq!(bench.rx_timer.arms(), 1);
    }

    #[test]
    fn test_data_edges_do_not_retrigger() {
        let bench = SimBench::split();
        let uart = bench.uart::<16, 8>();

        // 0x55 toggles every bit, producing four falling edges mid-frame
        bench.send_frame(&uart, 0x55);
        bench.run(&uart, FRAME_STEPS);

        assert_eq!(bench.rx_timer.arms(), 1);
        assert_eq!(uart.try_get_byte(), Some(0x55));
        assert!(uart.rx_empty());
    }

    #[test]
    fn test_full_duplex() {
        let bench = SimBench::split();
        let uart = bench.uart::<16, 8>();

        uart.put_byte(0x3C);
        bench.send_frame(&uart, 0xC3);
        bench.run_until_idle(&uart, 100);

        assert_eq!(uart.try_get_byte(), Some(0xC3));
        let log = bench.tx_log.borrow();
        assert_eq!(
            &log[2..10],
            &[false, false, true, true, true, true, false, false]
        );
    }

    #[test]
    fn test_init_discards_pending() {
        let bench = SimBench::split();
        let uart = bench.uart::<16, 8>();

        bench.send_frame(&uart, 0x12);
        uart.put_byte(0x34);
        uart.init();

        assert!(uart.rx_empty());
        assert!(uart.tx_empty());
        assert!(uart.is_tx_idle());
        assert!(bench.tx_wire.get());
        assert_eq!(uart.stats(), LinkStats::default());
    }
}
