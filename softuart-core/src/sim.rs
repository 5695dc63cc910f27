//! Simulated hardware for host tests
//!
//! Time advances in half-bit steps. A timer armed with
//! [`FirstTick::HalfBit`] fires one step later, [`FirstTick::FullBit`] two
//! steps later, and every two steps after that. TX line changes therefore
//! land on one parity and RX samples on the other, so the receiver always
//! samples a settled level.

use core::cell::{Cell, RefCell};

use heapless::Vec;
use softuart_hal::{BitTimer, EdgeMonitor, FirstTick, InputPin, OutputPin};

use crate::transceiver::SoftUart;

/// Line levels written by the transmitter, one entry per TX tick
pub type TxLog = Vec<bool, 512>;

/// RX line reading a shared level
pub struct SimLine<'a>(pub &'a Cell<bool>);

impl InputPin for SimLine<'_> {
    fn is_high(&self) -> bool {
        self.0.get()
    }
}

/// TX line writing a shared level
pub struct SimOutput<'a>(pub &'a Cell<bool>);

impl OutputPin for SimOutput<'_> {
    fn set_high(&mut self) {
        self.0.set(true);
    }

    fn set_low(&mut self) {
        self.0.set(false);
    }

    fn is_set_high(&self) -> bool {
        self.0.get()
    }
}

/// Schedule state of one simulated timer
#[derive(Default)]
pub struct TimerSlot {
    due: Cell<Option<u32>>,
    arms: Cell<u32>,
}

impl TimerSlot {
    /// Fire if due at `now`, scheduling the next period first so the
    /// handler may disarm
    pub fn fire(&self, now: u32) -> bool {
        if self.due.get() == Some(now) {
            self.due.set(Some(now + 2));
            true
        } else {
            false
        }
    }

    pub fn is_active(&self) -> bool {
        self.due.get().is_some()
    }

    /// How many times the timer has been armed
    pub fn arms(&self) -> u32 {
        self.arms.get()
    }
}

/// Timer bound to a simulated clock
pub struct SimTimer<'a> {
    pub clock: &'a Cell<u32>,
    pub slot: &'a TimerSlot,
}

impl BitTimer for SimTimer<'_> {
    fn arm(&mut self, first: FirstTick) {
        let delay = match first {
            FirstTick::HalfBit => 1,
            FirstTick::FullBit => 2,
        };
        self.slot.due.set(Some(self.clock.get() + delay));
        self.slot.arms.set(self.slot.arms.get() + 1);
    }

    fn disarm(&mut self) {
        self.slot.due.set(None);
    }

    fn is_active(&self) -> bool {
        self.slot.is_active()
    }
}

/// Edge monitor enable flag
pub struct SimEdge<'a>(pub &'a Cell<bool>);

impl EdgeMonitor for SimEdge<'_> {
    fn enable(&mut self) {
        self.0.set(true);
    }

    fn disable(&mut self) {
        self.0.set(false);
    }

    fn is_enabled(&self) -> bool {
        self.0.get()
    }
}

/// Transceiver type wired to a [`SimBench`]
pub type SimUart<'a, const RX_N: usize = 16, const TX_N: usize = 8> = SoftUart<
    SimLine<'a>,
    SimOutput<'a>,
    SimTimer<'a>,
    SimTimer<'a>,
    SimEdge<'a>,
    RX_N,
    TX_N,
>;

/// Simulated board: clock, wires, timers and edge detector
pub struct SimBench {
    pub clock: Cell<u32>,
    /// Level driven by the transmitter
    pub tx_wire: Cell<bool>,
    /// Level driven by a remote sender when not looped back
    pub rx_wire: Cell<bool>,
    pub rx_timer: TimerSlot,
    pub tx_timer: TimerSlot,
    pub edge_enabled: Cell<bool>,
    pub tx_log: RefCell<TxLog>,
    loopback: bool,
    last_rx_level: Cell<bool>,
}

impl SimBench {
    fn new(loopback: bool) -> Self {
        Self {
            clock: Cell::new(0),
            tx_wire: Cell::new(true),
            rx_wire: Cell::new(true),
            rx_timer: TimerSlot::default(),
            tx_timer: TimerSlot::default(),
            edge_enabled: Cell::new(false),
            tx_log: RefCell::new(Vec::new()),
            loopback,
            last_rx_level: Cell::new(true),
        }
    }

    /// TX wire electrically connected to the RX input
    pub fn loopback() -> Self {
        Self::new(true)
    }

    /// RX input driven by the test through [`send_frame`](Self::send_frame)
    pub fn split() -> Self {
        Self::new(false)
    }

    fn rx_source(&self) -> &Cell<bool> {
        if self.loopback {
            &self.tx_wire
        } else {
            &self.rx_wire
        }
    }

    /// Build and initialize a transceiver on this bench
    pub fn uart<const RX_N: usize, const TX_N: usize>(&self) -> SimUart<'_, RX_N, TX_N> {
        let uart = SoftUart::new(
            SimLine(self.rx_source()),
            SimOutput(&self.tx_wire),
            SimTimer {
                clock: &self.clock,
                slot: &self.rx_timer,
            },
            SimTimer {
                clock: &self.clock,
                slot: &self.tx_timer,
            },
            SimEdge(&self.edge_enabled),
        );
        uart.init();
        uart
    }

    /// Advance one half-bit step, delivering due ticks and edges
    pub fn step<const RX_N: usize, const TX_N: usize>(&self, uart: &SimUart<'_, RX_N, TX_N>) {
        let now = self.clock.get() + 1;
        self.clock.set(now);

        if self.tx_timer.fire(now) {
            uart.on_tx_tick();
            // A full log only truncates the trace, the link keeps running
            let _ = self.tx_log.borrow_mut().push(self.tx_wire.get());
        }

        let level = self.rx_source().get();
        if self.last_rx_level.get() && !level && self.edge_enabled.get() {
            uart.on_rx_edge();
        }
        self.last_rx_level.set(level);

        if self.rx_timer.fire(now) {
            uart.on_rx_tick();
        }
    }

    /// Step `n` times
    pub fn run<const RX_N: usize, const TX_N: usize>(
        &self,
        uart: &SimUart<'_, RX_N, TX_N>,
        n: u32,
    ) {
        for _ in 0..n {
            self.step(uart);
        }
    }

    /// Step until both directions are idle, giving up after `limit` steps
    ///
    /// Returns the number of steps taken.
    pub fn run_until_idle<const RX_N: usize, const TX_N: usize>(
        &self,
        uart: &SimUart<'_, RX_N, TX_N>,
        limit: u32,
    ) -> u32 {
        let mut steps = 0;
        while steps < limit && (self.tx_timer.is_active() || self.rx_timer.is_active()) {
            self.step(uart);
            steps += 1;
        }
        steps
    }

    /// Hold the remote RX level for one bit period
    pub fn send_bit<const RX_N: usize, const TX_N: usize>(
        &self,
        uart: &SimUart<'_, RX_N, TX_N>,
        high: bool,
    ) {
        self.rx_wire.set(high);
        self.step(uart);
        self.step(uart);
    }

    /// Drive one complete 8N1 frame onto the remote RX level
    pub fn send_frame<const RX_N: usize, const TX_N: usize>(
        &self,
        uart: &SimUart<'_, RX_N, TX_N>,
        byte: u8,
    ) {
        self.send_bit(uart, false);
        for bit in 0..8 {
            self.send_bit(uart, byte & (1 << bit) != 0);
        }
        self.send_bit(uart, true);
    }
}
