//! Bit-timing generator abstraction
//!
//! A bit timer wraps a periodic hardware timing source that fires once per
//! bit period while armed. The transceiver uses two of them: one paces RX
//! sampling, one paces TX line changes. They run on independent timelines.

/// Offset of the first tick after arming
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FirstTick {
    /// First tick after half a bit period
    ///
    /// Used by the receiver so that every following tick lands in the
    /// middle of a bit, away from the edges.
    HalfBit,
    /// First tick after a full bit period
    FullBit,
}

impl FirstTick {
    /// Delay from arming to the first tick, in nanoseconds
    pub const fn delay_ns(self, bit_period_ns: u32) -> u32 {
        match self {
            FirstTick::HalfBit => bit_period_ns / 2,
            FirstTick::FullBit => bit_period_ns,
        }
    }
}

/// Periodic per-bit timing source
///
/// Implementations call their registered [`TickHandler`] once per bit
/// period while active. `arm` and `disarm` may be called from inside the
/// tick handler itself.
pub trait BitTimer {
    /// Start periodic firing
    ///
    /// Re-arming an active timer restarts its schedule from now.
    fn arm(&mut self, first: FirstTick);

    /// Stop periodic firing
    ///
    /// No further ticks are delivered until the next `arm`.
    fn disarm(&mut self);

    /// Check if the timer is currently firing
    fn is_active(&self) -> bool;
}

/// Handler invoked once per timer period
///
/// Runs in interrupt context: must be short and must never block.
pub trait TickHandler {
    /// Handle one tick
    fn on_tick(&self);
}

impl<F: Fn()> TickHandler for F {
    fn on_tick(&self) {
        self()
    }
}
