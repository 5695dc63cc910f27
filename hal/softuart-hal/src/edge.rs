//! Line edge monitor abstraction
//!
//! Detects the falling edge that begins a start bit. The receiver disables
//! the monitor for the duration of a frame so data bits cannot re-trigger
//! it, and re-enables it once the stop bit has been consumed.

/// Falling-edge detector on the RX line
pub trait EdgeMonitor {
    /// Start delivering falling edges
    ///
    /// Edges that happened while the monitor was disabled must not be
    /// delivered late.
    fn enable(&mut self);

    /// Stop delivering falling edges
    fn disable(&mut self);

    /// Check if edges are currently being delivered
    fn is_enabled(&self) -> bool;
}

/// Handler invoked on a falling edge of the RX line
///
/// Runs in interrupt context.
pub trait EdgeHandler {
    /// Handle one falling edge
    fn on_edge(&self);
}

impl<F: Fn()> EdgeHandler for F {
    fn on_edge(&self) {
        self()
    }
}
