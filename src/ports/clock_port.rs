//! Tick cadence port.

/// Paces the simulation driver. The core never waits on its own; whatever
/// implements this decides how long one tick lasts.
pub trait TickClock {
    /// Block until the next tick is due.
    fn wait(&mut self);
}
