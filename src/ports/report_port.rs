//! Snapshot output port.

use crate::domain::error::SimError;
use crate::domain::session::TickSnapshot;

/// Receives one materialized snapshot per tick.
pub trait SnapshotSink {
    fn publish(&mut self, snapshot: &TickSnapshot) -> Result<(), SimError>;

    /// Flush buffered output. Default does nothing.
    fn finish(&mut self) -> Result<(), SimError> {
        Ok(())
    }
}
