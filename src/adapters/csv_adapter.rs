//! CSV export of per-tick snapshots.

use std::io::Write;

use serde::Serialize;

use crate::domain::error::SimError;
use crate::domain::session::TickSnapshot;
use crate::ports::report_port::SnapshotSink;

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    tick: u64,
    symbol: &'a str,
    price: f64,
    sma: Option<f64>,
    rsi: Option<f64>,
    volatility: f64,
    balance: f64,
    shares: u64,
    total_value: f64,
}

impl<'a> From<&'a TickSnapshot> for CsvRow<'a> {
    fn from(s: &'a TickSnapshot) -> Self {
        CsvRow {
            tick: s.tick,
            symbol: &s.symbol,
            price: s.price,
            sma: s.latest_sma(),
            rsi: s.latest_rsi(),
            volatility: s.volatility,
            balance: s.balance,
            shares: s.shares,
            total_value: s.total_value,
        }
    }
}

pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(writer),
        }
    }

    pub fn into_inner(self) -> Result<W, SimError> {
        self.writer.into_inner().map_err(|e| SimError::Report {
            reason: format!("failed to flush CSV: {}", e.error()),
        })
    }
}

impl CsvSink<std::fs::File> {
    pub fn create(path: &std::path::Path) -> Result<Self, SimError> {
        let file = std::fs::File::create(path).map_err(|e| SimError::Report {
            reason: format!("failed to create {}: {}", path.display(), e),
        })?;
        Ok(Self::new(file))
    }
}

impl<W: Write> SnapshotSink for CsvSink<W> {
    fn publish(&mut self, snapshot: &TickSnapshot) -> Result<(), SimError> {
        self.writer
            .serialize(CsvRow::from(snapshot))
            .map_err(|e| SimError::Report {
                reason: format!("CSV write error: {}", e),
            })
    }

    fn finish(&mut self) -> Result<(), SimError> {
        self.writer.flush()?;
        Ok(())
    }
}
