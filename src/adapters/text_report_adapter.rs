//! Plain-text dashboard line per tick.

use std::io::Write;

use crate::domain::error::SimError;
use crate::domain::session::TickSnapshot;
use crate::ports::report_port::SnapshotSink;

pub const DEFAULT_CURRENCY: &str = "R$";

pub struct TextSink<W: Write> {
    writer: W,
    currency: String,
}

impl<W: Write> TextSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn fmt_opt(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", decimals, v),
        None => "-".to_string(),
    }
}

pub fn format_line(snapshot: &TickSnapshot, currency: &str) -> String {
    format!(
        "Symbol: {} | Price: {} {:.2} | Trend: {} | {}: {} | {}: {} | {}: {:.4} | Cash: {:.2} | Shares: {} | Total: {:.2}",
        snapshot.symbol,
        currency,
        snapshot.price,
        snapshot.trend,
        snapshot.sma_type,
        fmt_opt(snapshot.latest_sma(), 2),
        snapshot.rsi_type,
        fmt_opt(snapshot.latest_rsi(), 2),
        snapshot.volatility_type,
        snapshot.volatility,
        snapshot.balance,
        snapshot.shares,
        snapshot.total_value,
    )
}

impl<W: Write> SnapshotSink for TextSink<W> {
    fn publish(&mut self, snapshot: &TickSnapshot) -> Result<(), SimError> {
        writeln!(self.writer, "{}", format_line(snapshot, &self.currency))?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SimError> {
        self.writer.flush()?;
        Ok(())
    }
}
