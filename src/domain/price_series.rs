//! Single-asset price path driven by a multiplicative random walk.
//!
//! `advance` appends `last * (1 + r)` where `r` comes from the injected
//! [`StepSource`]. Steps are clamped to `[-MAX_DECLINE, MAX_RISE]` and
//! non-finite steps count as no move, so every price stays strictly positive
//! and finite.

use std::fmt;

use crate::domain::error::{SimError, ensure_positive_price};
use crate::domain::random_walk::{DEFAULT_MAX_STEP, UniformStep};
use crate::ports::step_port::StepSource;

/// Largest single-tick decline accepted from a step source.
pub const MAX_DECLINE: f64 = 0.99;

/// Largest single-tick rise accepted from a step source (price doubles).
pub const MAX_RISE: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Up => write!(f, "up"),
            Trend::Down => write!(f, "down"),
        }
    }
}

pub struct PriceSeries {
    symbol: String,
    initial_price: f64,
    history: Vec<f64>,
    history_limit: Option<usize>,
    source: Box<dyn StepSource>,
}

impl fmt::Debug for PriceSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriceSeries")
            .field("symbol", &self.symbol)
            .field("initial_price", &self.initial_price)
            .field("history", &self.history)
            .field("history_limit", &self.history_limit)
            .finish_non_exhaustive()
    }
}

impl PriceSeries {
    /// Series driven by an entropy-seeded ±2% uniform walk.
    pub fn new(symbol: impl Into<String>, initial_price: f64) -> Result<Self, SimError> {
        let source = UniformStep::from_entropy(DEFAULT_MAX_STEP)?;
        Self::with_source(symbol, initial_price, Box::new(source))
    }

    pub fn with_source(
        symbol: impl Into<String>,
        initial_price: f64,
        source: Box<dyn StepSource>,
    ) -> Result<Self, SimError> {
        ensure_positive_price("initial_price", initial_price)?;
        Ok(PriceSeries {
            symbol: symbol.into(),
            initial_price,
            history: vec![initial_price],
            history_limit: None,
            source,
        })
    }

    /// Keep at most `limit` prices, dropping the oldest on each advance.
    /// `None` lets the history grow for the life of the run.
    pub fn set_history_limit(&mut self, limit: Option<usize>) -> Result<(), SimError> {
        if limit == Some(0) {
            return Err(SimError::invalid_input(
                "history_limit",
                "must keep at least one price",
            ));
        }
        self.history_limit = limit;
        self.rotate();
        Ok(())
    }

    pub fn history_limit(&self) -> Option<usize> {
        self.history_limit
    }

    pub fn advance(&mut self) {
        let last = self.price();
        let mut step = self.source.next_step();
        if !step.is_finite() {
            step = 0.0;
        }
        let step = step.clamp(-MAX_DECLINE, MAX_RISE);
        let next = (last * (1.0 + step)).clamp(f64::MIN_POSITIVE, f64::MAX);
        self.history.push(next);
        self.rotate();
    }

    fn rotate(&mut self) {
        if let Some(limit) = self.history_limit {
            if self.history.len() > limit {
                let excess = self.history.len() - limit;
                self.history.drain(..excess);
            }
        }
    }

    pub fn price(&self) -> f64 {
        // History is seeded at construction and rotation keeps at least one entry.
        self.history.last().copied().unwrap_or(self.initial_price)
    }

    /// Owned copy of the full history, oldest first.
    pub fn history(&self) -> Vec<f64> {
        self.history.clone()
    }

    /// Borrowed read-only view of the history.
    pub fn history_view(&self) -> &[f64] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn initial_price(&self) -> f64 {
        self.initial_price
    }

    pub fn trend(&self) -> Trend {
        if self.price() >= self.initial_price {
            Trend::Up
        } else {
            Trend::Down
        }
    }
}
