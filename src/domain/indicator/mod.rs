//! Technical indicators over a price history snapshot.
//!
//! Every function here is stateless and recomputes from the slice it is
//! given. Sequence outputs are suffix-aligned: the last element always
//! belongs to the most recent price, and the output is shorter than the
//! input by the indicator's warm-up length. Use [`pad_left`] to line an
//! output up with the history for charting.
//!
//! - `IndicatorType`: identity + parameters, displayed as `SMA(10)` etc.
//! - `IndicatorEngine`: the call surface used by sessions and the CLI

pub mod rsi;
pub mod sma;
pub mod volatility;

use std::fmt;

use crate::domain::error::SimError;

pub use rsi::RsiSmoothing;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    Rsi(usize),
    Volatility(usize),
}

impl IndicatorType {
    /// Number of leading prices with no output value.
    pub fn warmup(&self) -> usize {
        match self {
            IndicatorType::Sma(window) => window.saturating_sub(1),
            IndicatorType::Rsi(period) => *period,
            IndicatorType::Volatility(_) => 0,
        }
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(window) => write!(f, "SMA({})", window),
            IndicatorType::Rsi(period) => write!(f, "RSI({})", period),
            IndicatorType::Volatility(window) => write!(f, "VOL({})", window),
        }
    }
}

pub(crate) fn ensure_window(field: &str, window: usize) -> Result<(), SimError> {
    if window == 0 {
        return Err(SimError::invalid_input(field, "must be at least 1"));
    }
    Ok(())
}

/// Left-pad a suffix-aligned output with `None` up to `total_len`.
///
/// Outputs longer than `total_len` keep only their last `total_len` values.
pub fn pad_left(values: &[f64], total_len: usize) -> Vec<Option<f64>> {
    let kept = &values[values.len().saturating_sub(total_len)..];
    let mut padded = Vec::with_capacity(total_len);
    padded.resize(total_len - kept.len(), None);
    padded.extend(kept.iter().copied().map(Some));
    padded
}

/// Stateless entry points for the three indicators.
pub struct IndicatorEngine;

impl IndicatorEngine {
    pub fn sma(history: &[f64], window: usize) -> Result<Vec<f64>, SimError> {
        sma::calculate_sma(history, window)
    }

    /// RSI with Wilder smoothing.
    pub fn rsi(history: &[f64], period: usize) -> Result<Vec<f64>, SimError> {
        rsi::calculate_rsi(history, period, RsiSmoothing::Wilder)
    }

    pub fn rsi_with(
        history: &[f64],
        period: usize,
        smoothing: RsiSmoothing,
    ) -> Result<Vec<f64>, SimError> {
        rsi::calculate_rsi(history, period, smoothing)
    }

    /// Expects strictly positive prices; returns from a zero, negative or
    /// non-finite base are left out of the deviation.
    pub fn volatility(history: &[f64], window: usize) -> Result<f64, SimError> {
        volatility::calculate_volatility(history, window)
    }
}
