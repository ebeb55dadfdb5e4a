//! Simple Moving Average.
//!
//! SMA(n)[i] = mean(P[i-n+1..=i]) for i in n-1..len.
//! Output length: max(0, len - n + 1). Short histories give an empty vec.

use crate::domain::error::SimError;
use crate::domain::indicator::ensure_window;

pub fn calculate_sma(history: &[f64], window: usize) -> Result<Vec<f64>, SimError> {
    ensure_window("window", window)?;
    if history.len() < window {
        return Ok(Vec::new());
    }

    Ok(history
        .windows(window)
        .map(|w| w.iter().sum::<f64>() / window as f64)
        .collect())
}
