//! RSI (Relative Strength Index).
//!
//! Gains and losses are the positive and negative parts of consecutive price
//! deltas. Two smoothing methods are available:
//! - `Wilder` (default): first average is the simple mean of the first n
//!   gains/losses, then avg = (prev_avg * (n-1) + current) / n
//! - `Simple`: plain rolling mean of the last n gains/losses
//!
//! Formula: RSI = 100 - (100 / (1 + avg_gain / avg_loss)), evaluated as
//! 100 * g / (g + l) after scaling both averages by the larger one.
//! If avg_loss == 0: RSI = 100 when avg_gain > 0, 50 when both are zero.
//! Averages that overflow to infinity saturate: infinite gains alone give
//! 100, infinite losses alone give 0, both give 50.
//!
//! Output length: max(0, len - n). The first value belongs to price n
//! (zero-based), the first price with n deltas behind it.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::SimError;
use crate::domain::indicator::ensure_window;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RsiSmoothing {
    #[default]
    Wilder,
    Simple,
}

impl fmt::Display for RsiSmoothing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RsiSmoothing::Wilder => write!(f, "wilder"),
            RsiSmoothing::Simple => write!(f, "simple"),
        }
    }
}

impl FromStr for RsiSmoothing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "wilder" => Ok(RsiSmoothing::Wilder),
            "simple" | "sma" => Ok(RsiSmoothing::Simple),
            other => Err(format!("unknown rsi smoothing '{other}' (expected wilder or simple)")),
        }
    }
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    let scale = avg_gain.max(avg_loss);
    if scale == 0.0 {
        return 50.0;
    }
    if scale.is_infinite() {
        return match (avg_gain.is_infinite(), avg_loss.is_infinite()) {
            (true, false) => 100.0,
            (false, true) => 0.0,
            _ => 50.0,
        };
    }
    let (gain, loss) = (avg_gain / scale, avg_loss / scale);
    let rsi = 100.0 * gain / (gain + loss);
    if rsi.is_nan() {
        50.0
    } else {
        rsi.clamp(0.0, 100.0)
    }
}

pub fn calculate_rsi(
    history: &[f64],
    period: usize,
    smoothing: RsiSmoothing,
) -> Result<Vec<f64>, SimError> {
    ensure_window("period", period)?;
    if history.len() <= period {
        return Ok(Vec::new());
    }

    let mut gains: Vec<f64> = Vec::with_capacity(history.len() - 1);
    let mut losses: Vec<f64> = Vec::with_capacity(history.len() - 1);
    for pair in history.windows(2) {
        let change = pair[1] - pair[0];
        gains.push(if change > 0.0 { change } else { 0.0 });
        losses.push(if change < 0.0 { -change } else { 0.0 });
    }

    let mut values = Vec::with_capacity(history.len() - period);
    let n = period as f64;

    match smoothing {
        RsiSmoothing::Wilder => {
            let mut avg_gain = gains[..period].iter().sum::<f64>() / n;
            let mut avg_loss = losses[..period].iter().sum::<f64>() / n;
            values.push(rsi_from_averages(avg_gain, avg_loss));

            for i in period..gains.len() {
                avg_gain = (avg_gain * (n - 1.0) + gains[i]) / n;
                avg_loss = (avg_loss * (n - 1.0) + losses[i]) / n;
                values.push(rsi_from_averages(avg_gain, avg_loss));
            }
        }
        RsiSmoothing::Simple => {
            for end in period..=gains.len() {
                let avg_gain = gains[end - period..end].iter().sum::<f64>() / n;
                let avg_loss = losses[end - period..end].iter().sum::<f64>() / n;
                values.push(rsi_from_averages(avg_gain, avg_loss));
            }
        }
    }

    Ok(values)
}
