//! Volatility: population standard deviation of simple returns.
//!
//! Uses the trailing `window` prices (all prices if fewer are available):
//! R[j] = P[j] / P[j-1] - 1
//! VOL(n) = sqrt(sum((R[j] - mean(R))^2) / count(R))
//!
//! Returns are scale-independent, so a 1% wiggle reads the same at any price.
//! Fewer than two prices, or a window of one, gives 0.0 rather than an error.
//! Returns that are undefined (non-positive base, non-finite price or ratio)
//! are skipped; if none remain the result is 0.0.

use crate::domain::error::SimError;
use crate::domain::indicator::ensure_window;

pub fn calculate_volatility(history: &[f64], window: usize) -> Result<f64, SimError> {
    ensure_window("window", window)?;
    if history.len() < 2 || window < 2 {
        return Ok(0.0);
    }

    let start = history.len().saturating_sub(window);
    let returns: Vec<f64> = history[start..]
        .windows(2)
        .filter(|pair| pair[0] > 0.0 && pair[0].is_finite())
        .map(|pair| pair[1] / pair[0] - 1.0)
        .filter(|r| r.is_finite())
        .collect();
    if returns.is_empty() {
        return Ok(0.0);
    }

    let count = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / count;
    let variance = returns
        .iter()
        .map(|r| {
            let diff = r - mean;
            diff * diff
        })
        .sum::<f64>()
        / count;

    Ok(variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn volatility_single_price_is_zero() {
        assert_eq!(calculate_volatility(&[100.0], 20).unwrap(), 0.0);
    }

    #[test]
    fn volatility_empty_is_zero() {
        assert_eq!(calculate_volatility(&[], 5).unwrap(), 0.0);
    }

    #[test]
    fn volatility_window_one_is_zero() {
        assert_eq!(calculate_volatility(&[100.0, 110.0, 90.0], 1).unwrap(), 0.0);
    }

    #[test]
    fn volatility_zero_window_rejected() {
        let err = calculate_volatility(&[100.0, 101.0], 0).unwrap_err();
        assert!(matches!(err, SimError::InvalidInput { .. }));
    }

    #[test]
    fn volatility_constant_prices() {
        let v = calculate_volatility(&[50.0; 10], 5).unwrap();
        assert_relative_eq!(v, 0.0);
    }

    #[test]
    fn volatility_constant_growth_is_zero() {
        let history: Vec<f64> = (0..10).map(|i| 100.0 * 1.01f64.powi(i)).collect();
        let v = calculate_volatility(&history, 10).unwrap();
        assert!(v < 1e-12, "constant returns should have no dispersion, got {v}");
    }

    #[test]
    fn volatility_known_values() {
        // returns: +10%, -10% -> mean 0, population stddev 0.1
        let v = calculate_volatility(&[100.0, 110.0, 99.0], 3).unwrap();
        assert_relative_eq!(v, 0.1, epsilon = 1e-12);
    }

    #[test]
    fn volatility_uses_trailing_window_only() {
        // Early swing falls outside the 3-price window.
        let history = [100.0, 200.0, 100.0, 100.0, 110.0, 99.0];
        let v = calculate_volatility(&history, 3).unwrap();
        assert_relative_eq!(v, 0.1, epsilon = 1e-12);
    }

    #[test]
    fn volatility_short_history_uses_all_prices() {
        let short = calculate_volatility(&[100.0, 110.0, 99.0], 20).unwrap();
        assert_relative_eq!(short, 0.1, epsilon = 1e-12);
    }

    #[test]
    fn volatility_skips_undefined_returns() {
        // 0 -> 100 and -5 -> 100 have no defined return; the rest are +10%, -10%
        let v = calculate_volatility(&[0.0, 100.0, 110.0, 99.0], 4).unwrap();
        assert_relative_eq!(v, 0.1, epsilon = 1e-12);

        let v = calculate_volatility(&[-5.0, 100.0, 110.0, 99.0], 4).unwrap();
        assert_relative_eq!(v, 0.1, epsilon = 1e-12);

        let v = calculate_volatility(&[0.0, 0.0, 0.0], 3).unwrap();
        assert_eq!(v, 0.0);
    }

    #[test]
    fn volatility_scale_independent() {
        let base = [10.0, 10.5, 10.2, 10.9, 10.4];
        let scaled: Vec<f64> = base.iter().map(|p| p * 1000.0).collect();
        let a = calculate_volatility(&base, 5).unwrap();
        let b = calculate_volatility(&scaled, 5).unwrap();
        assert_relative_eq!(a, b, epsilon = 1e-12);
    }
}
