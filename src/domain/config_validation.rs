//! Configuration validation.
//!
//! Checks every simulation setting before a session is built and reports the
//! first offending key.

use crate::domain::error::SimError;
use crate::domain::indicator::RsiSmoothing;
use crate::domain::random_walk::StepDistribution;
use crate::ports::config_port::ConfigPort;

fn invalid(section: &str, key: &str, reason: &str) -> SimError {
    SimError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

pub fn validate_simulation_config(config: &dyn ConfigPort) -> Result<(), SimError> {
    validate_symbol(config)?;
    validate_initial_price(config)?;
    validate_max_step(config)?;
    validate_distribution(config)?;
    validate_unsigned(config, "simulation", "seed")?;
    validate_history_limit(config)?;
    validate_unsigned(config, "simulation", "ticks")?;
    validate_unsigned(config, "simulation", "interval_ms")?;
    validate_initial_balance(config)?;
    validate_indicators(config)?;
    Ok(())
}

fn validate_symbol(config: &dyn ConfigPort) -> Result<(), SimError> {
    match config.get_string("simulation", "symbol") {
        Some(s) if s.trim().is_empty() => {
            Err(invalid("simulation", "symbol", "symbol must not be empty"))
        }
        _ => Ok(()),
    }
}

/// Numeric value for `key`, `None` when absent. A present value that does
/// not parse is reported against the key.
pub fn read_float(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<Option<f64>, SimError> {
    config
        .get_double_checked(section, key)
        .map_err(|reason| invalid(section, key, &reason))
}

/// Integer counterpart of [`read_float`].
pub fn read_int(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<Option<i64>, SimError> {
    config
        .get_int_checked(section, key)
        .map_err(|reason| invalid(section, key, &reason))
}

fn validate_initial_price(config: &dyn ConfigPort) -> Result<(), SimError> {
    let value = read_float(config, "simulation", "initial_price")?.unwrap_or(30.0);
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid(
            "simulation",
            "initial_price",
            "initial_price must be positive",
        ));
    }
    Ok(())
}

fn validate_max_step(config: &dyn ConfigPort) -> Result<(), SimError> {
    let value = read_float(config, "simulation", "max_step")?.unwrap_or(0.02);
    if !value.is_finite() || value <= 0.0 || value >= 1.0 {
        return Err(invalid(
            "simulation",
            "max_step",
            "max_step must be between 0 and 1 (exclusive)",
        ));
    }
    Ok(())
}

fn validate_distribution(config: &dyn ConfigPort) -> Result<(), SimError> {
    if let Some(value) = config.get_string("simulation", "distribution") {
        value
            .parse::<StepDistribution>()
            .map_err(|reason| invalid("simulation", "distribution", &reason))?;
    }
    Ok(())
}

/// Present values must parse as non-negative integers.
fn validate_unsigned(config: &dyn ConfigPort, section: &str, key: &str) -> Result<(), SimError> {
    if config.has_key(section, key) && config.get_u64_opt(section, key).is_none() {
        return Err(invalid(
            section,
            key,
            &format!("{key} must be a non-negative integer"),
        ));
    }
    Ok(())
}

fn validate_history_limit(config: &dyn ConfigPort) -> Result<(), SimError> {
    validate_unsigned(config, "simulation", "history_limit")?;
    if config.get_u64_opt("simulation", "history_limit") == Some(0) {
        return Err(invalid(
            "simulation",
            "history_limit",
            "history_limit must be at least 1",
        ));
    }
    Ok(())
}

fn validate_initial_balance(config: &dyn ConfigPort) -> Result<(), SimError> {
    let value = read_float(config, "portfolio", "initial_balance")?.unwrap_or(10_000.0);
    if !value.is_finite() || value < 0.0 {
        return Err(invalid(
            "portfolio",
            "initial_balance",
            "initial_balance must be non-negative",
        ));
    }
    Ok(())
}

fn validate_indicators(config: &dyn ConfigPort) -> Result<(), SimError> {
    for (key, default) in [("sma_window", 10), ("rsi_period", 14), ("volatility_window", 20)] {
        if read_int(config, "indicators", key)?.unwrap_or(default) < 1 {
            return Err(invalid(
                "indicators",
                key,
                &format!("{key} must be at least 1"),
            ));
        }
    }
    if let Some(value) = config.get_string("indicators", "rsi_smoothing") {
        value
            .parse::<RsiSmoothing>()
            .map_err(|reason| invalid("indicators", "rsi_smoothing", &reason))?;
    }
    Ok(())
}
