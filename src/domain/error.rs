//! Domain error types.

/// Top-level error type for ticksim.
///
/// Only `InvalidInput` can come out of the numeric core. Running out of cash
/// or shares, and warming-up indicators, are ordinary outcomes and never
/// surface here.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("invalid order list '{input}': {reason}")]
    OrderParse { input: String, reason: String },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SimError {
    pub fn invalid_input(field: &str, reason: impl Into<String>) -> Self {
        SimError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Reject zero, negative, NaN and infinite prices.
pub fn ensure_positive_price(field: &str, price: f64) -> Result<(), SimError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(SimError::invalid_input(
            field,
            format!("must be a positive finite number, got {price}"),
        ));
    }
    Ok(())
}

impl From<&SimError> for std::process::ExitCode {
    fn from(err: &SimError) -> Self {
        let code: u8 = match err {
            SimError::Io(_) | SimError::Report { .. } => 1,
            SimError::ConfigParse { .. }
            | SimError::ConfigMissing { .. }
            | SimError::ConfigInvalid { .. } => 2,
            SimError::InvalidInput { .. } | SimError::OrderParse { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
