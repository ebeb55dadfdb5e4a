//! Core simulation types and logic.

pub mod config_validation;
pub mod driver;
pub mod error;
pub mod indicator;
pub mod orders;
pub mod portfolio;
pub mod price_series;
pub mod random_walk;
pub mod session;
