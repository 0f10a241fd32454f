//! Error types for risk calculations.

mod risk_error;

pub use risk_error::*;
