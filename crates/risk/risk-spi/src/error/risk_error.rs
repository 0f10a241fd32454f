//! Risk calculation error types.

use thiserror::Error;

/// Risk calculation errors.
///
/// Every failure is a local validation failure raised synchronously while a
/// report is assembled. No partial report is ever produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RiskError {
    /// Series too short to derive returns or sample statistics
    #[error("Insufficient data: required {required}, got {got}")]
    InsufficientData { required: usize, got: usize },

    /// Instrument and benchmark do not describe the same trading days
    #[error("Misaligned series: {reason}")]
    MisalignedSeries { reason: String },

    /// A denominator (variance or downside deviation) is zero
    #[error("Degenerate series: {0}")]
    DegenerateSeries(String),

    /// The VaR tail is empty at the chosen confidence and sample size
    #[error("Insufficient tail data: {observations} observations leave no tail at confidence {confidence}")]
    InsufficientTailData { observations: usize, confidence: f64 },

    /// A calculation parameter is out of range
    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },

    /// A price bar violates the series invariants
    #[error("Invalid bar at index {index}: {reason}")]
    InvalidBar { index: usize, reason: String },
}

impl RiskError {
    pub fn misaligned(reason: impl Into<String>) -> Self {
        RiskError::MisalignedSeries {
            reason: reason.into(),
        }
    }

    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        RiskError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for risk operations.
pub type Result<T> = std::result::Result<T, RiskError>;
