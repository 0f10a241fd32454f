//! Risk-free rate source trait.

use crate::error::Result;

/// Supplier of the annualized risk-free rate, in percent (3.9 means 3.9%).
///
/// A configured constant is enough for the engine; a live quote can be
/// swapped in later without changing the engine contract.
pub trait RiskFreeRateSource: Send + Sync {
    /// Annualized risk-free rate in percent.
    fn annual_rate_pct(&self) -> Result<f64>;
}
