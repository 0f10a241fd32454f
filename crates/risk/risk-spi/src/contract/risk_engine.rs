//! Risk engine trait.

use crate::contract::RiskFreeRateSource;
use crate::error::Result;
use crate::model::{PriceSeries, RiskMetrics};

/// Default VaR/CVaR confidence level.
pub const DEFAULT_CONFIDENCE: f64 = 0.95;

/// Risk report calculator.
///
/// Implementations are pure: the same inputs always yield the same report,
/// and a report is either fully assembled or not produced at all.
pub trait RiskEngine: Send + Sync {
    /// Compute the report for `instrument` measured against `benchmark`.
    fn compute(
        &self,
        instrument: &PriceSeries,
        benchmark: &PriceSeries,
        annual_risk_free_rate_pct: f64,
        confidence: f64,
    ) -> Result<RiskMetrics>;

    /// Confidence level used by [`RiskEngine::evaluate`].
    fn confidence(&self) -> f64 {
        DEFAULT_CONFIDENCE
    }

    /// Compute the report with the rate taken from `rates`.
    fn evaluate(
        &self,
        instrument: &PriceSeries,
        benchmark: &PriceSeries,
        rates: &dyn RiskFreeRateSource,
    ) -> Result<RiskMetrics> {
        let rate = rates.annual_rate_pct()?;
        self.compute(instrument, benchmark, rate, self.confidence())
    }
}
