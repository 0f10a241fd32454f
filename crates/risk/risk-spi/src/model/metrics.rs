//! Risk metrics report model.

use serde::{Deserialize, Serialize};

/// Risk report for one instrument measured against one benchmark.
///
/// Percent-scaled fields (volatilities, drawdowns, VaR, CVaR) are rounded to
/// 2 decimal places. Dimensionless ratios (Sharpe, Sortino, beta,
/// correlation, covariance) are rounded to 4 decimal places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskMetrics {
    /// Sample standard deviation of daily returns, percent
    pub daily_volatility: f64,
    /// Daily volatility scaled by the square root of trading days per year, percent
    pub annual_volatility: f64,
    /// Downside deviation of daily returns, percent
    pub downside_deviation: f64,
    /// Sample standard deviation of benchmark daily returns, percent
    pub market_volatility: f64,
    /// Drawdown of the most recent bar, percent (zero or negative)
    pub yesterday_drawdown: f64,
    /// Deepest drawdown over the window, percent (zero or negative)
    pub max_drawdown: f64,
    pub daily_sharpe: f64,
    pub annual_sharpe: f64,
    pub daily_sortino: f64,
    pub annual_sortino: f64,
    pub beta: f64,
    pub correlation: f64,
    pub covariance: f64,
    /// Historical Value-at-Risk as a positive loss percentage
    pub value_at_risk: f64,
    /// Expected shortfall beyond the VaR cutoff as a positive loss percentage
    pub conditional_var: f64,
    /// Confidence level used for VaR and CVaR
    pub confidence: f64,
    /// Number of daily return observations
    pub observations: usize,
}

impl RiskMetrics {
    /// Every reported value is a finite number.
    pub fn is_finite(&self) -> bool {
        [
            self.daily_volatility,
            self.annual_volatility,
            self.downside_deviation,
            self.market_volatility,
            self.yesterday_drawdown,
            self.max_drawdown,
            self.daily_sharpe,
            self.annual_sharpe,
            self.daily_sortino,
            self.annual_sortino,
            self.beta,
            self.correlation,
            self.covariance,
            self.value_at_risk,
            self.conditional_var,
            self.confidence,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}
