//! Risk-adjusted return ratios and beta.

use risk_spi::{Result, RiskError};

use crate::statistics::{DispersionStats, VARIANCE_EPSILON};

/// De-annualize a percentage rate geometrically over `trading_days`.
pub fn daily_risk_free_rate(annual_rate_pct: f64, trading_days: u32) -> f64 {
    (1.0 + annual_rate_pct / 100.0).powf(1.0 / trading_days as f64) - 1.0
}

/// Excess mean return per unit of deviation (both as fractions).
pub fn excess_return_ratio(mean: f64, daily_risk_free: f64, deviation: f64) -> f64 {
    (mean - daily_risk_free) / deviation
}

/// Scale a daily ratio to an annual one.
pub fn annualize_ratio(daily: f64, trading_days: u32) -> f64 {
    daily * (trading_days as f64).sqrt()
}

/// Sharpe, Sortino and beta derived from one set of moments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatioSet {
    pub daily_sharpe: f64,
    pub annual_sharpe: f64,
    pub daily_sortino: f64,
    pub annual_sortino: f64,
    pub beta: f64,
}

/// Derive the ratio set.
///
/// Fails with `DegenerateSeries` when the downside deviation is zero
/// (no negative returns), since the Sortino ratio is then unbounded.
pub fn derive_ratios(
    stats: &DispersionStats,
    daily_risk_free: f64,
    trading_days: u32,
) -> Result<RatioSet> {
    if stats.variance <= VARIANCE_EPSILON || stats.market_variance <= VARIANCE_EPSILON {
        return Err(RiskError::DegenerateSeries(
            "zero variance in returns".to_string(),
        ));
    }
    if stats.downside_variance <= VARIANCE_EPSILON {
        return Err(RiskError::DegenerateSeries(
            "instrument returns have zero downside deviation".to_string(),
        ));
    }

    let daily_sharpe = excess_return_ratio(stats.mean, daily_risk_free, stats.std_dev_fraction());
    let daily_sortino = excess_return_ratio(
        stats.mean,
        daily_risk_free,
        stats.downside_deviation_fraction(),
    );

    Ok(RatioSet {
        daily_sharpe,
        annual_sharpe: annualize_ratio(daily_sharpe, trading_days),
        daily_sortino,
        annual_sortino: annualize_ratio(daily_sortino, trading_days),
        beta: stats.covariance / stats.market_variance,
    })
}
