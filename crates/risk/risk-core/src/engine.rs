//! Risk report assembly.

use risk_api::RiskConfig;
use risk_spi::{PriceSeries, Result, RiskEngine, RiskError, RiskMetrics};

use crate::ratios::{daily_risk_free_rate, derive_ratios};
use crate::returns::{daily_returns, extract, MIN_BARS};
use crate::statistics::DispersionStats;
use crate::tail::tail_risk;

/// Decimal places for percent-scaled values.
pub const PERCENT_PRECISION: i32 = 2;

/// Decimal places for dimensionless ratios.
pub const RATIO_PRECISION: i32 = 4;

/// Round half away from zero to `places` decimals. Negative zero becomes zero.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    let rounded = (value * factor).round() / factor;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Check that both series describe the same trading days, bar for bar.
pub fn check_alignment(instrument: &PriceSeries, benchmark: &PriceSeries) -> Result<()> {
    if instrument.len() != benchmark.len() {
        return Err(RiskError::misaligned(format!(
            "{} has {} bars, {} has {}",
            instrument.symbol(),
            instrument.len(),
            benchmark.symbol(),
            benchmark.len()
        )));
    }
    if let Some(index) = instrument.first_date_mismatch(benchmark) {
        let (a, b) = (&instrument.bars()[index], &benchmark.bars()[index]);
        return Err(RiskError::misaligned(format!(
            "bar {} is dated {} for {} but {} for {}",
            index,
            a.date,
            instrument.symbol(),
            b.date,
            benchmark.symbol()
        )));
    }
    Ok(())
}

/// Compute the risk report with the default trading calendar.
///
/// `annual_risk_free_rate_pct` is a percentage (3.9 means 3.9%) and
/// `confidence` the VaR level, usually [`risk_spi::DEFAULT_CONFIDENCE`].
pub fn compute_risk_metrics(
    instrument: &PriceSeries,
    benchmark: &PriceSeries,
    annual_risk_free_rate_pct: f64,
    confidence: f64,
) -> Result<RiskMetrics> {
    let config = RiskConfig::with_confidence(annual_risk_free_rate_pct, confidence);
    compute_risk_metrics_with(instrument, benchmark, &config)
}

/// Compute the risk report from a full configuration.
pub fn compute_risk_metrics_with(
    instrument: &PriceSeries,
    benchmark: &PriceSeries,
    config: &RiskConfig,
) -> Result<RiskMetrics> {
    config.validate()?;

    for series in [instrument, benchmark] {
        if series.len() < MIN_BARS {
            return Err(RiskError::InsufficientData {
                required: MIN_BARS,
                got: series.len(),
            });
        }
    }
    check_alignment(instrument, benchmark)?;

    let profile = extract(instrument)?;
    let market_returns = daily_returns(&benchmark.closes());
    let stats = DispersionStats::from_returns(&profile.returns, &market_returns)?;

    let trading_days = config.trading_days_per_year;
    let daily_rf = daily_risk_free_rate(config.risk_free_rate, trading_days);
    let ratios = derive_ratios(&stats, daily_rf, trading_days)?;
    let tail = tail_risk(&profile.returns, config.confidence)?;

    let pct = |v: f64| round_to(v, PERCENT_PRECISION);
    let ratio = |v: f64| round_to(v, RATIO_PRECISION);

    let metrics = RiskMetrics {
        daily_volatility: pct(stats.std_dev()),
        annual_volatility: pct(stats.std_dev() * (trading_days as f64).sqrt()),
        downside_deviation: pct(stats.negative_std_dev()),
        market_volatility: pct(stats.market_std_dev()),
        yesterday_drawdown: pct(profile.yesterday_drawdown() * 100.0),
        max_drawdown: pct(profile.max_drawdown() * 100.0),
        daily_sharpe: ratio(ratios.daily_sharpe),
        annual_sharpe: ratio(ratios.annual_sharpe),
        daily_sortino: ratio(ratios.daily_sortino),
        annual_sortino: ratio(ratios.annual_sortino),
        beta: ratio(ratios.beta),
        correlation: ratio(stats.correlation()),
        covariance: ratio(stats.covariance),
        value_at_risk: pct(tail.value_at_risk),
        conditional_var: pct(tail.conditional_var),
        confidence: config.confidence,
        observations: stats.observations,
    };

    if !metrics.is_finite() {
        return Err(RiskError::DegenerateSeries(
            "report contains a non-finite value".to_string(),
        ));
    }

    tracing::debug!(
        instrument = instrument.symbol(),
        benchmark = benchmark.symbol(),
        observations = metrics.observations,
        confidence = metrics.confidence,
        "risk metrics computed"
    );

    Ok(metrics)
}

/// Standard risk engine bound to a configuration.
#[derive(Debug, Clone, Default)]
pub struct StandardRiskEngine {
    config: RiskConfig,
}

impl StandardRiskEngine {
    /// Create an engine with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RiskConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RiskConfig {
        &self.config
    }
}

impl RiskEngine for StandardRiskEngine {
    fn compute(
        &self,
        instrument: &PriceSeries,
        benchmark: &PriceSeries,
        annual_risk_free_rate_pct: f64,
        confidence: f64,
    ) -> Result<RiskMetrics> {
        let config = RiskConfig {
            risk_free_rate: annual_risk_free_rate_pct,
            confidence,
            ..self.config.clone()
        };
        compute_risk_metrics_with(instrument, benchmark, &config)
    }

    fn confidence(&self) -> f64 {
        self.config.confidence
    }
}
