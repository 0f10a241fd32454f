//! Risk configuration types.

use risk_spi::{Result, RiskError, RiskFreeRateSource, DEFAULT_CONFIDENCE};
use serde::{Deserialize, Serialize};

/// Trading days per year used for de-annualization and annualization.
pub const TRADING_DAYS_PER_YEAR: u32 = 252;

/// Default annualized risk-free rate, percent.
pub const DEFAULT_RISK_FREE_RATE: f64 = 3.9;

/// Default number of most recent bars kept per series (one trading year).
pub const DEFAULT_LOOKBACK: usize = 252;

// ============================================================================
// Risk Configuration
// ============================================================================

/// Risk calculation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// Annualized risk-free rate in percent (3.9 means 3.9%).
    pub risk_free_rate: f64,
    /// Confidence level for VaR and CVaR.
    pub confidence: f64,
    /// Trading days per year.
    pub trading_days_per_year: u32,
    /// Number of most recent bars to keep per series.
    pub lookback: usize,
}

impl RiskConfig {
    pub fn new(risk_free_rate: f64) -> Self {
        Self {
            risk_free_rate,
            ..Self::default()
        }
    }

    pub fn with_confidence(risk_free_rate: f64, confidence: f64) -> Self {
        Self {
            risk_free_rate,
            confidence,
            ..Self::default()
        }
    }

    /// Create a builder.
    pub fn builder() -> RiskConfigBuilder {
        RiskConfigBuilder::new()
    }

    /// Check every field is in range.
    pub fn validate(&self) -> Result<()> {
        if !self.risk_free_rate.is_finite() || self.risk_free_rate <= -100.0 {
            return Err(RiskError::invalid_parameter(
                "risk_free_rate",
                format!("must be a finite percentage above -100, got {}", self.risk_free_rate),
            ));
        }
        if !(self.confidence > 0.0 && self.confidence < 1.0) {
            return Err(RiskError::invalid_parameter(
                "confidence",
                format!("must be in (0, 1), got {}", self.confidence),
            ));
        }
        if self.trading_days_per_year == 0 {
            return Err(RiskError::invalid_parameter(
                "trading_days_per_year",
                "must be positive",
            ));
        }
        if self.lookback < 2 {
            return Err(RiskError::invalid_parameter(
                "lookback",
                format!("must keep at least 2 bars, got {}", self.lookback),
            ));
        }
        Ok(())
    }

    /// Risk-free rate source backed by this configuration.
    pub fn rate_source(&self) -> StaticRiskFreeRate {
        StaticRiskFreeRate::new(self.risk_free_rate)
    }
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
            confidence: DEFAULT_CONFIDENCE,
            trading_days_per_year: TRADING_DAYS_PER_YEAR,
            lookback: DEFAULT_LOOKBACK,
        }
    }
}

/// Builder for RiskConfig.
#[derive(Debug, Default)]
pub struct RiskConfigBuilder {
    risk_free_rate: Option<f64>,
    confidence: Option<f64>,
    trading_days_per_year: Option<u32>,
    lookback: Option<usize>,
}

impl RiskConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the annualized risk-free rate, percent.
    pub fn risk_free_rate(mut self, risk_free_rate: f64) -> Self {
        self.risk_free_rate = Some(risk_free_rate);
        self
    }

    /// Set the VaR confidence level.
    pub fn confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Set the number of trading days per year.
    pub fn trading_days_per_year(mut self, days: u32) -> Self {
        self.trading_days_per_year = Some(days);
        self
    }

    /// Set the lookback window, in bars.
    pub fn lookback(mut self, lookback: usize) -> Self {
        self.lookback = Some(lookback);
        self
    }

    /// Build and validate the configuration.
    pub fn build(self) -> Result<RiskConfig> {
        let defaults = RiskConfig::default();
        let config = RiskConfig {
            risk_free_rate: self.risk_free_rate.unwrap_or(defaults.risk_free_rate),
            confidence: self.confidence.unwrap_or(defaults.confidence),
            trading_days_per_year: self
                .trading_days_per_year
                .unwrap_or(defaults.trading_days_per_year),
            lookback: self.lookback.unwrap_or(defaults.lookback),
        };
        config.validate()?;
        Ok(config)
    }
}

// ============================================================================
// Risk-free rate
// ============================================================================

/// Risk-free rate fixed by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StaticRiskFreeRate {
    annual_rate_pct: f64,
}

impl StaticRiskFreeRate {
    pub fn new(annual_rate_pct: f64) -> Self {
        Self { annual_rate_pct }
    }
}

impl Default for StaticRiskFreeRate {
    fn default() -> Self {
        Self::new(DEFAULT_RISK_FREE_RATE)
    }
}

impl RiskFreeRateSource for StaticRiskFreeRate {
    fn annual_rate_pct(&self) -> Result<f64> {
        if !self.annual_rate_pct.is_finite() {
            return Err(RiskError::invalid_parameter(
                "risk_free_rate",
                "configured rate is not finite",
            ));
        }
        Ok(self.annual_rate_pct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RiskConfig::default();
        assert_eq!(config.risk_free_rate, 3.9);
        assert_eq!(config.confidence, 0.95);
        assert_eq!(config.trading_days_per_year, 252);
        assert_eq!(config.lookback, 252);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_new_keeps_defaults() {
        let config = RiskConfig::new(5.0);
        assert_eq!(config.risk_free_rate, 5.0);
        assert_eq!(config.confidence, 0.95);
    }

    #[test]
    fn test_with_confidence() {
        let config = RiskConfig::with_confidence(2.0, 0.99);
        assert_eq!(config.risk_free_rate, 2.0);
        assert_eq!(config.confidence, 0.99);
    }

    #[test]
    fn test_validate_rejects_confidence_bounds() {
        for confidence in [0.0, 1.0, -0.5, 1.5, f64::NAN] {
            let config = RiskConfig::with_confidence(3.9, confidence);
            assert!(
                matches!(config.validate(), Err(RiskError::InvalidParameter { ref name, .. }) if name == "confidence"),
                "confidence {} should be rejected",
                confidence
            );
        }
    }

    #[test]
    fn test_validate_rejects_rate() {
        assert!(RiskConfig::new(f64::INFINITY).validate().is_err());
        assert!(RiskConfig::new(-100.0).validate().is_err());
        assert!(RiskConfig::new(-1.0).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_trading_days() {
        let config = RiskConfig {
            trading_days_per_year: 0,
            ..RiskConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_short_lookback() {
        let config = RiskConfig {
            lookback: 1,
            ..RiskConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_builder() {
        let config = RiskConfig::builder()
            .risk_free_rate(4.25)
            .confidence(0.99)
            .trading_days_per_year(250)
            .lookback(500)
            .build()
            .unwrap();
        assert_eq!(config.risk_free_rate, 4.25);
        assert_eq!(config.confidence, 0.99);
        assert_eq!(config.trading_days_per_year, 250);
        assert_eq!(config.lookback, 500);
    }

    #[test]
    fn test_builder_defaults() {
        let config = RiskConfigBuilder::new().build().unwrap();
        assert_eq!(config, RiskConfig::default());
    }

    #[test]
    fn test_builder_validates() {
        assert!(RiskConfig::builder().confidence(1.2).build().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: RiskConfig = serde_json::from_str(r#"{"risk_free_rate": 4.1}"#).unwrap();
        assert_eq!(config.risk_free_rate, 4.1);
        assert_eq!(config.confidence, 0.95);
        assert_eq!(config.lookback, 252);
    }

    #[test]
    fn test_config_json_roundtrip() {
        let config = RiskConfig::with_confidence(3.0, 0.9);
        let json = serde_json::to_string(&config).unwrap();
        let back: RiskConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_static_rate_source() {
        let source = RiskConfig::new(4.5).rate_source();
        assert_eq!(source.annual_rate_pct().unwrap(), 4.5);
        assert_eq!(StaticRiskFreeRate::default().annual_rate_pct().unwrap(), 3.9);
    }

    #[test]
    fn test_static_rate_rejects_nan() {
        assert!(StaticRiskFreeRate::new(f64::NAN).annual_rate_pct().is_err());
    }
}
