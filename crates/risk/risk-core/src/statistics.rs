//! Dispersion and covariance statistics over daily returns.
//!
//! Every derived quantity (standard deviations, correlation, beta inputs)
//! comes from the single set of moments held by [`DispersionStats`], so
//! covariance and correlation can never drift apart.

use risk_spi::{Result, RiskError};

/// Variances at or below this are treated as zero (standard deviation 1e-10).
pub const VARIANCE_EPSILON: f64 = 1e-20;

/// Arithmetic mean. Zero for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Bessel-corrected sample variance. Zero for fewer than two values.
pub fn sample_variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64
}

/// Downside variance: sum of squared negative returns over the total count.
pub fn downside_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values
        .iter()
        .filter(|&&r| r < 0.0)
        .map(|r| r * r)
        .sum::<f64>()
        / values.len() as f64
}

/// Bessel-corrected sample covariance of two equal-length slices.
pub fn covariance(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len().min(b.len());
    if n < 2 {
        return 0.0;
    }
    let (a, b) = (&a[..n], &b[..n]);
    let (ma, mb) = (mean(a), mean(b));
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - ma) * (y - mb))
        .sum::<f64>()
        / (n - 1) as f64
}

/// Moments of instrument returns R and benchmark returns M.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DispersionStats {
    pub observations: usize,
    pub mean: f64,
    pub market_mean: f64,
    pub variance: f64,
    pub market_variance: f64,
    pub downside_variance: f64,
    pub covariance: f64,
}

impl DispersionStats {
    /// Compute all moments once.
    ///
    /// `instrument[i]` and `benchmark[i]` must refer to the same trading day.
    pub fn from_returns(instrument: &[f64], benchmark: &[f64]) -> Result<Self> {
        if instrument.len() != benchmark.len() {
            return Err(RiskError::misaligned(format!(
                "instrument has {} returns, benchmark has {}",
                instrument.len(),
                benchmark.len()
            )));
        }
        if instrument.len() < 2 {
            return Err(RiskError::InsufficientData {
                required: 2,
                got: instrument.len(),
            });
        }

        let stats = Self {
            observations: instrument.len(),
            mean: mean(instrument),
            market_mean: mean(benchmark),
            variance: sample_variance(instrument),
            market_variance: sample_variance(benchmark),
            downside_variance: downside_variance(instrument),
            covariance: covariance(instrument, benchmark),
        };

        if stats.variance <= VARIANCE_EPSILON {
            return Err(RiskError::DegenerateSeries(
                "instrument returns have zero variance".to_string(),
            ));
        }
        if stats.market_variance <= VARIANCE_EPSILON {
            return Err(RiskError::DegenerateSeries(
                "benchmark returns have zero variance".to_string(),
            ));
        }
        Ok(stats)
    }

    /// Standard deviation of R as a fraction.
    pub fn std_dev_fraction(&self) -> f64 {
        self.variance.sqrt()
    }

    /// Standard deviation of M as a fraction.
    pub fn market_std_dev_fraction(&self) -> f64 {
        self.market_variance.sqrt()
    }

    /// Downside deviation of R as a fraction.
    pub fn downside_deviation_fraction(&self) -> f64 {
        self.downside_variance.sqrt()
    }

    /// Standard deviation of R, percent.
    pub fn std_dev(&self) -> f64 {
        self.std_dev_fraction() * 100.0
    }

    /// Downside deviation of R, percent.
    pub fn negative_std_dev(&self) -> f64 {
        self.downside_deviation_fraction() * 100.0
    }

    /// Standard deviation of M, percent.
    pub fn market_std_dev(&self) -> f64 {
        self.market_std_dev_fraction() * 100.0
    }

    /// Pearson correlation from the shared covariance and standard deviations.
    pub fn correlation(&self) -> f64 {
        self.covariance / (self.std_dev_fraction() * self.market_std_dev_fraction())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const R: [f64; 5] = [0.01, -0.02, 0.015, -0.005, 0.02];
    const M: [f64; 5] = [0.005, -0.01, 0.012, -0.002, 0.011];

    fn pearson(x: &[f64], y: &[f64]) -> f64 {
        let n = x.len() as f64;
        let sx: f64 = x.iter().sum();
        let sy: f64 = y.iter().sum();
        let sxy: f64 = x.iter().zip(y).map(|(a, b)| a * b).sum();
        let sxx: f64 = x.iter().map(|a| a * a).sum();
        let syy: f64 = y.iter().map(|b| b * b).sum();
        (n * sxy - sx * sy) / ((n * sxx - sx * sx).sqrt() * (n * syy - sy * sy).sqrt())
    }

    #[test]
    fn test_mean() {
        assert!((mean(&R) - 0.004).abs() < 1e-15);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_sample_variance_bessel() {
        // mean 2.5, squared deviations 2.25 + 0.25 + 0.25 + 2.25 = 5, / 3
        let v = sample_variance(&[1.0, 2.0, 3.0, 4.0]);
        assert!((v - 5.0 / 3.0).abs() < 1e-12);
        assert_eq!(sample_variance(&[1.0]), 0.0);
    }

    #[test]
    fn test_downside_variance_uses_total_count() {
        // (0.02^2 + 0.005^2) / 5
        let expected = (0.0004 + 0.000025) / 5.0;
        assert!((downside_variance(&R) - expected).abs() < 1e-15);
    }

    #[test]
    fn test_downside_variance_no_losses() {
        assert_eq!(downside_variance(&[0.01, 0.02, 0.0]), 0.0);
    }

    #[test]
    fn test_covariance() {
        assert!((covariance(&R, &M) - 0.000149).abs() < 1e-12);
        assert!((covariance(&R, &R) - sample_variance(&R)).abs() < 1e-15);
    }

    #[test]
    fn test_correlation_matches_pearson() {
        let stats = DispersionStats::from_returns(&R, &M).unwrap();
        assert!((stats.correlation() - pearson(&R, &M)).abs() < 1e-6);
        assert!((stats.correlation() - 0.9840880639754057).abs() < 1e-9);
    }

    #[test]
    fn test_correlation_with_itself() {
        let stats = DispersionStats::from_returns(&R, &R).unwrap();
        assert!((stats.correlation() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_percent_std_devs() {
        let stats = DispersionStats::from_returns(&R, &M).unwrap();
        assert!((stats.std_dev() - sample_variance(&R).sqrt() * 100.0).abs() < 1e-12);
        assert!((stats.market_std_dev() - sample_variance(&M).sqrt() * 100.0).abs() < 1e-12);
        assert!((stats.negative_std_dev() - downside_variance(&R).sqrt() * 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_from_returns_length_mismatch() {
        let result = DispersionStats::from_returns(&R, &M[..4]);
        assert!(matches!(result, Err(RiskError::MisalignedSeries { .. })));
    }

    #[test]
    fn test_from_returns_too_short() {
        let result = DispersionStats::from_returns(&[0.01], &[0.02]);
        assert_eq!(result, Err(RiskError::InsufficientData { required: 2, got: 1 }));
    }

    #[test]
    fn test_from_returns_zero_variance() {
        let flat = [0.0; 5];
        let result = DispersionStats::from_returns(&flat, &M);
        assert!(matches!(result, Err(RiskError::DegenerateSeries(_))));
    }

    #[test]
    fn test_from_returns_flat_benchmark() {
        let flat = [0.001; 5];
        let result = DispersionStats::from_returns(&R, &flat);
        assert!(matches!(result, Err(RiskError::DegenerateSeries(ref msg)) if msg.contains("benchmark")));
    }
}
