//! Output documents and config resolution for the `riskmetrics` binary.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use risk::{extract, PriceSeries, RiskConfig, RiskEngine, RiskMetrics, StandardRiskEngine};
use serde::Serialize;

/// Command-line overrides applied on top of the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub risk_free_rate: Option<f64>,
    pub confidence: Option<f64>,
    pub lookback: Option<usize>,
}

/// Resolve the effective config: defaults, then file, then overrides.
pub fn resolve_config(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<RiskConfig> {
    let mut config = match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config {}", path.display()))?;
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("Failed to parse config {}", path.display()))?
        }
        None => RiskConfig::default(),
    };

    if let Some(rate) = overrides.risk_free_rate {
        config.risk_free_rate = rate;
    }
    if let Some(confidence) = overrides.confidence {
        config.confidence = confidence;
    }
    if let Some(lookback) = overrides.lookback {
        config.lookback = lookback;
    }

    config.validate().context("Invalid risk configuration")?;
    Ok(config)
}

/// Report document written by `riskmetrics report`.
#[derive(Debug, Clone, Serialize)]
pub struct ReportOutput {
    pub instrument: String,
    pub benchmark: String,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub risk_free_rate: f64,
    pub metrics: RiskMetrics,
}

/// Trim both series to the lookback, align them and compute the report.
pub fn build_report(
    instrument: &PriceSeries,
    benchmark: &PriceSeries,
    config: &RiskConfig,
) -> Result<ReportOutput> {
    let (instrument, benchmark) = instrument
        .trailing(config.lookback)
        .align_with(&benchmark.trailing(config.lookback));

    tracing::info!(
        instrument = instrument.symbol(),
        benchmark = benchmark.symbol(),
        bars = instrument.len(),
        "computing risk report"
    );

    let engine = StandardRiskEngine::with_config(config.clone());
    let metrics = engine
        .evaluate(&instrument, &benchmark, &config.rate_source())
        .with_context(|| {
            format!(
                "Failed to compute risk report for {} against {}",
                instrument.symbol(),
                benchmark.symbol()
            )
        })?;

    Ok(ReportOutput {
        instrument: instrument.symbol().to_string(),
        benchmark: benchmark.symbol().to_string(),
        start: instrument.first_date(),
        end: instrument.last_date(),
        risk_free_rate: config.risk_free_rate,
        metrics,
    })
}

/// One row of `riskmetrics series` output (returns are percent).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesRow {
    pub date: NaiveDate,
    pub close: f64,
    #[serde(rename = "return")]
    pub daily_return: f64,
    pub drawdown: f64,
}

/// Document written by `riskmetrics series`.
#[derive(Debug, Clone, Serialize)]
pub struct SeriesOutput {
    pub symbol: String,
    pub rows: Vec<SeriesRow>,
}

/// Returns and drawdowns of the trailing window, one row per return.
pub fn build_series(series: &PriceSeries, lookback: usize) -> Result<SeriesOutput> {
    let window = series.trailing(lookback);
    let profile = extract(&window)
        .with_context(|| format!("Failed to extract returns for {}", window.symbol()))?;

    let rows = window
        .bars()
        .iter()
        .skip(1)
        .zip(profile.returns.iter().zip(&profile.drawdowns))
        .map(|(bar, (r, d))| SeriesRow {
            date: bar.date,
            close: bar.close,
            daily_return: r * 100.0,
            drawdown: d * 100.0,
        })
        .collect();

    Ok(SeriesOutput {
        symbol: window.symbol().to_string(),
        rows,
    })
}

/// Write pretty JSON to `output`, or stdout when absent.
pub fn write_json<T: Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let mut file = File::create(path)
                .with_context(|| format!("Failed to create output {}", path.display()))?;
            serde_json::to_writer_pretty(&mut file, value)
                .with_context(|| format!("Failed to write output {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote output");
        }
        None => {
            let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
            println!("{}", json);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn series(symbol: &str, start: NaiveDate, closes: &[f64]) -> PriceSeries {
        PriceSeries::from_closes(
            symbol,
            closes
                .iter()
                .enumerate()
                .map(|(i, c)| (start + Days::new(i as u64), *c)),
        )
        .unwrap()
    }

    fn wave(n: usize, amplitude: f64) -> Vec<f64> {
        (0..n)
            .map(|i| {
                let t = i as f64;
                100.0 + t * 0.05 + amplitude * (t * 0.3).sin()
            })
            .collect()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn test_resolve_config_defaults() {
        let config = resolve_config(None, &ConfigOverrides::default()).unwrap();
        assert_eq!(config, RiskConfig::default());
    }

    #[test]
    fn test_resolve_config_file_then_overrides() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"risk_free_rate": 5.0, "confidence": 0.99}}"#).unwrap();

        let from_file = resolve_config(Some(file.path()), &ConfigOverrides::default()).unwrap();
        assert_eq!(from_file.risk_free_rate, 5.0);
        assert_eq!(from_file.confidence, 0.99);
        assert_eq!(from_file.lookback, 252);

        let overrides = ConfigOverrides {
            risk_free_rate: Some(2.0),
            lookback: Some(60),
            ..Default::default()
        };
        let config = resolve_config(Some(file.path()), &overrides).unwrap();
        assert_eq!(config.risk_free_rate, 2.0);
        assert_eq!(config.confidence, 0.99);
        assert_eq!(config.lookback, 60);
    }

    #[test]
    fn test_resolve_config_rejects_bad_confidence() {
        let overrides = ConfigOverrides {
            confidence: Some(1.5),
            ..Default::default()
        };
        assert!(resolve_config(None, &overrides).is_err());
    }

    #[test]
    fn test_resolve_config_bad_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not json").unwrap();
        assert!(resolve_config(Some(file.path()), &ConfigOverrides::default()).is_err());
    }

    #[test]
    fn test_build_report_aligns_and_trims() {
        let instrument = series("ACME", day(1), &wave(30, 4.0));
        // Benchmark starts five days later.
        let benchmark = series("VTI", day(6), &wave(30, 1.5));
        let config = RiskConfig::builder().lookback(20).confidence(0.9).build().unwrap();

        let report = build_report(&instrument, &benchmark, &config).unwrap();
        assert_eq!(report.instrument, "ACME");
        assert_eq!(report.benchmark, "VTI");
        // Windows are days 11..=30 and 16..=35; they share 16..=30.
        assert_eq!(report.start, Some(day(16)));
        assert_eq!(report.end, Some(day(30)));
        assert_eq!(report.metrics.observations, 14);
        assert_eq!(report.risk_free_rate, 3.9);
    }

    #[test]
    fn test_build_report_without_overlap_fails() {
        let instrument = series("ACME", day(1), &wave(5, 2.0));
        let benchmark = series("VTI", day(20), &wave(5, 1.0));
        assert!(build_report(&instrument, &benchmark, &RiskConfig::default()).is_err());
    }

    #[test]
    fn test_build_series_rows() {
        let s = series("DIP", day(1), &[100.0, 120.0, 90.0, 125.0]);
        let out = build_series(&s, 252).unwrap();
        assert_eq!(out.symbol, "DIP");
        assert_eq!(out.rows.len(), 3);
        assert_eq!(out.rows[0].date, day(2));
        assert!((out.rows[0].daily_return - 20.0).abs() < 1e-9);
        assert!((out.rows[1].drawdown - (-25.0)).abs() < 1e-9);
        assert_eq!(out.rows[2].drawdown, 0.0);
    }

    #[test]
    fn test_build_series_respects_lookback() {
        let s = series("ACME", day(1), &wave(30, 2.0));
        let out = build_series(&s, 10).unwrap();
        assert_eq!(out.rows.len(), 9);
        assert_eq!(out.rows.last().unwrap().date, day(30));
    }

    #[test]
    fn test_write_json_to_file() {
        let s = series("DIP", day(1), &[100.0, 110.0, 99.0]);
        let out = build_series(&s, 252).unwrap();
        let file = NamedTempFile::new().unwrap();

        write_json(&out, Some(file.path())).unwrap();

        let text = std::fs::read_to_string(file.path()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["symbol"], "DIP");
        assert_eq!(json["rows"].as_array().unwrap().len(), 2);
        assert!(json["rows"][0].get("return").is_some());
    }
}
