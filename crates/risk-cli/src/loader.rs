//! Price file loading for CSV, JSON and Alpha Vantage documents.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::NaiveDate;
use risk::{PriceBar, PriceSeries, RiskError};
use serde::Deserialize;

/// Key holding daily bars in an Alpha Vantage `TIME_SERIES_DAILY` document.
const ALPHA_VANTAGE_DAILY_KEY: &str = "Time Series (Daily)";

/// Error type for price file loading.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to open {path}: {reason}")]
    FileNotFound { path: String, reason: String },

    #[error("Failed to read file: {0}")]
    ReadError(String),

    #[error("Failed to parse CSV: {0}")]
    CsvError(String),

    #[error("Failed to parse JSON: {0}")]
    JsonError(String),

    #[error("Unrecognized price document: {0}")]
    UnknownFormat(String),

    #[error("No price bars found in {0}")]
    NoData(String),

    #[error(transparent)]
    InvalidSeries(#[from] RiskError),
}

/// One daily bar as stored by Alpha Vantage (all fields are strings).
#[derive(Debug, Deserialize)]
struct AlphaVantageBar {
    #[serde(rename = "1. open")]
    open: String,
    #[serde(rename = "2. high")]
    high: String,
    #[serde(rename = "3. low")]
    low: String,
    #[serde(rename = "4. close")]
    close: String,
    #[serde(rename = "5. volume")]
    volume: String,
}

impl AlphaVantageBar {
    fn into_bar(self, date: NaiveDate) -> Result<PriceBar, LoadError> {
        let parse = |name: &str, raw: &str| {
            raw.trim().parse::<f64>().map_err(|e| {
                LoadError::JsonError(format!("{} {} on {}: {}", name, raw, date, e))
            })
        };
        Ok(PriceBar::new(
            date,
            parse("open", &self.open)?,
            parse("high", &self.high)?,
            parse("low", &self.low)?,
            parse("close", &self.close)?,
            parse("volume", &self.volume)?,
        ))
    }
}

/// Load bars from a CSV file with a `date,open,high,low,close,volume` header.
pub fn load_csv_bars(path: &Path) -> Result<Vec<PriceBar>, LoadError> {
    let file = open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(file));

    reader
        .deserialize::<PriceBar>()
        .map(|row| row.map_err(|e| LoadError::CsvError(e.to_string())))
        .collect()
}

/// Load bars from a JSON array of bars or an Alpha Vantage daily document.
pub fn load_json_bars(path: &Path) -> Result<Vec<PriceBar>, LoadError> {
    let file = open(path)?;
    let json: serde_json::Value = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| LoadError::JsonError(e.to_string()))?;
    parse_json_bars(json)
}

fn parse_json_bars(json: serde_json::Value) -> Result<Vec<PriceBar>, LoadError> {
    if json.is_array() {
        return serde_json::from_value(json).map_err(|e| LoadError::JsonError(e.to_string()));
    }

    let Some(obj) = json.as_object() else {
        return Err(LoadError::UnknownFormat(
            "expected an array of bars or an object".to_string(),
        ));
    };

    if let Some(daily) = obj.get(ALPHA_VANTAGE_DAILY_KEY) {
        let bars: BTreeMap<NaiveDate, AlphaVantageBar> = serde_json::from_value(daily.clone())
            .map_err(|e| LoadError::JsonError(e.to_string()))?;
        return bars
            .into_iter()
            .map(|(date, bar)| bar.into_bar(date))
            .collect();
    }

    // Provider error payloads carry an explanatory message instead of data.
    for key in ["Error Message", "Note", "Information"] {
        if let Some(message) = obj.get(key).and_then(|v| v.as_str()) {
            return Err(LoadError::UnknownFormat(message.to_string()));
        }
    }

    for key in ["bars", "data"] {
        if let Some(arr) = obj.get(key).filter(|v| v.is_array()) {
            return serde_json::from_value(arr.clone())
                .map_err(|e| LoadError::JsonError(e.to_string()));
        }
    }

    Err(LoadError::UnknownFormat(format!(
        "no \"{}\", \"bars\" or \"data\" key",
        ALPHA_VANTAGE_DAILY_KEY
    )))
}

/// Whether the first non-whitespace byte opens a JSON array or object.
fn looks_like_json(path: &Path) -> Result<bool, LoadError> {
    for byte in BufReader::new(open(path)?).bytes() {
        let byte = byte.map_err(|e| LoadError::ReadError(e.to_string()))?;
        if !byte.is_ascii_whitespace() {
            return Ok(matches!(byte, b'[' | b'{'));
        }
    }
    Ok(false)
}

/// Load bars from file (format chosen by extension, else by content).
pub fn load_bars(path: &Path) -> Result<Vec<PriceBar>, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "csv" => load_csv_bars(path),
        "json" => load_json_bars(path),
        _ if looks_like_json(path)? => load_json_bars(path),
        _ => load_csv_bars(path),
    }
}

/// Load a price series, oldest bar first.
///
/// Files may list bars in any order (Alpha Vantage lists newest first);
/// duplicate dates are rejected by series validation.
pub fn load_series(path: &Path, symbol: &str) -> Result<PriceSeries, LoadError> {
    let mut bars = load_bars(path)?;
    if bars.is_empty() {
        return Err(LoadError::NoData(path.display().to_string()));
    }
    bars.sort_by_key(|b| b.date);

    let series = PriceSeries::new(symbol, bars)?;
    tracing::debug!(
        symbol,
        bars = series.len(),
        path = %path.display(),
        "loaded price series"
    );
    Ok(series)
}

/// Symbol derived from the file stem (`data/aapl.csv` -> `AAPL`).
pub fn symbol_from_path(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_uppercase())
        .unwrap_or_else(|| "UNKNOWN".to_string())
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|e| LoadError::FileNotFound {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}
