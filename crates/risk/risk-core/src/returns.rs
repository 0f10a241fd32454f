//! Daily return and drawdown extraction.

use risk_spi::{PriceSeries, Result, RiskError};

/// Minimum number of bars needed to derive one return.
pub const MIN_BARS: usize = 2;

/// Daily returns and drawdowns of one series, index-aligned.
///
/// Both vectors hold `n - 1` entries for `n` bars: entry `i` describes
/// bar `i + 1`. The first bar only seeds the running peak.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnProfile {
    pub returns: Vec<f64>,
    pub drawdowns: Vec<f64>,
}

impl ReturnProfile {
    /// Drawdown of the most recent bar, as a fraction.
    pub fn yesterday_drawdown(&self) -> f64 {
        self.drawdowns.last().copied().unwrap_or(0.0)
    }

    /// Deepest drawdown, as a (zero or negative) fraction.
    pub fn max_drawdown(&self) -> f64 {
        self.drawdowns.iter().copied().fold(0.0, f64::min)
    }

    pub fn len(&self) -> usize {
        self.returns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.returns.is_empty()
    }
}

/// Calculate simple daily returns from closing prices.
pub fn daily_returns(closes: &[f64]) -> Vec<f64> {
    if closes.len() < MIN_BARS {
        return Vec::new();
    }
    closes.windows(2).map(|w| (w[1] - w[0]) / w[0]).collect()
}

/// Calculate drawdowns from the running peak close.
///
/// A new high resets the drawdown to zero; otherwise the drawdown is
/// `(close - peak) / peak`.
pub fn drawdowns(closes: &[f64]) -> Vec<f64> {
    let Some((&first, rest)) = closes.split_first() else {
        return Vec::new();
    };

    let mut peak = first;
    rest.iter()
        .map(|&close| {
            if close > peak {
                peak = close;
                0.0
            } else {
                (close - peak) / peak
            }
        })
        .collect()
}

/// Extract returns and drawdowns from closing prices.
pub fn extract_closes(closes: &[f64]) -> Result<ReturnProfile> {
    if closes.len() < MIN_BARS {
        return Err(RiskError::InsufficientData {
            required: MIN_BARS,
            got: closes.len(),
        });
    }
    Ok(ReturnProfile {
        returns: daily_returns(closes),
        drawdowns: drawdowns(closes),
    })
}

/// Extract returns and drawdowns from a price series.
pub fn extract(series: &PriceSeries) -> Result<ReturnProfile> {
    extract_closes(&series.closes())
}
