//! Daily price bar and price series models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RiskError};

/// One trading day's OHLCV record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// Trading date (ordering key)
    pub date: NaiveDate,
    /// Opening price
    pub open: f64,
    /// Highest price
    pub high: f64,
    /// Lowest price
    pub low: f64,
    /// Closing price, always positive
    pub close: f64,
    /// Traded volume
    pub volume: f64,
}

impl PriceBar {
    /// Create a new PriceBar.
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Bar whose open, high, low and close all equal `close`.
    pub fn from_close(date: NaiveDate, close: f64) -> Self {
        Self::new(date, close, close, close, close, 0.0)
    }

    fn validate(&self, index: usize) -> Result<()> {
        if !self.close.is_finite() || self.close <= 0.0 {
            return Err(RiskError::InvalidBar {
                index,
                reason: format!("close must be positive and finite, got {}", self.close),
            });
        }
        let fields = [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("volume", self.volume),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(RiskError::InvalidBar {
                    index,
                    reason: format!("{} must be non-negative and finite, got {}", name, value),
                });
            }
        }
        Ok(())
    }
}

/// Ordered daily price history for one symbol, oldest bar first.
///
/// Construction guarantees positive closes and strictly increasing dates,
/// so downstream stages can divide by closes and pair bars by index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    symbol: String,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Create a validated series.
    pub fn new(symbol: impl Into<String>, bars: Vec<PriceBar>) -> Result<Self> {
        for (index, bar) in bars.iter().enumerate() {
            bar.validate(index)?;
        }
        if let Some(index) = bars.windows(2).position(|w| w[1].date <= w[0].date) {
            return Err(RiskError::InvalidBar {
                index: index + 1,
                reason: format!(
                    "date {} does not follow {}",
                    bars[index + 1].date,
                    bars[index].date
                ),
            });
        }
        Ok(Self {
            symbol: symbol.into(),
            bars,
        })
    }

    /// Build a series from `(date, close)` pairs.
    pub fn from_closes(
        symbol: impl Into<String>,
        closes: impl IntoIterator<Item = (NaiveDate, f64)>,
    ) -> Result<Self> {
        let bars = closes
            .into_iter()
            .map(|(date, close)| PriceBar::from_close(date, close))
            .collect();
        Self::new(symbol, bars)
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Closing prices, oldest first.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Trading dates, oldest first.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.date).collect()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.bars.first().map(|b| b.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.bars.last().map(|b| b.date)
    }

    pub fn last_close(&self) -> Option<f64> {
        self.bars.last().map(|b| b.close)
    }

    /// The most recent `n` bars (the whole series when shorter).
    pub fn trailing(&self, n: usize) -> Self {
        let start = self.bars.len().saturating_sub(n);
        Self {
            symbol: self.symbol.clone(),
            bars: self.bars[start..].to_vec(),
        }
    }

    /// Restrict both series to the trading dates they have in common.
    ///
    /// The returned pair shares exactly the same dates in the same order.
    pub fn align_with(&self, other: &PriceSeries) -> (PriceSeries, PriceSeries) {
        let mut left = Vec::new();
        let mut right = Vec::new();
        let (mut i, mut j) = (0, 0);

        while i < self.bars.len() && j < other.bars.len() {
            let (a, b) = (&self.bars[i], &other.bars[j]);
            match a.date.cmp(&b.date) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    left.push(*a);
                    right.push(*b);
                    i += 1;
                    j += 1;
                }
            }
        }

        (
            Self {
                symbol: self.symbol.clone(),
                bars: left,
            },
            Self {
                symbol: other.symbol.clone(),
                bars: right,
            },
        )
    }

    /// Index of the first bar whose date differs from `other`'s bar at the
    /// same position, comparing over the shorter length.
    pub fn first_date_mismatch(&self, other: &PriceSeries) -> Option<usize> {
        self.bars
            .iter()
            .zip(other.bars.iter())
            .position(|(a, b)| a.date != b.date)
    }
}
