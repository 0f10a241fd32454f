//! Historical Value-at-Risk and Conditional VaR.

use risk_spi::{Result, RiskError};

// Absorbs representation error in (1 - confidence) * n, e.g. (1 - 0.9) * 10.
const TAIL_INDEX_EPSILON: f64 = 1e-9;

/// VaR and CVaR as positive loss percentages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TailRisk {
    pub value_at_risk: f64,
    pub conditional_var: f64,
}

/// Position of the VaR quantile in ascending sorted returns:
/// `floor((1 - confidence) * n)`.
///
/// The product is nudged by `TAIL_INDEX_EPSILON` before flooring, so
/// `(confidence = 0.9, n = 10)` gives index 1 here while a plain f64
/// `((1.0 - 0.9) * 10.0).floor()` gives 0.
pub fn tail_index(observations: usize, confidence: f64) -> usize {
    ((1.0 - confidence) * observations as f64 + TAIL_INDEX_EPSILON).floor() as usize
}

fn check_inputs(returns: &[f64], confidence: f64) -> Result<()> {
    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(RiskError::invalid_parameter(
            "confidence",
            format!("must be in (0, 1), got {}", confidence),
        ));
    }
    if returns.is_empty() {
        return Err(RiskError::InsufficientData {
            required: 1,
            got: 0,
        });
    }
    Ok(())
}

fn sorted(returns: &[f64]) -> Vec<f64> {
    let mut sorted = returns.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// Historical VaR: `-sorted[index] * 100`.
pub fn value_at_risk(returns: &[f64], confidence: f64) -> Result<f64> {
    check_inputs(returns, confidence)?;
    let sorted = sorted(returns);
    let index = tail_index(sorted.len(), confidence).min(sorted.len() - 1);
    Ok(-sorted[index] * 100.0)
}

/// Expected shortfall: `-mean(sorted[..index]) * 100`.
///
/// Fails with `InsufficientTailData` when the tail is empty.
pub fn conditional_var(returns: &[f64], confidence: f64) -> Result<f64> {
    tail_risk(returns, confidence).map(|t| t.conditional_var)
}

/// VaR and CVaR from a single sort of the returns.
pub fn tail_risk(returns: &[f64], confidence: f64) -> Result<TailRisk> {
    check_inputs(returns, confidence)?;
    let sorted = sorted(returns);
    let index = tail_index(sorted.len(), confidence).min(sorted.len() - 1);

    if index == 0 {
        return Err(RiskError::InsufficientTailData {
            observations: sorted.len(),
            confidence,
        });
    }

    let tail = &sorted[..index];
    let tail_mean = tail.iter().sum::<f64>() / tail.len() as f64;

    Ok(TailRisk {
        value_at_risk: -sorted[index] * 100.0,
        conditional_var: -tail_mean * 100.0,
    })
}
