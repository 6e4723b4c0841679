//! Volatility and historical Value-at-Risk.

use crate::domain::error::AnalyticsError;
use crate::domain::returns::ReturnSeries;
use crate::domain::series::{mean, population_stddev};
use serde::Serialize;

pub const DEFAULT_CONFIDENCE: f64 = 0.95;
pub const DEFAULT_VOLATILITY_WINDOW: usize = 20;

pub const DEFAULT_CORRELATION_LOOKBACK: usize = 30;

/// Parameters of a risk run. `risk_free_rate` is annual.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskSettings {
    pub confidence: f64,
    pub volatility_window: usize,
    pub correlation_lookback: usize,
    pub risk_free_rate: f64,
    pub benchmark: Option<String>,
}

impl Default for RiskSettings {
    fn default() -> Self {
        Self {
            confidence: DEFAULT_CONFIDENCE,
            volatility_window: DEFAULT_VOLATILITY_WINDOW,
            correlation_lookback: DEFAULT_CORRELATION_LOOKBACK,
            risk_free_rate: crate::domain::metrics::DEFAULT_RISK_FREE_RATE,
            benchmark: None,
        }
    }
}

/// Absorbs representation error in `(1 - confidence) * n` so that, e.g.,
/// 0.90 over 10 returns lands on index 1 rather than 0.
const INDEX_TOLERANCE: f64 = 1e-9;

/// Population stddev over each sliding window of `window` returns.
///
/// Output length is `len - window + 1`. When the window covers the whole
/// series or more, a single full-series value is returned.
pub fn rolling_volatility(returns: &[f64], window: usize) -> Result<Vec<f64>, AnalyticsError> {
    if window == 0 {
        return Err(AnalyticsError::invalid_parameter(
            "volatility_window",
            "must be positive",
        ));
    }
    if returns.is_empty() {
        return Err(AnalyticsError::insufficient_data("rolling volatility", 0, 1));
    }
    if window >= returns.len() {
        return Ok(population_stddev(returns).into_iter().collect());
    }
    Ok(returns
        .windows(window)
        .filter_map(population_stddev)
        .collect())
}

pub fn validate_confidence(confidence: f64) -> Result<(), AnalyticsError> {
    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(AnalyticsError::invalid_parameter(
            "confidence",
            format!("must be in (0, 1), got {}", confidence),
        ));
    }
    Ok(())
}

/// Historical VaR and CVaR.
///
/// Sorts ascending, takes `index = floor((1 - confidence) * n)`;
/// VaR = sorted[index], CVaR = mean(sorted[0..=index]).
pub fn historical_var(returns: &[f64], confidence: f64) -> Result<(f64, f64), AnalyticsError> {
    validate_confidence(confidence)?;
    if returns.is_empty() {
        return Err(AnalyticsError::insufficient_data("value at risk", 0, 1));
    }

    let mut sorted = returns.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    let raw = ((1.0 - confidence) * n as f64 + INDEX_TOLERANCE).floor() as usize;
    let index = raw.min(n - 1);

    let var = sorted[index];
    let cvar = mean(&sorted[..=index]).unwrap_or(var);
    Ok((var, cvar))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskSummary {
    pub symbol: String,
    pub confidence: f64,
    pub volatility: f64,
    pub var: f64,
    pub cvar: f64,
}

impl RiskSummary {
    pub fn compute(returns: &ReturnSeries, confidence: f64) -> Result<Self, AnalyticsError> {
        let (var, cvar) = historical_var(&returns.values, confidence)?;
        let volatility = population_stddev(&returns.values).unwrap_or(0.0);
        Ok(Self {
            symbol: returns.symbol.clone(),
            confidence,
            volatility,
            var,
            cvar,
        })
    }
}
