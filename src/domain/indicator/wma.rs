//! Weighted Moving Average indicator.
//!
//! WMA(n) = (1*P[i-n+1] + 2*P[i-n+2] + ... + n*P[i]) / (n*(n+1)/2)
//! Warmup: first (n-1) bars are undefined.

use crate::domain::error::AnalyticsError;
use crate::domain::indicator::{require_period, IndicatorSeries, IndicatorType};
use crate::domain::ohlcv::PriceBar;
use crate::domain::series::{rolling_defined, rolling_window, weighted_sum};

pub fn calculate_wma(bars: &[PriceBar], period: usize) -> Result<IndicatorSeries, AnalyticsError> {
    require_period("wma.period", period)?;
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    Ok(IndicatorSeries::from_values(
        IndicatorType::Wma(period),
        bars,
        wma(&closes, period),
    ))
}

/// Linear weights 1..=period, oldest first.
fn linear_weights(period: usize) -> Vec<f64> {
    (1..=period).map(|w| w as f64).collect()
}

fn weighted_average(window: &[f64], weights: &[f64], divisor: f64) -> Option<f64> {
    Some(weighted_sum(window, weights) / divisor)
}

pub fn wma(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let weights = linear_weights(period);
    let divisor = (period * (period + 1)) as f64 / 2.0;
    rolling_window(values, period, |w| weighted_average(w, &weights, divisor))
}

/// WMA over a partially-defined series; any undefined input in the window
/// makes that point undefined.
pub fn wma_defined(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    let weights = linear_weights(period);
    let divisor = (period * (period + 1)) as f64 / 2.0;
    rolling_defined(values, period, |w| weighted_average(w, &weights, divisor))
}
