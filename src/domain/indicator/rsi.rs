//! RSI (Relative Strength Index) indicator.
//!
//! Uses a simple rolling mean of gains and losses over the last n price
//! changes (not Wilder's smoothing):
//!
//! Formula: RSI = 100 - (100 / (1 + avg_gain / avg_loss))
//! If avg_loss == 0: RSI = 100
//!
//! Warmup: first n bars are undefined (need n price changes).

use crate::domain::error::AnalyticsError;
use crate::domain::indicator::{require_period, IndicatorSeries, IndicatorType};
use crate::domain::ohlcv::PriceBar;
use crate::domain::series::{mean, rolling_defined, safe_div};

pub const DEFAULT_PERIOD: usize = 14;

pub fn calculate_rsi(bars: &[PriceBar], period: usize) -> Result<IndicatorSeries, AnalyticsError> {
    require_period("rsi.period", period)?;
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    Ok(IndicatorSeries::from_values(
        IndicatorType::Rsi(period),
        bars,
        rsi(&closes, period),
    ))
}

pub fn rsi(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut gains: Vec<Option<f64>> = Vec::with_capacity(values.len());
    let mut losses: Vec<Option<f64>> = Vec::with_capacity(values.len());

    for i in 0..values.len() {
        if i == 0 {
            gains.push(None);
            losses.push(None);
        } else {
            let change = values[i] - values[i - 1];
            gains.push(Some(change.max(0.0)));
            losses.push(Some((-change).max(0.0)));
        }
    }

    let avg_gain = rolling_defined(&gains, period, mean);
    let avg_loss = rolling_defined(&losses, period, mean);

    avg_gain
        .iter()
        .zip(&avg_loss)
        .map(|(g, l)| {
            let (g, l) = ((*g)?, (*l)?);
            Some(match safe_div(g, l) {
                Some(rs) => 100.0 - 100.0 / (1.0 + rs),
                None => 100.0,
            })
        })
        .collect()
}
