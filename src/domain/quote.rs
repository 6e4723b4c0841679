//! Latest-bar quote summary for a loaded series.

use crate::domain::error::AnalyticsError;
use crate::domain::ohlcv::PriceSeries;
use crate::domain::series::safe_div;
use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteSummary {
    pub symbol: String,
    pub timestamp: NaiveDateTime,
    pub last_price: f64,
    pub open: f64,
    pub day_high: f64,
    pub day_low: f64,
    pub volume: f64,
    /// close - open of the last bar.
    pub change: f64,
    /// Percent change against the open; undefined when the open is zero.
    pub change_pct: Option<f64>,
    pub period_high: f64,
    pub period_low: f64,
}

impl QuoteSummary {
    pub fn from_series(series: &PriceSeries) -> Result<Self, AnalyticsError> {
        let last = series
            .last()
            .ok_or_else(|| AnalyticsError::insufficient_data(format!("quote for {}", series.symbol()), 0, 1))?;

        let change = last.close - last.open;
        let period_high = series.bars().iter().map(|b| b.high).fold(f64::MIN, f64::max);
        let period_low = series.bars().iter().map(|b| b.low).fold(f64::MAX, f64::min);

        Ok(Self {
            symbol: series.symbol().to_string(),
            timestamp: last.timestamp,
            last_price: last.close,
            open: last.open,
            day_high: last.high,
            day_low: last.low,
            volume: last.volume,
            change,
            change_pct: safe_div(change * 100.0, last.open),
            period_high,
            period_low,
        })
    }
}
