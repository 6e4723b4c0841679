//! Average True Range.
//!
//! TR[0] = H-L, TR[i] = max(H-L, |H-C[i-1]|, |L-C[i-1]|); ATR = SMA(n) of TR.

use crate::domain::error::AnalyticsError;
use crate::domain::indicator::sma::sma;
use crate::domain::indicator::{require_period, IndicatorSeries, IndicatorType};
use crate::domain::ohlcv::PriceBar;

pub fn calculate_atr(bars: &[PriceBar], period: usize) -> Result<IndicatorSeries, AnalyticsError> {
    require_period("atr.period", period)?;
    Ok(IndicatorSeries::from_values(
        IndicatorType::Atr(period),
        bars,
        sma(&true_ranges(bars), period),
    ))
}

pub fn true_ranges(bars: &[PriceBar]) -> Vec<f64> {
    bars.iter()
        .enumerate()
        .map(|(i, bar)| {
            if i == 0 {
                bar.high - bar.low
            } else {
                bar.true_range(bars[i - 1].close)
            }
        })
        .collect()
}
