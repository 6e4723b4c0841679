//! Williams %R.
//!
//! %R = -100 * (HH(n) - C) / (HH(n) - LL(n)), in [-100, 0].
//! Undefined during warmup and for zero-range windows.

use crate::domain::error::AnalyticsError;
use crate::domain::indicator::{require_period, IndicatorSeries, IndicatorType};
use crate::domain::ohlcv::PriceBar;
use crate::domain::series::{highest, lowest, safe_div};

pub const DEFAULT_PERIOD: usize = 14;

pub fn calculate_williams_r(
    bars: &[PriceBar],
    period: usize,
) -> Result<IndicatorSeries, AnalyticsError> {
    require_period("williams_r.period", period)?;

    let values = (0..bars.len())
        .map(|i| {
            if i + 1 < period {
                return None;
            }
            let window = &bars[i + 1 - period..=i];
            let highs: Vec<f64> = window.iter().map(|b| b.high).collect();
            let lows: Vec<f64> = window.iter().map(|b| b.low).collect();
            let hh = highest(&highs)?;
            let ll = lowest(&lows)?;
            safe_div(-100.0 * (hh - bars[i].close), hh - ll).map(|v| v.clamp(-100.0, 0.0))
        })
        .collect();

    Ok(IndicatorSeries::from_values(
        IndicatorType::Williams(period),
        bars,
        values,
    ))
}
