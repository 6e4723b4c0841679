//! Hull Moving Average indicator.
//!
//! raw = 2*WMA(n/2) - WMA(n), HMA = WMA(raw, floor(sqrt(n))).
//! Undefined until all three stages are warmed up.

use crate::domain::error::AnalyticsError;
use crate::domain::indicator::wma::{wma, wma_defined};
use crate::domain::indicator::{IndicatorSeries, IndicatorType};
use crate::domain::ohlcv::PriceBar;

pub fn calculate_hma(bars: &[PriceBar], period: usize) -> Result<IndicatorSeries, AnalyticsError> {
    if period < 2 {
        return Err(AnalyticsError::invalid_parameter(
            "hma.period",
            "must be at least 2",
        ));
    }
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    Ok(IndicatorSeries::from_values(
        IndicatorType::Hma(period),
        bars,
        hma(&closes, period),
    ))
}

pub fn hma(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let half = wma(values, period / 2);
    let full = wma(values, period);

    let raw: Vec<Option<f64>> = half
        .iter()
        .zip(&full)
        .map(|(h, f)| Some(2.0 * (*h)? - (*f)?))
        .collect();

    wma_defined(&raw, integer_sqrt(period))
}

fn integer_sqrt(n: usize) -> usize {
    let mut root = (n as f64).sqrt() as usize;
    while root * root > n {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    root
}
