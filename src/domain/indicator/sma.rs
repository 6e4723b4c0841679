//! Simple Moving Average indicator.
//!
//! SMA(n)[i] = mean(C[i-n+1..=i]). Warmup: first (n-1) bars are undefined.

use crate::domain::error::AnalyticsError;
use crate::domain::indicator::{require_period, IndicatorSeries, IndicatorType};
use crate::domain::ohlcv::PriceBar;
use crate::domain::series::{mean, rolling_defined, rolling_window};

pub fn calculate_sma(bars: &[PriceBar], period: usize) -> Result<IndicatorSeries, AnalyticsError> {
    require_period("sma.period", period)?;
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    Ok(IndicatorSeries::from_values(
        IndicatorType::Sma(period),
        bars,
        sma(&closes, period),
    ))
}

pub fn sma(values: &[f64], period: usize) -> Vec<Option<f64>> {
    rolling_window(values, period, mean)
}

/// SMA over a series that may already contain undefined points.
pub fn sma_defined(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    rolling_defined(values, period, mean)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::test_support::make_bars;
    use approx::assert_relative_eq;

    #[test]
    fn sma_known_values() {
        let bars = make_bars(&[10.0, 11.0, 12.0, 11.0, 10.0, 9.0, 10.0, 11.0, 12.0, 13.0]);
        let series = calculate_sma(&bars, 3).unwrap();

        assert_eq!(series.len(), 10);
        assert_eq!(series.value_at(0), None);
        assert_eq!(series.value_at(1), None);
        assert_relative_eq!(series.value_at(2).unwrap(), 11.0);
        assert_relative_eq!(series.value_at(3).unwrap(), 34.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn sma_period_1_is_identity() {
        let prices = [10.0, 20.5, 30.25];
        let bars = make_bars(&prices);
        let series = calculate_sma(&bars, 1).unwrap();
        for (i, p) in prices.iter().enumerate() {
            assert_eq!(series.value_at(i), Some(*p));
        }
    }

    #[test]
    fn sma_short_series_all_undefined() {
        let bars = make_bars(&[1.0, 2.0]);
        let series = calculate_sma(&bars, 5).unwrap();
        assert!(series.points.iter().all(|p| !p.is_defined()));
    }

    #[test]
    fn sma_period_0_rejected() {
        let bars = make_bars(&[1.0, 2.0]);
        assert!(matches!(
            calculate_sma(&bars, 0),
            Err(AnalyticsError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn sma_indicator_type() {
        let bars = make_bars(&[1.0]);
        let series = calculate_sma(&bars, 7).unwrap();
        assert_eq!(series.indicator_type, IndicatorType::Sma(7));
    }

    #[test]
    fn sma_defined_skips_gaps() {
        let out = sma_defined(&[None, Some(2.0), Some(4.0)], 2);
        assert_eq!(out, vec![None, None, Some(3.0)]);
    }
}
