//! Bollinger Bands indicator.
//!
//! Bollinger Bands consist of:
//! - Middle: Simple Moving Average (SMA) over n periods
//! - Upper: Middle + (k × StdDev)
//! - Lower: Middle - (k × StdDev)
//!
//! Where StdDev is population standard deviation (divides by N, not N-1).
//!
//! Default parameters: period=20, k=2.0
//! Warmup: first (period-1) bars are undefined.

use crate::domain::error::AnalyticsError;
use crate::domain::indicator::sma::sma;
use crate::domain::indicator::{require_period, IndicatorSeries, IndicatorType};
use crate::domain::ohlcv::PriceBar;
use crate::domain::series::{population_stddev, rolling_window};
use serde::Serialize;

pub const DEFAULT_PERIOD: usize = 20;
pub const DEFAULT_K: f64 = 2.0;

#[derive(Debug, Clone, Serialize)]
pub struct BollingerBands {
    pub upper: IndicatorSeries,
    pub middle: IndicatorSeries,
    pub lower: IndicatorSeries,
}

pub fn calculate_bollinger(
    bars: &[PriceBar],
    period: usize,
    k: f64,
) -> Result<BollingerBands, AnalyticsError> {
    require_period("bollinger.period", period)?;
    if !(k.is_finite() && k > 0.0) {
        return Err(AnalyticsError::invalid_parameter(
            "bollinger.k",
            format!("must be a positive number, got {}", k),
        ));
    }

    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let middle = sma(&closes, period);
    let widths = rolling_window(&closes, period, |w| population_stddev(w).map(|sd| k * sd));

    let upper = middle
        .iter()
        .zip(&widths)
        .map(|(m, w)| Some((*m)? + (*w)?))
        .collect();
    let lower = middle
        .iter()
        .zip(&widths)
        .map(|(m, w)| Some((*m)? - (*w)?))
        .collect();

    let k_bits = k.to_bits();
    Ok(BollingerBands {
        upper: IndicatorSeries::from_values(
            IndicatorType::BollingerUpper { period, k_bits },
            bars,
            upper,
        ),
        middle: IndicatorSeries::from_values(IndicatorType::BollingerMiddle(period), bars, middle),
        lower: IndicatorSeries::from_values(
            IndicatorType::BollingerLower { period, k_bits },
            bars,
            lower,
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::test_support::make_bars;
    use approx::assert_relative_eq;

    #[test]
    fn bollinger_warmup() {
        let bars = make_bars(&[10.0, 20.0, 30.0, 40.0, 50.0]);
        let bands = calculate_bollinger(&bars, 3, 2.0).unwrap();

        for series in [&bands.upper, &bands.middle, &bands.lower] {
            assert!(!series.points[0].is_defined());
            assert!(!series.points[1].is_defined());
            assert!(series.points[2].is_defined());
        }
    }

    #[test]
    fn bollinger_constant_values_collapse() {
        let bars = make_bars(&[100.0; 5]);
        let bands = calculate_bollinger(&bars, 3, 2.0).unwrap();

        assert_relative_eq!(bands.middle.value_at(2).unwrap(), 100.0);
        assert_relative_eq!(bands.upper.value_at(2).unwrap(), 100.0);
        assert_relative_eq!(bands.lower.value_at(2).unwrap(), 100.0);
    }

    #[test]
    fn bollinger_basic_calculation() {
        let bars = make_bars(&[10.0, 20.0, 30.0]);
        let bands = calculate_bollinger(&bars, 3, 2.0).unwrap();

        let middle: f64 = 20.0;
        let stddev = (200.0_f64 / 3.0).sqrt();
        assert_relative_eq!(bands.middle.value_at(2).unwrap(), middle, epsilon = 1e-10);
        assert_relative_eq!(
            bands.upper.value_at(2).unwrap(),
            middle + 2.0 * stddev,
            epsilon = 1e-10
        );
        assert_relative_eq!(
            bands.lower.value_at(2).unwrap(),
            middle - 2.0 * stddev,
            epsilon = 1e-10
        );
    }

    #[test]
    fn bollinger_bands_are_ordered_and_symmetric() {
        let bars = make_bars(&[10.0, 12.0, 9.0, 15.0, 11.0, 13.0, 8.0]);
        let bands = calculate_bollinger(&bars, 4, 1.5).unwrap();

        for i in 3..bars.len() {
            let u = bands.upper.value_at(i).unwrap();
            let m = bands.middle.value_at(i).unwrap();
            let l = bands.lower.value_at(i).unwrap();
            assert!(u >= m && m >= l);
            assert_relative_eq!(u - m, m - l, epsilon = 1e-10);
        }
    }

    #[test]
    fn bollinger_indicator_types() {
        let bars = make_bars(&[10.0, 20.0, 30.0]);
        let bands = calculate_bollinger(&bars, 20, 2.0).unwrap();
        assert_eq!(
            bands.upper.indicator_type,
            IndicatorType::BollingerUpper {
                period: 20,
                k_bits: 2.0f64.to_bits()
            }
        );
        assert_eq!(bands.middle.indicator_type, IndicatorType::BollingerMiddle(20));
    }

    #[test]
    fn bollinger_rejects_non_positive_k() {
        let bars = make_bars(&[10.0, 20.0, 30.0]);
        assert!(calculate_bollinger(&bars, 3, 0.0).is_err());
        assert!(calculate_bollinger(&bars, 3, -1.0).is_err());
        assert!(calculate_bollinger(&bars, 3, f64::NAN).is_err());
        assert!(calculate_bollinger(&bars, 0, 2.0).is_err());
    }
}
