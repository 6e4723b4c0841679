//! Stochastic oscillator.
//!
//! %K = 100 * (C - LL(k)) / (HH(k) - LL(k)), %D = SMA(%K, d).
//! A zero-range window (HH == LL) leaves %K undefined, and every %D window
//! that contains it is undefined as well.

use crate::domain::error::AnalyticsError;
use crate::domain::indicator::sma::sma_defined;
use crate::domain::indicator::{require_period, IndicatorSeries, IndicatorType};
use crate::domain::ohlcv::PriceBar;
use crate::domain::series::{highest, lowest, safe_div};
use serde::Serialize;

pub const DEFAULT_K_PERIOD: usize = 14;
pub const DEFAULT_D_PERIOD: usize = 3;

#[derive(Debug, Clone, Serialize)]
pub struct StochasticSeries {
    pub k: IndicatorSeries,
    pub d: IndicatorSeries,
}

pub fn calculate_stochastic(
    bars: &[PriceBar],
    k_period: usize,
    d_period: usize,
) -> Result<StochasticSeries, AnalyticsError> {
    require_period("stochastic.k_period", k_period)?;
    require_period("stochastic.d_period", d_period)?;

    let k = percent_k(bars, k_period);
    let d = sma_defined(&k, d_period);

    Ok(StochasticSeries {
        k: IndicatorSeries::from_values(IndicatorType::StochasticK(k_period), bars, k),
        d: IndicatorSeries::from_values(
            IndicatorType::StochasticD { k_period, d_period },
            bars,
            d,
        ),
    })
}

fn percent_k(bars: &[PriceBar], period: usize) -> Vec<Option<f64>> {
    let highs: Vec<f64> = bars.iter().map(|b| b.high).collect();
    let lows: Vec<f64> = bars.iter().map(|b| b.low).collect();

    (0..bars.len())
        .map(|i| {
            if i + 1 < period {
                return None;
            }
            let start = i + 1 - period;
            let hh = highest(&highs[start..=i])?;
            let ll = lowest(&lows[start..=i])?;
            safe_div(100.0 * (bars[i].close - ll), hh - ll).map(|v| v.clamp(0.0, 100.0))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::test_support::{make_bars, make_hlc_bars};
    use approx::assert_relative_eq;

    #[test]
    fn stochastic_known_values() {
        let bars = make_hlc_bars(&[
            (10.0, 8.0, 9.0),
            (12.0, 9.0, 11.0),
            (11.0, 7.0, 8.0),
            (13.0, 10.0, 13.0),
        ]);
        let stoch = calculate_stochastic(&bars, 3, 2).unwrap();

        assert!(!stoch.k.points[1].is_defined());
        // window 0..=2: HH 12, LL 7, C 8 -> 20
        assert_relative_eq!(stoch.k.value_at(2).unwrap(), 20.0, epsilon = 1e-12);
        // window 1..=3: HH 13, LL 7, C 13 -> 100
        assert_relative_eq!(stoch.k.value_at(3).unwrap(), 100.0, epsilon = 1e-12);
        assert!(!stoch.d.points[2].is_defined());
        assert_relative_eq!(stoch.d.value_at(3).unwrap(), 60.0, epsilon = 1e-12);
    }

    #[test]
    fn stochastic_flat_window_is_undefined() {
        let bars = make_bars(&[10.0, 10.0, 10.0, 10.0]);
        let stoch = calculate_stochastic(&bars, 3, 2).unwrap();
        assert!(stoch.k.points.iter().all(|p| !p.is_defined()));
        assert!(stoch.d.points.iter().all(|p| !p.is_defined()));
    }

    #[test]
    fn stochastic_degenerate_window_poisons_d() {
        let bars = make_hlc_bars(&[
            (10.0, 10.0, 10.0),
            (10.0, 10.0, 10.0),
            (12.0, 9.0, 11.0),
            (13.0, 10.0, 12.0),
            (14.0, 11.0, 13.0),
        ]);
        let stoch = calculate_stochastic(&bars, 2, 2).unwrap();
        assert!(!stoch.k.points[1].is_defined());
        assert!(stoch.k.points[2].is_defined());
        assert!(!stoch.d.points[2].is_defined());
        assert!(stoch.d.points[3].is_defined());
    }

    #[test]
    fn stochastic_rejects_zero_periods() {
        let bars = make_bars(&[1.0, 2.0]);
        assert!(calculate_stochastic(&bars, 0, 3).is_err());
        assert!(calculate_stochastic(&bars, 14, 0).is_err());
    }
}
