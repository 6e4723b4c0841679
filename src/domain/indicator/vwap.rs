//! Volume Weighted Average Price, cumulative from the first bar.
//!
//! VWAP[i] = sum(TP[0..=i] * V[0..=i]) / sum(V[0..=i]) with TP = (O+H+L+C)/4.
//! While cumulative volume is zero the bar's own typical price is used.

use crate::domain::indicator::{IndicatorSeries, IndicatorType};
use crate::domain::ohlcv::PriceBar;
use crate::domain::series::safe_div;

pub fn calculate_vwap(bars: &[PriceBar]) -> IndicatorSeries {
    let mut cumulative_tpv = 0.0;
    let mut cumulative_volume = 0.0;

    let values = bars
        .iter()
        .map(|bar| {
            let tp = bar.typical_price();
            cumulative_tpv += tp * bar.volume;
            cumulative_volume += bar.volume;
            Some(safe_div(cumulative_tpv, cumulative_volume).unwrap_or(tp))
        })
        .collect();

    IndicatorSeries::from_values(IndicatorType::Vwap, bars, values)
}
