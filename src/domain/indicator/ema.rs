//! Exponential Moving Average indicator.
//!
//! k = 2/(n+1), seeded with the first close, then EMA[i] = C[i]*k + EMA[i-1]*(1-k).
//! The recursion runs from the first bar; the first (n-1) points are
//! reported undefined as warmup.

use crate::domain::error::AnalyticsError;
use crate::domain::indicator::{require_period, IndicatorSeries, IndicatorType};
use crate::domain::ohlcv::PriceBar;

pub fn calculate_ema(bars: &[PriceBar], period: usize) -> Result<IndicatorSeries, AnalyticsError> {
    require_period("ema.period", period)?;
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    Ok(IndicatorSeries::from_values(
        IndicatorType::Ema(period),
        bars,
        ema(&closes, period),
    ))
}

pub fn smoothing_factor(period: usize) -> f64 {
    2.0 / (period as f64 + 1.0)
}

/// Unmasked recursion seeded with `values[0]`; every index is populated.
pub fn ema_recursive(values: &[f64], period: usize) -> Vec<f64> {
    let k = smoothing_factor(period);
    let mut out = Vec::with_capacity(values.len());
    let mut prev: Option<f64> = None;

    for &v in values {
        let next = match prev {
            None => v,
            Some(e) => v * k + e * (1.0 - k),
        };
        out.push(next);
        prev = Some(next);
    }
    out
}

/// EMA with the warmup region masked.
pub fn ema(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let warmup = period.saturating_sub(1);
    ema_recursive(values, period)
        .into_iter()
        .enumerate()
        .map(|(i, v)| if i < warmup { None } else { Some(v) })
        .collect()
}

/// EMA over a series whose leading points may be undefined.
///
/// The recursion is seeded with the first defined value and requires the
/// remainder to be contiguous; a later gap ends the output.
pub fn ema_defined(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    let Some(start) = values.iter().position(Option::is_some) else {
        return out;
    };

    let tail: Vec<f64> = values[start..].iter().map_while(|v| *v).collect();
    for (offset, v) in ema(&tail, period).into_iter().enumerate() {
        out[start + offset] = v;
    }
    out
}
