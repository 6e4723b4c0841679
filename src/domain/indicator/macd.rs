//! MACD (Moving Average Convergence Divergence) indicator.
//!
//! MACD Line = EMA(fast) - EMA(slow)
//! Signal Line = EMA(signal) of MACD Line
//! Histogram = MACD Line - Signal Line
//!
//! Both close EMAs are seeded with the first close. The line is defined once
//! the slow EMA is warmed up (slow - 1); the signal EMA is seeded with the
//! first defined line value, so the signal and histogram are defined from
//! slow - 1 + signal - 1.

use crate::domain::error::AnalyticsError;
use crate::domain::indicator::ema::{ema_defined, ema_recursive};
use crate::domain::indicator::{IndicatorSeries, IndicatorType};
use crate::domain::ohlcv::PriceBar;
use serde::Serialize;

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

#[derive(Debug, Clone, Serialize)]
pub struct MacdSeries {
    pub line: IndicatorSeries,
    pub signal: IndicatorSeries,
    pub histogram: IndicatorSeries,
}

pub fn validate_macd_params(fast: usize, slow: usize, signal: usize) -> Result<(), AnalyticsError> {
    if fast == 0 || slow == 0 || signal == 0 {
        return Err(AnalyticsError::invalid_parameter(
            "macd",
            "fast, slow and signal periods must be positive",
        ));
    }
    if fast >= slow {
        return Err(AnalyticsError::invalid_parameter(
            "macd",
            format!("fast ({}) must be less than slow ({})", fast, slow),
        ));
    }
    Ok(())
}

pub fn calculate_macd(
    bars: &[PriceBar],
    fast: usize,
    slow: usize,
    signal_period: usize,
) -> Result<MacdSeries, AnalyticsError> {
    validate_macd_params(fast, slow, signal_period)?;

    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let ema_fast = ema_recursive(&closes, fast);
    let ema_slow = ema_recursive(&closes, slow);

    let line: Vec<Option<f64>> = (0..closes.len())
        .map(|i| {
            if i + 1 < slow {
                None
            } else {
                Some(ema_fast[i] - ema_slow[i])
            }
        })
        .collect();
    let signal = ema_defined(&line, signal_period);
    let histogram = line
        .iter()
        .zip(&signal)
        .map(|(l, s)| Some((*l)? - (*s)?))
        .collect();

    Ok(MacdSeries {
        line: IndicatorSeries::from_values(IndicatorType::MacdLine { fast, slow }, bars, line),
        signal: IndicatorSeries::from_values(
            IndicatorType::MacdSignal {
                fast,
                slow,
                signal: signal_period,
            },
            bars,
            signal,
        ),
        histogram: IndicatorSeries::from_values(
            IndicatorType::MacdHistogram {
                fast,
                slow,
                signal: signal_period,
            },
            bars,
            histogram,
        ),
    })
}

pub fn calculate_macd_default(bars: &[PriceBar]) -> Result<MacdSeries, AnalyticsError> {
    calculate_macd(bars, DEFAULT_FAST, DEFAULT_SLOW, DEFAULT_SIGNAL)
}
