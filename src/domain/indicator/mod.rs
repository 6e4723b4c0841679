//! Technical indicator implementations.
//!
//! This module provides types for representing indicator values and series:
//! - `IndicatorPoint`: A single timestamped point, `None` while warming up
//! - `IndicatorType`: Enum for indicator identity + parameters (serves as HashMap key)
//! - `IndicatorSeries`: A time series of indicator values aligned with its bars
//!
//! Each indicator lives in its own module and exposes a `calculate_*`
//! function over bars plus, where other indicators build on it, a raw
//! function over `f64` slices.

pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod hma;
pub mod macd;
pub mod rsi;
pub mod sma;
pub mod stochastic;
pub mod vwap;
pub mod williams_r;
pub mod wma;

pub use atr::calculate_atr;
pub use bollinger::{calculate_bollinger, BollingerBands};
pub use ema::calculate_ema;
pub use hma::calculate_hma;
pub use macd::{calculate_macd, MacdSeries};
pub use rsi::calculate_rsi;
pub use sma::calculate_sma;
pub use stochastic::{calculate_stochastic, StochasticSeries};
pub use vwap::calculate_vwap;
pub use williams_r::calculate_williams_r;
pub use wma::calculate_wma;

use crate::domain::error::AnalyticsError;
use crate::domain::ohlcv::PriceBar;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndicatorPoint {
    pub timestamp: NaiveDateTime,
    pub value: Option<f64>,
}

impl IndicatorPoint {
    pub fn is_defined(&self) -> bool {
        self.value.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    Ema(usize),
    Wma(usize),
    Hma(usize),
    Vwap,
    Rsi(usize),
    Atr(usize),
    Williams(usize),
    MacdLine { fast: usize, slow: usize },
    MacdSignal { fast: usize, slow: usize, signal: usize },
    MacdHistogram { fast: usize, slow: usize, signal: usize },
    StochasticK(usize),
    StochasticD { k_period: usize, d_period: usize },
    /// `k_bits` holds `k.to_bits()`.
    BollingerUpper { period: usize, k_bits: u64 },
    BollingerMiddle(usize),
    BollingerLower { period: usize, k_bits: u64 },
}

#[derive(Debug, Clone, Serialize)]
pub struct IndicatorSeries {
    #[serde(rename = "name", serialize_with = "serialize_type")]
    pub indicator_type: IndicatorType,
    pub points: Vec<IndicatorPoint>,
}

fn serialize_type<S: serde::Serializer>(t: &IndicatorType, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(t)
}

impl IndicatorSeries {
    /// Zips raw values with the bars' timestamps. Lengths must match.
    pub fn from_values(
        indicator_type: IndicatorType,
        bars: &[PriceBar],
        values: Vec<Option<f64>>,
    ) -> Self {
        debug_assert_eq!(bars.len(), values.len());
        let points = bars
            .iter()
            .zip(values)
            .map(|(bar, value)| IndicatorPoint {
                timestamp: bar.timestamp,
                value,
            })
            .collect();
        Self {
            indicator_type,
            points,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn values(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn value_at(&self, index: usize) -> Option<f64> {
        self.points.get(index).and_then(|p| p.value)
    }

    /// Most recent defined value.
    pub fn last_defined(&self) -> Option<f64> {
        self.points.iter().rev().find_map(|p| p.value)
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
            IndicatorType::Ema(period) => write!(f, "EMA({})", period),
            IndicatorType::Wma(period) => write!(f, "WMA({})", period),
            IndicatorType::Hma(period) => write!(f, "HMA({})", period),
            IndicatorType::Vwap => write!(f, "VWAP"),
            IndicatorType::Rsi(period) => write!(f, "RSI({})", period),
            IndicatorType::Atr(period) => write!(f, "ATR({})", period),
            IndicatorType::Williams(period) => write!(f, "WILLIAMS_R({})", period),
            IndicatorType::MacdLine { fast, slow } => write!(f, "MACD({},{})", fast, slow),
            IndicatorType::MacdSignal { signal, .. } => write!(f, "MACD_SIGNAL({})", signal),
            IndicatorType::MacdHistogram { fast, slow, signal } => {
                write!(f, "MACD_HIST({},{},{})", fast, slow, signal)
            }
            IndicatorType::StochasticK(period) => write!(f, "STOCH_K({})", period),
            IndicatorType::StochasticD { k_period, d_period } => {
                write!(f, "STOCH_D({},{})", k_period, d_period)
            }
            IndicatorType::BollingerUpper { period, k_bits } => {
                write!(f, "BB_UPPER({},{})", period, f64::from_bits(*k_bits))
            }
            IndicatorType::BollingerMiddle(period) => write!(f, "BB_MIDDLE({})", period),
            IndicatorType::BollingerLower { period, k_bits } => {
                write!(f, "BB_LOWER({},{})", period, f64::from_bits(*k_bits))
            }
        }
    }
}

/// Rejects a zero period before any computation starts.
pub(crate) fn require_period(name: &str, period: usize) -> Result<(), AnalyticsError> {
    if period == 0 {
        return Err(AnalyticsError::invalid_parameter(name, "must be positive"));
    }
    Ok(())
}
