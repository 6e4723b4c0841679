//! Simple returns and their descriptive statistics.

use crate::domain::error::AnalyticsError;
use crate::domain::ohlcv::PriceSeries;
use crate::domain::series::{mean, population_stddev};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::HashMap;

/// r[t] = (p[t] - p[t-1]) / p[t-1], one shorter than the price series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnSeries {
    pub symbol: String,
    pub timestamps: Vec<NaiveDateTime>,
    pub values: Vec<f64>,
}

impl ReturnSeries {
    /// Returns of the series' closes, stamped with the later bar of each pair.
    pub fn from_series(series: &PriceSeries) -> Result<Self, AnalyticsError> {
        let values = simple_returns(series.symbol(), &series.closes())?;
        let timestamps = series.bars().iter().skip(1).map(|b| b.timestamp).collect();
        Ok(Self {
            symbol: series.symbol().to_string(),
            timestamps,
            values,
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The trailing `lookback` returns, or all of them if fewer exist.
    pub fn tail(&self, lookback: usize) -> &[f64] {
        let start = self.values.len().saturating_sub(lookback);
        &self.values[start..]
    }
}

/// Returns of two series over the timestamps both carry.
///
/// Closes are matched by timestamp first, so a bar missing from one side
/// widens the other side's return to the same interval. Fewer than two
/// shared timestamps give two empty series.
pub fn aligned_returns(
    a: &PriceSeries,
    b: &PriceSeries,
) -> Result<(ReturnSeries, ReturnSeries), AnalyticsError> {
    let b_index: HashMap<NaiveDateTime, f64> =
        b.bars().iter().map(|bar| (bar.timestamp, bar.close)).collect();

    let mut timestamps = Vec::new();
    let mut a_closes = Vec::new();
    let mut b_closes = Vec::new();
    for bar in a.bars() {
        if let Some(&close) = b_index.get(&bar.timestamp) {
            timestamps.push(bar.timestamp);
            a_closes.push(bar.close);
            b_closes.push(close);
        }
    }
    let stamps: Vec<NaiveDateTime> = timestamps.into_iter().skip(1).collect();

    Ok((
        ReturnSeries {
            symbol: a.symbol().to_string(),
            timestamps: stamps.clone(),
            values: simple_returns(a.symbol(), &a_closes)?,
        },
        ReturnSeries {
            symbol: b.symbol().to_string(),
            timestamps: stamps,
            values: simple_returns(b.symbol(), &b_closes)?,
        },
    ))
}

pub fn simple_returns(symbol: &str, prices: &[f64]) -> Result<Vec<f64>, AnalyticsError> {
    prices
        .windows(2)
        .enumerate()
        .map(|(i, w)| {
            if w[0] == 0.0 {
                Err(AnalyticsError::UndefinedReturn {
                    symbol: symbol.to_string(),
                    index: i + 1,
                })
            } else {
                Ok((w[1] - w[0]) / w[0])
            }
        })
        .collect()
}

/// Mean, population stddev, and the box-plot five-number summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnStats {
    pub mean: f64,
    pub stddev: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl ReturnStats {
    pub fn compute(returns: &[f64]) -> Result<Self, AnalyticsError> {
        let (Some(m), Some(sd)) = (mean(returns), population_stddev(returns)) else {
            return Err(AnalyticsError::insufficient_data("return statistics", 0, 1));
        };

        let mut sorted = returns.to_vec();
        sorted.sort_by(f64::total_cmp);

        Ok(Self {
            mean: m,
            stddev: sd,
            min: sorted[0],
            q1: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q3: quantile(&sorted, 0.75),
            max: sorted[sorted.len() - 1],
        })
    }
}

/// Linear-interpolated quantile of an ascending, non-empty slice.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::test_support::make_bars;
    use approx::assert_relative_eq;

    fn series(symbol: &str, prices: &[f64]) -> PriceSeries {
        PriceSeries::new(symbol, make_bars(prices)).unwrap()
    }

    #[test]
    fn returns_of_known_prices() {
        let r = simple_returns("X", &[100.0, 110.0, 99.0]).unwrap();
        assert_eq!(r.len(), 2);
        assert_relative_eq!(r[0], 0.10, epsilon = 1e-12);
        assert_relative_eq!(r[1], -0.10, epsilon = 1e-12);
    }

    #[test]
    fn returns_reject_zero_previous_price() {
        let err = simple_returns("X", &[10.0, 0.0, 5.0]).unwrap_err();
        assert!(matches!(err, AnalyticsError::UndefinedReturn { index: 2, .. }));
    }

    #[test]
    fn returns_of_single_price_are_empty() {
        assert!(simple_returns("X", &[10.0]).unwrap().is_empty());
        assert!(simple_returns("X", &[]).unwrap().is_empty());
    }

    #[test]
    fn tail_limits_lookback() {
        let r = ReturnSeries::from_series(&series("X", &[1.0, 2.0, 4.0, 8.0])).unwrap();
        assert_eq!(r.tail(2), &[1.0, 1.0]);
        assert_eq!(r.tail(10).len(), 3);
        assert_eq!(r.timestamps.len(), r.values.len());
    }

    #[test]
    fn aligned_returns_skip_missing_bar() {
        let a = series("A", &[100.0, 110.0, 121.0, 133.1]);
        let mut bars = make_bars(&[100.0, 110.0, 121.0, 133.1]);
        bars.remove(2);
        let b = PriceSeries::new("B", bars).unwrap();

        let (ra, rb) = aligned_returns(&a, &b).unwrap();
        assert_eq!(ra.len(), 2);
        assert_eq!(ra.timestamps, rb.timestamps);
        assert_eq!(ra.timestamps, vec![a.bars()[1].timestamp, a.bars()[3].timestamp]);
        for (x, y) in ra.values.iter().zip(&rb.values) {
            assert_relative_eq!(*x, *y, epsilon = 1e-12);
        }
        assert_relative_eq!(ra.values[1], 0.21, epsilon = 1e-12);
    }

    #[test]
    fn aligned_returns_of_disjoint_dates_are_empty() {
        let a = series("A", &[1.0, 2.0, 3.0]);
        let mut late = make_bars(&[1.0, 2.0, 3.0]);
        for bar in &mut late {
            bar.timestamp += chrono::Duration::days(30);
        }
        let b = PriceSeries::new("B", late).unwrap();

        let (ra, rb) = aligned_returns(&a, &b).unwrap();
        assert!(ra.is_empty());
        assert!(rb.is_empty());
    }

    #[test]
    fn stats_five_number_summary() {
        let stats = ReturnStats::compute(&[0.05, -0.02, 0.01, 0.03, -0.04]).unwrap();
        assert_relative_eq!(stats.min, -0.04);
        assert_relative_eq!(stats.q1, -0.02);
        assert_relative_eq!(stats.median, 0.01);
        assert_relative_eq!(stats.q3, 0.03);
        assert_relative_eq!(stats.max, 0.05);
        assert_relative_eq!(stats.mean, 0.006, epsilon = 1e-12);
    }

    #[test]
    fn stats_interpolates_quartiles() {
        let stats = ReturnStats::compute(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_relative_eq!(stats.q1, 1.75);
        assert_relative_eq!(stats.median, 2.5);
        assert_relative_eq!(stats.q3, 3.25);
    }

    #[test]
    fn stats_empty_is_insufficient() {
        assert!(matches!(
            ReturnStats::compute(&[]),
            Err(AnalyticsError::InsufficientData { .. })
        ));
    }
}
