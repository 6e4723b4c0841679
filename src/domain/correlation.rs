//! Pairwise Pearson correlation across symbols.

use crate::domain::error::AnalyticsError;
use crate::domain::ohlcv::PriceSeries;
use crate::domain::returns::{aligned_returns, ReturnSeries};
use crate::domain::series::mean;
use serde::Serialize;

/// Symmetric matrix indexed by `symbols`. Off-diagonal cells are `None`
/// when either series has zero variance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub symbols: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.symbols.iter().position(|s| s == a)?;
        let j = self.symbols.iter().position(|s| s == b)?;
        self.values[i][j]
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Correlates the trailing `lookback` returns of every series (all of them
/// when `lookback` is `None`). The windows must all have the same length.
pub fn correlation_matrix(
    series: &[ReturnSeries],
    lookback: Option<usize>,
) -> Result<CorrelationMatrix, AnalyticsError> {
    let windows: Vec<&[f64]> = series
        .iter()
        .map(|s| match lookback {
            Some(n) => s.tail(n),
            None => &s.values[..],
        })
        .collect();

    let Some(expected) = windows.first().map(|w| w.len()) else {
        return Ok(CorrelationMatrix {
            symbols: Vec::new(),
            values: Vec::new(),
        });
    };
    if expected == 0 {
        return Err(AnalyticsError::insufficient_data(
            format!("correlation of {}", series[0].symbol),
            0,
            1,
        ));
    }
    for (s, w) in series.iter().zip(&windows) {
        if w.len() != expected {
            return Err(AnalyticsError::MisalignedSeries {
                symbol: s.symbol.clone(),
                len: w.len(),
                expected,
            });
        }
    }

    let n = windows.len();
    let mut values = vec![vec![None; n]; n];
    for i in 0..n {
        values[i][i] = Some(1.0);
        for j in (i + 1)..n {
            let r = pearson(windows[i], windows[j]);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    Ok(CorrelationMatrix {
        symbols: series.iter().map(|s| s.symbol.clone()).collect(),
        values,
    })
}

/// Correlates every pair of price series over the timestamps the pair
/// shares, taking the trailing `lookback` aligned returns when given.
///
/// A pair with fewer than two shared returns gets an undefined cell.
pub fn correlation_by_date(
    series: &[PriceSeries],
    lookback: Option<usize>,
) -> Result<CorrelationMatrix, AnalyticsError> {
    let n = series.len();
    let mut values = vec![vec![None; n]; n];
    for i in 0..n {
        values[i][i] = Some(1.0);
        for j in (i + 1)..n {
            let (a, b) = aligned_returns(&series[i], &series[j])?;
            let window = lookback.unwrap_or(a.len());
            let r = pearson(a.tail(window), b.tail(window));
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    Ok(CorrelationMatrix {
        symbols: series.iter().map(|s| s.symbol().to_string()).collect(),
        values,
    })
}

/// Pearson correlation of two equal-length samples.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    let mx = mean(x)?;
    let my = mean(y)?;

    let mut cov = 0.0;
    let mut vx = 0.0;
    let mut vy = 0.0;
    for (a, b) in x.iter().zip(y) {
        let dx = a - mx;
        let dy = b - my;
        cov += dx * dy;
        vx += dx * dx;
        vy += dy * dy;
    }

    let denom = (vx * vy).sqrt();
    if denom == 0.0 {
        return None;
    }
    Some((cov / denom).clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::test_support::make_bars;
    use approx::assert_relative_eq;
    use chrono::Duration;

    fn prices(symbol: &str, closes: &[f64], offset_days: i64) -> PriceSeries {
        let mut bars = make_bars(closes);
        for bar in &mut bars {
            bar.timestamp += Duration::days(offset_days);
        }
        PriceSeries::new(symbol, bars).unwrap()
    }

    fn zigzag(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| 100.0 + i as f64 * 0.5 + if i % 2 == 0 { 2.0 } else { -1.5 })
            .collect()
    }

    fn returns(symbol: &str, values: &[f64]) -> ReturnSeries {
        ReturnSeries {
            symbol: symbol.to_string(),
            timestamps: Vec::new(),
            values: values.to_vec(),
        }
    }

    #[test]
    fn perfectly_correlated_and_anticorrelated() {
        let a = returns("A", &[0.01, 0.02, -0.01, 0.03]);
        let b = returns("B", &[0.02, 0.04, -0.02, 0.06]);
        let c = returns("C", &[-0.01, -0.02, 0.01, -0.03]);
        let m = correlation_matrix(&[a, b, c], None).unwrap();

        assert_relative_eq!(m.get("A", "B").unwrap(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(m.get("A", "C").unwrap(), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn matrix_is_symmetric_with_unit_diagonal() {
        let a = returns("A", &[0.01, -0.02, 0.015, 0.0, 0.02]);
        let b = returns("B", &[0.005, 0.01, -0.01, 0.02, -0.005]);
        let m = correlation_matrix(&[a, b], None).unwrap();

        assert_eq!(m.values[0][0], Some(1.0));
        assert_eq!(m.values[1][1], Some(1.0));
        assert_eq!(m.values[0][1], m.values[1][0]);
        let r = m.values[0][1].unwrap();
        assert!((-1.0..=1.0).contains(&r));
    }

    #[test]
    fn single_return_gives_unit_diagonal_and_undefined_pairs() {
        let m = correlation_matrix(&[returns("A", &[0.1]), returns("B", &[0.2])], None).unwrap();
        assert_eq!(m.values[0][0], Some(1.0));
        assert_eq!(m.values[0][1], None);
    }

    #[test]
    fn lookback_aligns_different_lengths() {
        let a = returns("A", &[0.5, 0.01, 0.02, 0.03]);
        let b = returns("B", &[0.01, 0.02, 0.03]);
        assert!(correlation_matrix(&[a.clone(), b.clone()], None).is_err());
        let m = correlation_matrix(&[a, b], Some(3)).unwrap();
        assert_relative_eq!(m.get("A", "B").unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn misaligned_reports_symbol() {
        let err = correlation_matrix(&[returns("A", &[0.1, 0.2]), returns("B", &[0.1])], None)
            .unwrap_err();
        assert!(matches!(err, AnalyticsError::MisalignedSeries { ref symbol, .. } if symbol == "B"));
    }

    #[test]
    fn empty_returns_are_insufficient() {
        assert!(matches!(
            correlation_matrix(&[returns("A", &[])], None),
            Err(AnalyticsError::InsufficientData { .. })
        ));
    }

    #[test]
    fn no_series_gives_empty_matrix() {
        assert!(correlation_matrix(&[], None).unwrap().is_empty());
    }

    #[test]
    fn by_date_pairs_on_shared_timestamps() {
        let closes = zigzag(30);
        let a = prices("A", &closes, 0);
        let mut bars = make_bars(&closes);
        bars.remove(7);
        bars.remove(3);
        let b = PriceSeries::new("B", bars).unwrap();

        let m = correlation_by_date(&[a, b], None).unwrap();
        assert_relative_eq!(m.get("A", "B").unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn by_date_disjoint_ranges_are_undefined() {
        let a = prices("A", &zigzag(20), 0);
        let b = prices("B", &zigzag(20), 150);
        let m = correlation_by_date(&[a, b], Some(30)).unwrap();
        assert_eq!(m.get("A", "B"), None);
        assert_eq!(m.get("B", "B"), Some(1.0));
    }

    #[test]
    fn by_date_lookback_uses_trailing_shared_returns() {
        // B starts ten days later; the last five shared returns match A exactly
        let a = prices("A", &zigzag(40), 0);
        let tail: Vec<f64> = zigzag(40)[10..].to_vec();
        let b = prices("B", &tail, 10);
        let m = correlation_by_date(&[a, b], Some(5)).unwrap();
        assert_relative_eq!(m.get("A", "B").unwrap(), 1.0, epsilon = 1e-12);
    }
}
