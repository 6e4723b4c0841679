//! Classical additive decomposition.
//!
//! Trend is a centred moving average of width `period` (a 2x`period` average
//! for even periods). Seasonal is the mean detrended value at each phase,
//! shifted so the phases sum to zero. Residual is what remains, and is
//! undefined wherever the trend is.

use crate::domain::decomposition::{validate_decomposition_input, Decomposition};
use crate::domain::error::AnalyticsError;
use crate::domain::series::mean;
use crate::ports::decomposition_port::Decomposer;

#[derive(Debug, Default, Clone, Copy)]
pub struct ClassicalDecomposer;

fn centred_moving_average(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let n = values.len();
    let half = period / 2;
    let mut trend = vec![None; n];
    if n < 2 * half + 1 {
        return trend;
    }

    for (i, slot) in trend.iter_mut().enumerate().take(n - half).skip(half) {
        let window = &values[i - half..=i + half];
        *slot = Some(if period % 2 == 1 {
            window.iter().sum::<f64>() / period as f64
        } else {
            let inner: f64 = window[1..window.len() - 1].iter().sum();
            (0.5 * window[0] + inner + 0.5 * window[window.len() - 1]) / period as f64
        });
    }
    trend
}

impl Decomposer for ClassicalDecomposer {
    fn decompose(&self, observed: &[f64], period: usize) -> Result<Decomposition, AnalyticsError> {
        validate_decomposition_input(observed.len(), period)?;

        let trend = centred_moving_average(observed, period);

        let mut by_phase: Vec<Vec<f64>> = vec![Vec::new(); period];
        for (i, (value, t)) in observed.iter().zip(&trend).enumerate() {
            if let Some(t) = t {
                by_phase[i % period].push(value - t);
            }
        }
        let phase_means: Vec<f64> = by_phase.iter().map(|d| mean(d).unwrap_or(0.0)).collect();
        let offset = mean(&phase_means).unwrap_or(0.0);
        let pattern: Vec<f64> = phase_means.iter().map(|m| m - offset).collect();

        let seasonal: Vec<f64> = (0..observed.len()).map(|i| pattern[i % period]).collect();
        let residual = observed
            .iter()
            .zip(&trend)
            .zip(&seasonal)
            .map(|((value, t), s)| t.map(|t| value - t - s))
            .collect();

        Ok(Decomposition {
            trend,
            seasonal,
            residual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn seasonal_line(n: usize, pattern: &[f64]) -> Vec<f64> {
        (0..n)
            .map(|i| 50.0 + 0.5 * i as f64 + pattern[i % pattern.len()])
            .collect()
    }

    #[test]
    fn recovers_linear_trend_and_pattern_odd_period() {
        let pattern = [1.0, -2.0, 1.0];
        let observed = seasonal_line(12, &pattern);
        let out = ClassicalDecomposer.decompose(&observed, 3).unwrap();

        assert_eq!(out.trend[0], None);
        assert_eq!(out.trend[11], None);
        assert_relative_eq!(out.trend[1].unwrap(), 50.5, epsilon = 1e-12);
        for i in 0..12 {
            assert_relative_eq!(out.seasonal[i], pattern[i % 3], epsilon = 1e-12);
        }
        for r in out.residual.iter().flatten() {
            assert_relative_eq!(*r, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn even_period_uses_two_by_average() {
        let pattern = [2.0, -1.0, 0.5, -1.5];
        let observed = seasonal_line(16, &pattern);
        let out = ClassicalDecomposer.decompose(&observed, 4).unwrap();

        assert_eq!(out.trend[..2], [None, None]);
        assert_eq!(out.trend[14..], [None, None]);
        assert_relative_eq!(out.trend[2].unwrap(), 51.0, epsilon = 1e-12);
        for i in 0..16 {
            assert_relative_eq!(out.seasonal[i], pattern[i % 4], epsilon = 1e-12);
        }
    }

    #[test]
    fn components_sum_to_observed() {
        let observed: Vec<f64> = (0..30)
            .map(|i| 100.0 + (i as f64 * 0.9).sin() * 4.0 + (i % 5) as f64)
            .collect();
        let out = ClassicalDecomposer.decompose(&observed, 5).unwrap();

        assert_relative_eq!(out.seasonal[..5].iter().sum::<f64>(), 0.0, epsilon = 1e-9);
        for i in 0..observed.len() {
            if let (Some(t), Some(r)) = (out.trend[i], out.residual[i]) {
                assert_relative_eq!(t + out.seasonal[i] + r, observed[i], epsilon = 1e-9);
            } else {
                assert_eq!(out.residual[i], None);
            }
        }
    }

    #[test]
    fn short_input_rejected() {
        let err = ClassicalDecomposer.decompose(&[1.0, 2.0, 3.0], 2).unwrap_err();
        assert!(matches!(err, AnalyticsError::InsufficientData { .. }));
    }
}
