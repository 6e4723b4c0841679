//! Rolling-window helpers and guarded arithmetic shared by the indicators.
//!
//! Undefined points are `None`. A window containing an undefined input is
//! itself undefined.

/// Applies `f` to every full trailing window of `values`.
///
/// Index `i` receives `f(&values[i + 1 - window..=i])` once `i >= window - 1`;
/// earlier indices are `None`. Output length always equals input length.
pub fn rolling_window<F>(values: &[f64], window: usize, f: F) -> Vec<Option<f64>>
where
    F: Fn(&[f64]) -> Option<f64>,
{
    if window == 0 {
        return vec![None; values.len()];
    }

    (0..values.len())
        .map(|i| {
            if i + 1 < window {
                None
            } else {
                f(&values[i + 1 - window..=i])
            }
        })
        .collect()
}

/// Like [`rolling_window`] but over partially-defined input.
pub fn rolling_defined<F>(values: &[Option<f64>], window: usize, f: F) -> Vec<Option<f64>>
where
    F: Fn(&[f64]) -> Option<f64>,
{
    if window == 0 {
        return vec![None; values.len()];
    }

    let mut scratch = Vec::with_capacity(window);
    (0..values.len())
        .map(|i| {
            if i + 1 < window {
                return None;
            }
            scratch.clear();
            for v in &values[i + 1 - window..=i] {
                scratch.push((*v)?);
            }
            f(&scratch)
        })
        .collect()
}

/// Dot product of `values` and `weights`. Lengths must match.
pub fn weighted_sum(values: &[f64], weights: &[f64]) -> f64 {
    debug_assert_eq!(values.len(), weights.len());
    values.iter().zip(weights).map(|(v, w)| v * w).sum()
}

/// `numerator / denominator`, or `None` when the denominator is exactly zero.
pub fn safe_div(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        None
    } else {
        Some(numerator / denominator)
    }
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Population standard deviation (divides by N).
pub fn population_stddev(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let variance = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

pub fn highest(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

pub fn lowest(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rolling_window_keeps_length_and_marks_warmup() {
        let out = rolling_window(&[1.0, 2.0, 3.0, 4.0], 3, mean);
        assert_eq!(out.len(), 4);
        assert_eq!(out[0], None);
        assert_eq!(out[1], None);
        assert_eq!(out[2], Some(2.0));
        assert_eq!(out[3], Some(3.0));
    }

    #[test]
    fn rolling_window_longer_than_input() {
        let out = rolling_window(&[1.0, 2.0], 5, mean);
        assert_eq!(out, vec![None, None]);
    }

    #[test]
    fn rolling_window_zero_is_all_undefined() {
        let out = rolling_window(&[1.0, 2.0], 0, mean);
        assert_eq!(out, vec![None, None]);
    }

    #[test]
    fn rolling_defined_propagates_gaps() {
        let input = [Some(1.0), None, Some(3.0), Some(5.0), Some(7.0)];
        let out = rolling_defined(&input, 2, mean);
        assert_eq!(out, vec![None, None, None, Some(4.0), Some(6.0)]);
    }

    #[test]
    fn weighted_sum_is_dot_product() {
        assert_eq!(weighted_sum(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]), 14.0);
    }

    #[test]
    fn safe_div_guards_zero() {
        assert_eq!(safe_div(1.0, 0.0), None);
        assert_eq!(safe_div(1.0, 4.0), Some(0.25));
    }

    #[test]
    fn population_stddev_known_value() {
        let sd = population_stddev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((sd - 2.0).abs() < 1e-12);
    }

    #[test]
    fn extremes() {
        assert_eq!(highest(&[3.0, 9.0, 1.0]), Some(9.0));
        assert_eq!(lowest(&[3.0, 9.0, 1.0]), Some(1.0));
        assert_eq!(highest(&[]), None);
    }
}
