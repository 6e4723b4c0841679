//! Seasonal decomposition port trait.

use crate::domain::decomposition::Decomposition;
use crate::domain::error::AnalyticsError;

/// Splits observations into additive trend, seasonal and residual parts.
///
/// Implementations receive input already checked for `period >= 2` and at
/// least `2 * period` observations, and must return components of the same
/// length as `observed`.
pub trait Decomposer {
    fn decompose(&self, observed: &[f64], period: usize) -> Result<Decomposition, AnalyticsError>;
}
