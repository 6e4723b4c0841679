//! Benchmark-relative scatter metrics: mean return, volatility, beta, Sharpe.

use crate::domain::error::AnalyticsError;
use crate::domain::ohlcv::PriceSeries;
use crate::domain::returns::{aligned_returns, ReturnSeries};
use crate::domain::series::{mean, population_stddev, safe_div};
use serde::Serialize;

pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.02;

/// Converts an annual rate to a per-period rate.
pub fn periodic_rate(annual_rate: f64, periods_per_year: f64) -> f64 {
    annual_rate / periods_per_year
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterMetrics {
    pub symbol: String,
    pub mean_return: f64,
    pub volatility: f64,
    pub beta: Option<f64>,
    pub sharpe_ratio: Option<f64>,
}

impl ScatterMetrics {
    /// `risk_free_rate` is per period, in the same units as the returns.
    /// Mean, volatility and Sharpe use every asset return; beta uses only the
    /// timestamps the asset and benchmark share, and is undefined without any.
    pub fn compute(
        asset: &PriceSeries,
        benchmark: &PriceSeries,
        risk_free_rate: f64,
    ) -> Result<Self, AnalyticsError> {
        let returns = ReturnSeries::from_series(asset)?;
        if returns.is_empty() {
            return Err(AnalyticsError::insufficient_data(
                format!("metrics for {}", asset.symbol()),
                asset.len(),
                2,
            ));
        }

        let (asset_shared, bench_shared) = aligned_returns(asset, benchmark)?;

        Ok(Self {
            symbol: returns.symbol.clone(),
            mean_return: mean(&returns.values).unwrap_or(0.0),
            volatility: population_stddev(&returns.values).unwrap_or(0.0),
            beta: beta(&asset_shared.values, &bench_shared.values),
            sharpe_ratio: sharpe_ratio(&returns.values, risk_free_rate),
        })
    }
}

/// cov(asset, benchmark) / var(benchmark), population moments.
pub fn beta(asset: &[f64], benchmark: &[f64]) -> Option<f64> {
    if asset.len() != benchmark.len() {
        return None;
    }
    let ma = mean(asset)?;
    let mb = mean(benchmark)?;
    let n = asset.len() as f64;

    let covariance: f64 = asset
        .iter()
        .zip(benchmark)
        .map(|(a, b)| (a - ma) * (b - mb))
        .sum::<f64>()
        / n;
    let bench_variance: f64 = benchmark.iter().map(|b| (b - mb).powi(2)).sum::<f64>() / n;

    safe_div(covariance, bench_variance)
}

/// (mean - risk_free_rate) / stddev; undefined when returns do not vary.
pub fn sharpe_ratio(returns: &[f64], risk_free_rate: f64) -> Option<f64> {
    let m = mean(returns)?;
    let sd = population_stddev(returns)?;
    safe_div(m - risk_free_rate, sd)
}
