//! Multi-symbol risk report over already-loaded price series.

use crate::domain::correlation::{correlation_by_date, CorrelationMatrix};
use crate::domain::error::AnalyticsError;
use crate::domain::metrics::{periodic_rate, ScatterMetrics, TRADING_DAYS_PER_YEAR};
use crate::domain::ohlcv::PriceSeries;
use crate::domain::returns::{ReturnSeries, ReturnStats};
use crate::domain::risk::{rolling_volatility, RiskSettings, RiskSummary};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Serialize)]
pub struct SymbolRisk {
    pub symbol: String,
    pub stats: ReturnStats,
    pub risk: RiskSummary,
    pub rolling_volatility: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scatter: Option<ScatterMetrics>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RiskReport {
    pub benchmark: Option<String>,
    pub confidence: f64,
    pub symbols: Vec<SymbolRisk>,
    pub correlation: CorrelationMatrix,
}

/// Builds per-symbol statistics and the cross-symbol correlation matrix.
///
/// Each pair is correlated over the trailing `correlation_lookback` returns
/// of the timestamps both symbols carry, and beta pairs the same way against
/// the benchmark. Scatter metrics are present only when a benchmark is
/// supplied; the annual risk-free rate is converted to a daily one.
pub fn build_risk_report(
    series: &[PriceSeries],
    benchmark: Option<&PriceSeries>,
    settings: &RiskSettings,
) -> Result<RiskReport, AnalyticsError> {
    if series.is_empty() {
        return Err(AnalyticsError::invalid_parameter(
            "symbols",
            "at least one symbol is required",
        ));
    }

    let returns = series
        .iter()
        .map(ReturnSeries::from_series)
        .collect::<Result<Vec<_>, _>>()?;
    let daily_rf = periodic_rate(settings.risk_free_rate, TRADING_DAYS_PER_YEAR);

    let mut symbols = Vec::with_capacity(returns.len());
    for (prices, r) in series.iter().zip(&returns) {
        let scatter = benchmark
            .map(|b| ScatterMetrics::compute(prices, b, daily_rf))
            .transpose()?;
        symbols.push(SymbolRisk {
            symbol: r.symbol.clone(),
            stats: ReturnStats::compute(&r.values)?,
            risk: RiskSummary::compute(r, settings.confidence)?,
            rolling_volatility: rolling_volatility(&r.values, settings.volatility_window)?,
            scatter,
        });
    }

    debug!(
        lookback = settings.correlation_lookback,
        "correlating {} series by date",
        series.len()
    );
    let correlation = correlation_by_date(series, Some(settings.correlation_lookback))?;

    Ok(RiskReport {
        benchmark: benchmark.map(|b| b.symbol().to_string()),
        confidence: settings.confidence,
        symbols,
        correlation,
    })
}
