//! Additive trend/seasonal/residual decomposition of closing prices.
//!
//! The numerical work is delegated to a [`Decomposer`]; this module checks the
//! inputs going in and the alignment of what comes back.

use crate::domain::error::AnalyticsError;
use crate::domain::ohlcv::PriceSeries;
use crate::ports::decomposition_port::Decomposer;
use chrono::NaiveDateTime;
use serde::Serialize;

/// Components aligned index-for-index with the observed values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decomposition {
    pub trend: Vec<Option<f64>>,
    pub seasonal: Vec<f64>,
    pub residual: Vec<Option<f64>>,
}

impl Decomposition {
    pub fn len(&self) -> usize {
        self.seasonal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seasonal.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesDecomposition {
    pub symbol: String,
    pub period: usize,
    pub timestamps: Vec<NaiveDateTime>,
    pub observed: Vec<f64>,
    #[serde(flatten)]
    pub components: Decomposition,
}

pub fn validate_decomposition_input(len: usize, period: usize) -> Result<(), AnalyticsError> {
    if period < 2 {
        return Err(AnalyticsError::invalid_parameter(
            "period",
            format!("seasonal period must be at least 2, got {}", period),
        ));
    }
    let need = period.saturating_mul(2);
    if len < need {
        return Err(AnalyticsError::insufficient_data("decomposition", len, need));
    }
    Ok(())
}

pub fn decompose_series(
    decomposer: &dyn Decomposer,
    series: &PriceSeries,
    period: usize,
) -> Result<SeriesDecomposition, AnalyticsError> {
    validate_decomposition_input(series.len(), period)?;

    let observed = series.closes();
    let components = decomposer.decompose(&observed, period)?;

    for (name, len) in [
        ("trend", components.trend.len()),
        ("seasonal", components.seasonal.len()),
        ("residual", components.residual.len()),
    ] {
        if len != observed.len() {
            return Err(AnalyticsError::MisalignedSeries {
                symbol: format!("{} {}", series.symbol(), name),
                len,
                expected: observed.len(),
            });
        }
    }

    Ok(SeriesDecomposition {
        symbol: series.symbol().to_string(),
        period,
        timestamps: series.timestamps(),
        observed,
        components,
    })
}
