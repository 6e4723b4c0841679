//! Chart-ready bundle: every requested indicator over one price series.

use crate::domain::error::AnalyticsError;
use crate::domain::indicator::{
    bollinger, calculate_atr, calculate_bollinger, calculate_ema, calculate_hma, calculate_macd,
    calculate_rsi, calculate_sma, calculate_stochastic, calculate_vwap, calculate_williams_r,
    calculate_wma, macd, rsi, stochastic, williams_r, BollingerBands, IndicatorSeries,
    MacdSeries, StochasticSeries,
};
use crate::domain::ohlcv::{PriceBar, PriceSeries};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerParams {
    pub period: usize,
    pub k: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacdParams {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StochasticParams {
    pub k_period: usize,
    pub d_period: usize,
}

/// Which indicators to compute, with their parameters. `None` disables one.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSettings {
    pub sma: Option<usize>,
    pub ema: Option<usize>,
    pub wma: Option<usize>,
    pub hma: Option<usize>,
    pub vwap: bool,
    pub bollinger: Option<BollingerParams>,
    pub atr: Option<usize>,
    pub rsi: Option<usize>,
    pub macd: Option<MacdParams>,
    pub stochastic: Option<StochasticParams>,
    pub williams_r: Option<usize>,
}

impl IndicatorSettings {
    /// Nothing enabled.
    pub fn none() -> Self {
        Self {
            sma: None,
            ema: None,
            wma: None,
            hma: None,
            vwap: false,
            bollinger: None,
            atr: None,
            rsi: None,
            macd: None,
            stochastic: None,
            williams_r: None,
        }
    }
}

impl Default for IndicatorSettings {
    /// Every indicator enabled with its default parameters.
    fn default() -> Self {
        Self {
            sma: Some(20),
            ema: Some(20),
            wma: Some(20),
            hma: Some(20),
            vwap: true,
            bollinger: Some(BollingerParams {
                period: bollinger::DEFAULT_PERIOD,
                k: bollinger::DEFAULT_K,
            }),
            atr: Some(14),
            rsi: Some(rsi::DEFAULT_PERIOD),
            macd: Some(MacdParams {
                fast: macd::DEFAULT_FAST,
                slow: macd::DEFAULT_SLOW,
                signal: macd::DEFAULT_SIGNAL,
            }),
            stochastic: Some(StochasticParams {
                k_period: stochastic::DEFAULT_K_PERIOD,
                d_period: stochastic::DEFAULT_D_PERIOD,
            }),
            williams_r: Some(williams_r::DEFAULT_PERIOD),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartBundle {
    pub symbol: String,
    pub bars: Vec<PriceBar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sma: Option<IndicatorSeries>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ema: Option<IndicatorSeries>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wma: Option<IndicatorSeries>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hma: Option<IndicatorSeries>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vwap: Option<IndicatorSeries>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bollinger: Option<BollingerBands>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atr: Option<IndicatorSeries>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsi: Option<IndicatorSeries>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macd: Option<MacdSeries>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stochastic: Option<StochasticSeries>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub williams_r: Option<IndicatorSeries>,
}

impl ChartBundle {
    /// All single-line series in display order, flattening the composites.
    pub fn series(&self) -> Vec<&IndicatorSeries> {
        let mut out: Vec<&IndicatorSeries> = Vec::new();
        out.extend(self.sma.iter());
        out.extend(self.ema.iter());
        out.extend(self.wma.iter());
        out.extend(self.hma.iter());
        out.extend(self.vwap.iter());
        if let Some(b) = &self.bollinger {
            out.extend([&b.upper, &b.middle, &b.lower]);
        }
        out.extend(self.atr.iter());
        out.extend(self.rsi.iter());
        if let Some(m) = &self.macd {
            out.extend([&m.line, &m.signal, &m.histogram]);
        }
        if let Some(s) = &self.stochastic {
            out.extend([&s.k, &s.d]);
        }
        out.extend(self.williams_r.iter());
        out
    }
}

/// Computes every indicator enabled in `settings`. Parameters are validated
/// up front so an invalid one fails the call before any work is done.
pub fn compute_bundle(
    series: &PriceSeries,
    settings: &IndicatorSettings,
) -> Result<ChartBundle, AnalyticsError> {
    let bars = series.bars();
    let empty: &[PriceBar] = &[];

    // Validate on an empty slice first; each calculate_* checks its own parameters.
    run_all(empty, settings)?;
    let mut bundle = run_all(bars, settings)?;
    bundle.symbol = series.symbol().to_string();
    bundle.bars = bars.to_vec();
    Ok(bundle)
}

fn run_all(bars: &[PriceBar], s: &IndicatorSettings) -> Result<ChartBundle, AnalyticsError> {
    Ok(ChartBundle {
        symbol: String::new(),
        bars: Vec::new(),
        sma: s.sma.map(|p| calculate_sma(bars, p)).transpose()?,
        ema: s.ema.map(|p| calculate_ema(bars, p)).transpose()?,
        wma: s.wma.map(|p| calculate_wma(bars, p)).transpose()?,
        hma: s.hma.map(|p| calculate_hma(bars, p)).transpose()?,
        vwap: s.vwap.then(|| calculate_vwap(bars)),
        bollinger: s
            .bollinger
            .map(|p| calculate_bollinger(bars, p.period, p.k))
            .transpose()?,
        atr: s.atr.map(|p| calculate_atr(bars, p)).transpose()?,
        rsi: s.rsi.map(|p| calculate_rsi(bars, p)).transpose()?,
        macd: s
            .macd
            .map(|p| calculate_macd(bars, p.fast, p.slow, p.signal))
            .transpose()?,
        stochastic: s
            .stochastic
            .map(|p| calculate_stochastic(bars, p.k_period, p.d_period))
            .transpose()?,
        williams_r: s
            .williams_r
            .map(|p| calculate_williams_r(bars, p))
            .transpose()?,
    })
}
