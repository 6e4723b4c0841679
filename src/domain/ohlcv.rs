//! OHLCV bar and price series representation.

use crate::domain::error::AnalyticsError;
use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceBar {
    pub timestamp: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl PriceBar {
    /// (open + high + low + close) / 4
    pub fn typical_price(&self) -> f64 {
        (self.open + self.high + self.low + self.close) / 4.0
    }

    /// max(high - low, |high - prev_close|, |low - prev_close|)
    pub fn true_range(&self, prev_close: f64) -> f64 {
        let hl = self.high - self.low;
        let hc = (self.high - prev_close).abs();
        let lc = (self.low - prev_close).abs();
        hl.max(hc).max(lc)
    }

    /// Checks the bar's internal invariants, returning a reason on violation.
    pub fn check(&self) -> Result<(), String> {
        let fields = [self.open, self.high, self.low, self.close, self.volume];
        if fields.iter().any(|v| !v.is_finite()) {
            return Err("non-finite field".to_string());
        }
        if self.high < self.open.max(self.close) {
            return Err(format!("high {} below max(open, close)", self.high));
        }
        if self.low > self.open.min(self.close) {
            return Err(format!("low {} above min(open, close)", self.low));
        }
        if self.volume < 0.0 {
            return Err(format!("negative volume {}", self.volume));
        }
        Ok(())
    }
}

/// Bars for one symbol, strictly increasing by timestamp.
#[derive(Debug, Clone, Serialize)]
pub struct PriceSeries {
    symbol: String,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    pub fn new(symbol: impl Into<String>, bars: Vec<PriceBar>) -> Result<Self, AnalyticsError> {
        let symbol = symbol.into();

        for (i, bar) in bars.iter().enumerate() {
            if let Err(reason) = bar.check() {
                return Err(AnalyticsError::InvalidSeries {
                    symbol,
                    reason: format!("bar {} at {}: {}", i, bar.timestamp, reason),
                });
            }
        }

        if let Some(pos) = bars.windows(2).position(|w| w[1].timestamp <= w[0].timestamp) {
            return Err(AnalyticsError::InvalidSeries {
                symbol,
                reason: format!(
                    "timestamp {} does not follow {}",
                    bars[pos + 1].timestamp,
                    bars[pos].timestamp
                ),
            });
        }

        Ok(Self { symbol, bars })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn timestamps(&self) -> Vec<NaiveDateTime> {
        self.bars.iter().map(|b| b.timestamp).collect()
    }

    pub fn last(&self) -> Option<&PriceBar> {
        self.bars.last()
    }
}
