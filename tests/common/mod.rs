#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use marketlens::domain::error::AnalyticsError;
pub use marketlens::domain::ohlcv::{PriceBar, PriceSeries};
use marketlens::ports::data_port::DataPort;
use std::collections::HashMap;
use std::path::Path;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<PriceBar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<PriceBar>) -> Self {
        self.data.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_closes(self, symbol: &str, closes: &[f64]) -> Self {
        self.with_bars(symbol, bars_from_closes("2024-01-01", closes))
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_series(&self, symbol: &str) -> Result<PriceSeries, AnalyticsError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(AnalyticsError::Data {
                reason: reason.clone(),
            });
        }
        match self.data.get(symbol) {
            Some(bars) => PriceSeries::new(symbol, bars.clone()),
            None => Err(AnalyticsError::UnknownSymbol(symbol.to_string())),
        }
    }

    fn list_symbols(&self) -> Result<Vec<String>, AnalyticsError> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }
}

pub fn day(start: &str, offset: usize) -> NaiveDateTime {
    let start = NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap();
    (start + chrono::Duration::days(offset as i64))
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// Bars whose open is the previous close, with a one-point band around the body.
pub fn bars_from_closes(start: &str, closes: &[f64]) -> Vec<PriceBar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            PriceBar {
                timestamp: day(start, i),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000.0 + (i % 7) as f64 * 100.0,
            }
        })
        .collect()
}

/// A trending sine wave, positive for any sensible `base`.
pub fn wave_closes(count: usize, base: f64, phase: f64) -> Vec<f64> {
    (0..count)
        .map(|i| base + i as f64 * 0.2 + ((i as f64) * 0.4 + phase).sin() * 4.0)
        .collect()
}

/// Writes `<dir>/<symbol>.csv` in the on-disk price format.
pub fn write_price_csv(dir: &Path, symbol: &str, bars: &[PriceBar]) {
    let mut content = String::from("timestamp,open,high,low,close,volume\n");
    for b in bars {
        content.push_str(&format!(
            "{},{},{},{},{},{}\n",
            b.timestamp.format("%Y-%m-%d"),
            b.open,
            b.high,
            b.low,
            b.close,
            b.volume
        ));
    }
    std::fs::write(dir.join(format!("{}.csv", symbol)), content).unwrap();
}
