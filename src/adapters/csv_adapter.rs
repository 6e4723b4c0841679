//! CSV file adapters for price data and symbol catalogs.

use crate::domain::error::AnalyticsError;
use crate::domain::ohlcv::{PriceBar, PriceSeries};
use crate::domain::symbol_search::SymbolRecord;
use crate::ports::catalog_port::CatalogPort;
use crate::ports::data_port::DataPort;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Reads `<base_path>/<SYMBOL>.csv` with a
/// `timestamp,open,high,low,close,volume` header.
pub struct CsvAdapter {
    base_path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct PriceRow {
    #[serde(alias = "date")]
    timestamp: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }
}

pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, AnalyticsError> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, DATETIME_FORMAT)
        .or_else(|_| {
            NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .map(|d| d.and_time(chrono::NaiveTime::MIN))
        })
        .map_err(|e| AnalyticsError::Data {
            reason: format!("invalid timestamp '{}': {}", raw, e),
        })
}

impl DataPort for CsvAdapter {
    fn fetch_series(&self, symbol: &str) -> Result<PriceSeries, AnalyticsError> {
        let path = self.csv_path(symbol);
        if !path.exists() {
            return Err(AnalyticsError::UnknownSymbol(symbol.to_string()));
        }
        let content = fs::read_to_string(&path).map_err(|e| AnalyticsError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for (line, result) in rdr.deserialize::<PriceRow>().enumerate() {
            let row = result.map_err(|e| AnalyticsError::Data {
                reason: format!("{} row {}: {}", path.display(), line + 1, e),
            })?;
            bars.push(PriceBar {
                timestamp: parse_timestamp(&row.timestamp)?,
                open: row.open,
                high: row.high,
                low: row.low,
                close: row.close,
                volume: row.volume,
            });
        }

        bars.sort_by_key(|b| b.timestamp);
        info!(symbol, bars = bars.len(), "loaded price series");
        PriceSeries::new(symbol, bars)
    }

    fn list_symbols(&self) -> Result<Vec<String>, AnalyticsError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| AnalyticsError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut symbols = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| AnalyticsError::Data {
                reason: format!("directory entry error: {}", e),
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "csv") {
                if let Some(stem) = path.file_stem() {
                    symbols.push(stem.to_string_lossy().into_owned());
                }
            }
        }

        symbols.sort();
        debug!(count = symbols.len(), "listed symbols");
        Ok(symbols)
    }
}

/// Reads a `ticker,name` catalog file.
pub struct CsvCatalogAdapter {
    path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    ticker: String,
    #[serde(alias = "company_name")]
    name: String,
}

impl CsvCatalogAdapter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl CatalogPort for CsvCatalogAdapter {
    fn load_catalog(&self) -> Result<Vec<SymbolRecord>, AnalyticsError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .map_err(|e| AnalyticsError::Data {
                reason: format!("failed to open catalog {}: {}", self.path.display(), e),
            })?;

        let records = rdr
            .deserialize::<CatalogRow>()
            .map(|row| {
                row.map(|r| SymbolRecord::new(r.ticker, r.name))
                    .map_err(|e| AnalyticsError::Data {
                        reason: format!("catalog {}: {}", self.path.display(), e),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        info!(path = %self.path.display(), entries = records.len(), "loaded catalog");
        Ok(records)
    }
}
