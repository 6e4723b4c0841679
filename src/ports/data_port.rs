//! Price data access port trait.

use crate::domain::error::AnalyticsError;
use crate::domain::ohlcv::PriceSeries;

pub trait DataPort {
    /// Loads the full validated series for `symbol`.
    fn fetch_series(&self, symbol: &str) -> Result<PriceSeries, AnalyticsError>;

    fn list_symbols(&self) -> Result<Vec<String>, AnalyticsError>;
}
