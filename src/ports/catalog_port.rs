//! Symbol catalog port trait.

use crate::domain::error::AnalyticsError;
use crate::domain::symbol_search::SymbolRecord;

pub trait CatalogPort {
    fn load_catalog(&self) -> Result<Vec<SymbolRecord>, AnalyticsError>;
}
