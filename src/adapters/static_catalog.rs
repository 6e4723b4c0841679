//! Built-in catalog of widely followed tickers.

use crate::domain::error::AnalyticsError;
use crate::domain::symbol_search::SymbolRecord;
use crate::ports::catalog_port::CatalogPort;

const BUILTIN: [(&str, &str); 32] = [
    ("AAPL", "Apple Inc."),
    ("MSFT", "Microsoft Corp."),
    ("GOOGL", "Alphabet Inc."),
    ("AMZN", "Amazon.com Inc."),
    ("TSLA", "Tesla Inc."),
    ("META", "Meta Platforms Inc."),
    ("NVDA", "NVIDIA Corp."),
    ("NFLX", "Netflix Inc."),
    ("BRK-B", "Berkshire Hathaway Inc."),
    ("JPM", "JPMorgan Chase & Co."),
    ("V", "Visa Inc."),
    ("UNH", "UnitedHealth Group Inc."),
    ("HD", "Home Depot Inc."),
    ("MA", "Mastercard Inc."),
    ("PG", "Procter & Gamble Co."),
    ("DIS", "Walt Disney Co."),
    ("KO", "Coca-Cola Co."),
    ("PEP", "PepsiCo Inc."),
    ("BAC", "Bank of America Corp."),
    ("XOM", "Exxon Mobil Corp."),
    ("PFE", "Pfizer Inc."),
    ("CSCO", "Cisco Systems Inc."),
    ("T", "AT&T Inc."),
    ("VZ", "Verizon Communications Inc."),
    ("WMT", "Walmart Inc."),
    ("INTC", "Intel Corp."),
    ("CVX", "Chevron Corp."),
    ("MCD", "McDonald's Corp."),
    ("NKE", "Nike Inc."),
    ("ADBE", "Adobe Inc."),
    ("SAP", "SAP SE"),
    ("BNTX", "BioNTech SE"),
];

#[derive(Debug, Default, Clone, Copy)]
pub struct StaticCatalog;

impl StaticCatalog {
    pub fn records() -> Vec<SymbolRecord> {
        BUILTIN
            .iter()
            .map(|(ticker, name)| SymbolRecord::new(*ticker, *name))
            .collect()
    }
}

impl CatalogPort for StaticCatalog {
    fn load_catalog(&self) -> Result<Vec<SymbolRecord>, AnalyticsError> {
        Ok(Self::records())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::symbol_search::search;
    use std::collections::HashSet;

    #[test]
    fn tickers_are_unique() {
        let records = StaticCatalog.load_catalog().unwrap();
        let unique: HashSet<&str> = records.iter().map(|r| r.ticker.as_str()).collect();
        assert_eq!(unique.len(), records.len());
    }

    #[test]
    fn exact_search_finds_builtin_ticker() {
        let records = StaticCatalog::records();
        let hits = search("NVDA", &records, 0);
        assert_eq!(hits[0].company_name, "NVIDIA Corp.");
    }

    #[test]
    fn typo_tolerant_search() {
        let records = StaticCatalog::records();
        let hits = search("nflx", &records, 1);
        assert_eq!(hits[0].ticker, "NFLX");
        let hits = search("Netflex Inc.", &records, 2);
        assert_eq!(hits[0].ticker, "NFLX");
    }
}
