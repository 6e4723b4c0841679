//! Edit-distance search over a symbol catalog.

use serde::{Deserialize, Serialize};

pub const DEFAULT_THRESHOLD: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolRecord {
    pub ticker: String,
    pub company_name: String,
}

impl SymbolRecord {
    pub fn new(ticker: impl Into<String>, company_name: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            company_name: company_name.into(),
        }
    }
}

/// Levenshtein distance with unit costs, computed over chars with a single row.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let above = row[j + 1];
            let substitution = diagonal + usize::from(ca != *cb);
            row[j + 1] = substitution.min(above + 1).min(row[j] + 1);
            diagonal = above;
        }
    }
    row[b.len()]
}

/// Case-insensitive distance from `query` to the closer of ticker and name.
pub fn record_distance(query: &str, record: &SymbolRecord) -> usize {
    let query = query.to_lowercase();
    let ticker = levenshtein(&query, &record.ticker.to_lowercase());
    let name = levenshtein(&query, &record.company_name.to_lowercase());
    ticker.min(name)
}

/// Entries within `threshold` edits of `query`, nearest first.
///
/// Ties keep catalog order. An empty query returns the whole catalog.
pub fn search<'a>(query: &str, catalog: &'a [SymbolRecord], threshold: usize) -> Vec<&'a SymbolRecord> {
    if query.is_empty() {
        return catalog.iter().collect();
    }

    let mut hits: Vec<(usize, &SymbolRecord)> = catalog
        .iter()
        .map(|record| (record_distance(query, record), record))
        .filter(|(distance, _)| *distance <= threshold)
        .collect();
    hits.sort_by_key(|(distance, _)| *distance);
    hits.into_iter().map(|(_, record)| record).collect()
}
