//! Core domain types and computations.

pub mod bundle;
pub mod config_validation;
pub mod correlation;
pub mod decomposition;
pub mod error;
pub mod indicator;
pub mod metrics;
pub mod ohlcv;
pub mod quote;
pub mod returns;
pub mod risk;
pub mod risk_report;
pub mod series;
pub mod symbol_search;
