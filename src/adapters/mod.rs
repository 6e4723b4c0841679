//! Concrete adapter implementations for ports.

pub mod classical_decomposition;
pub mod csv_adapter;
pub mod file_config_adapter;
pub mod static_catalog;
