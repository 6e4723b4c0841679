//! Port traits implemented by the adapters.

pub mod catalog_port;
pub mod config_port;
pub mod data_port;
pub mod decomposition_port;
