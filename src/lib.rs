//! marketlens: technical indicators and risk analytics over OHLCV series.
//!
//! Hexagonal architecture: pure computations in [`domain`], port traits in
//! [`ports`], file-backed implementations in [`adapters`], and a thin
//! command line front end in [`cli`].

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod logging;
pub mod ports;
