//! Elliptic++ Dataset Audit Library
//!
//! Label-consistency checking, correlation reporting and exploratory
//! profiling for the Elliptic++ blockchain-transaction dataset.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod plot;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
