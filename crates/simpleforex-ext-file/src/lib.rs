//! # SimpleForex Ext File
//!
//! Local forex data providers for SimpleForex.
//!
//! This crate provides default implementations for testing, EOD loads, and static data:
//! - An empty provider that never has data
//! - A thread-safe in-memory provider
//! - A CSV file provider configured from TOML
//!
//! For live rates, implement [`ForexDataProvider`] over a network client in a
//! separate extension crate.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
mod csv_source;
mod memory;

pub use config::FileSourceConfig;
pub use csv_source::CsvForexDataProvider;
pub use memory::{EmptyForexDataProvider, InMemoryForexDataProvider};

use std::sync::Arc;

use simpleforex_traits::{DataSourceError, ForexDataProvider};

/// Create a file-based forex data provider.
pub fn create_file_provider(
    config: &FileSourceConfig,
) -> Result<Arc<dyn ForexDataProvider>, DataSourceError> {
    Ok(Arc::new(CsvForexDataProvider::new(config.clone())?))
}

/// Create a provider with no data (for testing/development).
pub fn create_empty_provider() -> Arc<dyn ForexDataProvider> {
    Arc::new(EmptyForexDataProvider)
}
