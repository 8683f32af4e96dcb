//! # SimpleForex Traits
//!
//! Trait definitions for SimpleForex data providers.
//!
//! This crate contains ONLY the provider contract and its error type, with no
//! runtime dependencies. Implementations live in extension crates such as
//! `simpleforex-ext-file`.
//!
//! ## Module Structure
//!
//! - [`provider`]: The [`ForexDataProvider`] trait and its [`ExchangeRates`] result
//! - [`error`]: [`DataSourceError`], raised when a source cannot be reached or read
//!
//! ## Usage
//!
//! Consumers depend on the trait and receive a concrete provider by injection:
//!
//! ```ignore
//! async fn latest_eurusd(provider: &dyn ForexDataProvider, date: NaiveDate) -> Option<Decimal> {
//!     let pair = CurrencyPair::from_iso_codes("EUR", "USD").ok()?;
//!     let rate = provider.find_exchange_rate(&pair, date).await.ok()??;
//!     Some(rate.value())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod provider;

// Re-export commonly used types
pub use error::DataSourceError;
pub use provider::{ExchangeRates, ForexDataProvider};
