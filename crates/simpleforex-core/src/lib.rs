//! # SimpleForex Core
//!
//! Core value types for the SimpleForex library.
//!
//! This crate provides the building blocks every forex data provider speaks:
//!
//! - **Currencies**: A static ISO 4217 registry behind the [`Currency`] type
//! - **Currency pairs**: Ordered, asymmetric pairs that never repeat a currency
//! - **Exchange rates**: Immutable snapshots with a positive decimal value
//! - **Date ranges**: Inclusive ranges whose boundary order never matters
//!
//! ## Design Philosophy
//!
//! - **Validated Construction**: Invalid values cannot be built
//! - **Value Semantics**: Everything is `Copy`, immutable and thread-safe
//! - **Exact Decimals**: Rates use `rust_decimal`, compared by numeric value
//!
//! ## Example
//!
//! ```rust
//! use simpleforex_core::prelude::*;
//! use chrono::{TimeZone, Utc};
//! use rust_decimal_macros::dec;
//!
//! let pair = CurrencyPair::from_iso_codes("EUR", "USD")?;
//! let rate = ExchangeRate::new(pair, dec!(1.0842), Utc.with_ymd_and_hms(2025, 6, 2, 16, 0, 0).unwrap())?;
//!
//! assert_eq!(rate.currency_pair().to_string(), "EURUSD");
//! assert!(pair.involves(Currency::USD));
//! # Ok::<(), ForexError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{ForexError, ForexResult};
    pub use crate::types::{Currency, CurrencyPair, DateRange, ExchangeRate, ExchangeRateBuilder};
}

// Re-export commonly used types at crate root
pub use error::{ForexError, ForexResult};
pub use types::{Currency, CurrencyPair, DateRange, ExchangeRate, ExchangeRateBuilder};
