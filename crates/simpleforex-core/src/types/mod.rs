//! Value types for foreign exchange.
//!
//! - [`Currency`]: ISO 4217 currency from the static registry
//! - [`CurrencyPair`]: Ordered base/quote pair of distinct currencies
//! - [`ExchangeRate`]: Positive rate of a pair at an instant
//! - [`DateRange`]: Inclusive, order-independent range of dates

mod currency;
mod currency_pair;
mod date_range;
mod exchange_rate;

pub use currency::Currency;
pub use currency_pair::CurrencyPair;
pub use date_range::DateRange;
pub use exchange_rate::{ExchangeRate, ExchangeRateBuilder};
