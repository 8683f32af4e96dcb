//! Exchange rate type.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

use super::CurrencyPair;
use crate::error::{ForexError, ForexResult};

/// An exchange rate between two currencies at a specific moment in time.
///
/// The value is compared numerically, so `1.50` and `1.5` are the same rate.
/// Hashing uses the normalized decimal to stay consistent with that.
///
/// # Example
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use rust_decimal_macros::dec;
/// use simpleforex_core::types::{CurrencyPair, ExchangeRate};
///
/// let pair = CurrencyPair::from_iso_codes("GBP", "USD").unwrap();
/// let at = Utc.with_ymd_and_hms(2025, 12, 31, 16, 0, 0).unwrap();
///
/// let a = ExchangeRate::new(pair, dec!(1.50), at).unwrap();
/// let b = ExchangeRate::new(pair, dec!(1.5), at).unwrap();
/// assert_eq!(a, b);
/// assert!(ExchangeRate::new(pair, dec!(0), at).is_err());
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "RawExchangeRate")]
pub struct ExchangeRate {
    currency_pair: CurrencyPair,
    value: Decimal,
    timestamp: DateTime<Utc>,
}

impl ExchangeRate {
    /// Creates a new exchange rate.
    ///
    /// # Errors
    ///
    /// Returns `ForexError::InvalidArgument` if `value` is zero or negative.
    pub fn new(
        currency_pair: CurrencyPair,
        value: Decimal,
        timestamp: DateTime<Utc>,
    ) -> ForexResult<Self> {
        if value <= Decimal::ZERO {
            return Err(ForexError::invalid_argument(format!(
                "the value of an exchange rate must be positive, got {value}"
            )));
        }
        Ok(Self {
            currency_pair,
            value,
            timestamp,
        })
    }

    /// Creates a builder for assembling a rate field by field.
    #[must_use]
    pub fn builder() -> ExchangeRateBuilder {
        ExchangeRateBuilder::default()
    }

    /// Returns the currency pair.
    #[must_use]
    pub fn currency_pair(&self) -> CurrencyPair {
        self.currency_pair
    }

    /// Returns the numeric value, with the scale it was created with.
    #[must_use]
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Returns the instant this rate was recorded.
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the UTC calendar date of the timestamp.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}

impl PartialEq for ExchangeRate {
    fn eq(&self, other: &Self) -> bool {
        self.currency_pair == other.currency_pair
            && self.value.cmp(&other.value).is_eq()
            && self.timestamp == other.timestamp
    }
}

impl Eq for ExchangeRate {}

impl Hash for ExchangeRate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.currency_pair.hash(state);
        let normalized = self.value.normalize();
        normalized.mantissa().hash(state);
        normalized.scale().hash(state);
        self.timestamp.hash(state);
    }
}

/// Concise, human-readable form: pair, plain decimal value and timestamp.
///
/// Unlike [`CurrencyPair`], the exact layout is not a stable format.
impl fmt::Display for ExchangeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.currency_pair,
            self.value,
            self.timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)
        )
    }
}

/// Wire shape; every field may be missing so that absence maps to
/// `ForexError::NullArgument` instead of a generic serde error.
#[derive(Deserialize)]
struct RawExchangeRate {
    #[serde(default)]
    currency_pair: Option<CurrencyPair>,
    #[serde(default)]
    value: Option<Decimal>,
    #[serde(default)]
    timestamp: Option<DateTime<Utc>>,
}

impl TryFrom<RawExchangeRate> for ExchangeRate {
    type Error = ForexError;

    fn try_from(raw: RawExchangeRate) -> Result<Self, Self::Error> {
        ExchangeRateBuilder {
            currency_pair: raw.currency_pair,
            value: raw.value,
            timestamp: raw.timestamp,
        }
        .build()
    }
}

/// Builder for [`ExchangeRate`].
#[derive(Debug, Clone, Default)]
pub struct ExchangeRateBuilder {
    currency_pair: Option<CurrencyPair>,
    value: Option<Decimal>,
    timestamp: Option<DateTime<Utc>>,
}

impl ExchangeRateBuilder {
    /// Set the currency pair
    #[must_use]
    pub fn currency_pair(mut self, pair: CurrencyPair) -> Self {
        self.currency_pair = Some(pair);
        self
    }

    /// Set the rate value
    #[must_use]
    pub fn value(mut self, value: Decimal) -> Self {
        self.value = Some(value);
        self
    }

    /// Set the timestamp
    #[must_use]
    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Build the exchange rate
    ///
    /// # Errors
    ///
    /// Returns `ForexError::NullArgument` if a field was never set, and
    /// `ForexError::InvalidArgument` if the value is not positive.
    pub fn build(self) -> ForexResult<ExchangeRate> {
        let currency_pair = self
            .currency_pair
            .ok_or_else(|| ForexError::null_argument("currency_pair"))?;
        let value = self.value.ok_or_else(|| ForexError::null_argument("value"))?;
        let timestamp = self
            .timestamp
            .ok_or_else(|| ForexError::null_argument("timestamp"))?;
        ExchangeRate::new(currency_pair, value, timestamp)
    }
}
