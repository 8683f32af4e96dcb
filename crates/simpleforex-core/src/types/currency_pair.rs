//! Currency pair type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Currency;
use crate::error::{ForexError, ForexResult};

/// A [pair of currencies](https://en.wikipedia.org/wiki/Currency_pair) in an exchange.
///
/// The *base* currency is the one being sold, the *quote* currency is the one
/// being bought. A pair never holds identical base and quote currencies, and
/// the order matters: EUR/USD and USD/EUR are different pairs.
///
/// # Example
///
/// ```rust
/// use simpleforex_core::types::{Currency, CurrencyPair};
///
/// let fiber = CurrencyPair::from_iso_codes("EUR", "USD").unwrap();
/// assert_eq!(fiber.to_string(), "EURUSD");
/// assert_eq!(fiber.swapped(), CurrencyPair::new(Currency::USD, Currency::EUR).unwrap());
/// assert_eq!(fiber.position_of(Currency::USD), Some(1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Option<String>", into = "String")]
pub struct CurrencyPair {
    base: Currency,
    quote: Currency,
}

impl CurrencyPair {
    /// Creates a new currency pair.
    ///
    /// # Errors
    ///
    /// Returns `ForexError::InvalidArgument` if `base` is equal to `quote`.
    pub fn new(base: Currency, quote: Currency) -> ForexResult<Self> {
        if base == quote {
            return Err(ForexError::invalid_argument(
                "currency pair base and quote cannot be identical",
            ));
        }
        Ok(Self { base, quote })
    }

    /// Creates a pair from two ISO 4217 currency codes.
    ///
    /// # Errors
    ///
    /// Returns `ForexError::InvalidArgument` if either code is not in the
    /// registry or both codes name the same currency.
    pub fn from_iso_codes(base_code: &str, quote_code: &str) -> ForexResult<Self> {
        let base = Currency::from_code(base_code)?;
        let quote = Currency::from_code(quote_code)?;
        Self::new(base, quote)
    }

    /// Parses the canonical six-letter form produced by `Display`.
    ///
    /// # Errors
    ///
    /// Returns `ForexError::InvalidArgument` if the input is not exactly two
    /// registered codes back to back, or names the same currency twice.
    pub fn parse(s: &str) -> ForexResult<Self> {
        if s.len() != 6 || !s.is_ascii() {
            return Err(ForexError::invalid_argument(format!(
                "currency pair must be 6 latin letters, got {s:?}"
            )));
        }
        let (base, quote) = s.split_at(3);
        Self::from_iso_codes(base, quote)
    }

    /// Returns the base currency.
    #[must_use]
    pub fn base(&self) -> Currency {
        self.base
    }

    /// Returns the quote currency.
    #[must_use]
    pub fn quote(&self) -> Currency {
        self.quote
    }

    /// Returns a new pair with the base and quote swapped.
    #[must_use]
    pub fn swapped(&self) -> Self {
        Self {
            base: self.quote,
            quote: self.base,
        }
    }

    /// Returns true if the currency is either the base or the quote.
    ///
    /// Passing `None` is allowed and yields `false`.
    #[must_use]
    pub fn involves(&self, currency: impl Into<Option<Currency>>) -> bool {
        self.position_of(currency).is_some()
    }

    /// Returns the slot of the currency in this pair: 0 for base, 1 for quote.
    ///
    /// Returns `None` if the currency is not involved or is `None` itself.
    #[must_use]
    pub fn position_of(&self, currency: impl Into<Option<Currency>>) -> Option<usize> {
        match currency.into() {
            Some(c) if c == self.base => Some(0),
            Some(c) if c == self.quote => Some(1),
            _ => None,
        }
    }
}

/// Concatenation of the two ISO 4217 codes, such as `EURUSD` or `USDJPY`.
///
/// This is the forex industry convention for web APIs and trading terminals,
/// and it is always six uppercase latin letters.
impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.base, self.quote)
    }
}

impl FromStr for CurrencyPair {
    type Err = ForexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<Option<String>> for CurrencyPair {
    type Error = ForexError;

    fn try_from(value: Option<String>) -> Result<Self, Self::Error> {
        let value = value.ok_or_else(|| ForexError::null_argument("currency_pair"))?;
        Self::parse(&value)
    }
}

impl From<CurrencyPair> for String {
    fn from(pair: CurrencyPair) -> Self {
        pair.to_string()
    }
}
