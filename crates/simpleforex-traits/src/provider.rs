//! Forex data provider trait.
//!
//! [`ForexDataProvider`] is the capability every data source implements,
//! whether it is backed by an HTTP API, a file or a database. Queries behave
//! like an SQL `SELECT`: they return what they find, and finding nothing is an
//! empty result rather than an error.
//!
//! | Operation | Kind | Description |
//! |-----------|------|-------------|
//! | [`exchange_rates_in`](ForexDataProvider::exchange_rates_in) | required | Rates for a set of pairs over a date range |
//! | [`find_exchange_rate`](ForexDataProvider::find_exchange_rate) | required | Rate for one pair on one date |
//! | [`exchange_rates`](ForexDataProvider::exchange_rates) | default | Rates for a set of pairs on one date |
//! | [`exchange_rates_between`](ForexDataProvider::exchange_rates_between) | default | Rates between two dates given in any order |
//! | [`supported_currencies`](ForexDataProvider::supported_currencies) | default | Currencies the provider serves |
//! | [`earliest_supported_date`](ForexDataProvider::earliest_supported_date) | default | Advisory lower bound of the data |

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::DataSourceError;
use simpleforex_core::{Currency, CurrencyPair, DateRange, ExchangeRate};

/// Finite sequence of exchange rates returned by a provider query.
///
/// Each call returns a fresh sequence owned by the caller. Implementations may
/// compute the elements lazily or hand over an already collected batch.
pub struct ExchangeRates {
    inner: Box<dyn Iterator<Item = ExchangeRate> + Send>,
}

impl ExchangeRates {
    /// Wraps any owned, sendable iterator of rates.
    pub fn new<I>(rates: I) -> Self
    where
        I: IntoIterator<Item = ExchangeRate>,
        I::IntoIter: Send + 'static,
    {
        Self {
            inner: Box::new(rates.into_iter()),
        }
    }

    /// An empty result, the answer to "nothing found".
    #[must_use]
    pub fn empty() -> Self {
        Self::new(std::iter::empty())
    }
}

impl Iterator for ExchangeRates {
    type Item = ExchangeRate;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl From<Vec<ExchangeRate>> for ExchangeRates {
    fn from(rates: Vec<ExchangeRate>) -> Self {
        Self::new(rates)
    }
}

impl FromIterator<ExchangeRate> for ExchangeRates {
    fn from_iter<T: IntoIterator<Item = ExchangeRate>>(iter: T) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl fmt::Debug for ExchangeRates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExchangeRates")
            .field("size_hint", &self.inner.size_hint())
            .finish_non_exhaustive()
    }
}

/// An abstract provider of currency and exchange rate data.
///
/// The `pairs` argument is only borrowed for the duration of a call, and the
/// returned [`ExchangeRates`] owns its data, so an implementation keeps its
/// own copy of any criteria it needs past the call.
#[async_trait]
pub trait ForexDataProvider: Send + Sync {
    /// Fetches rates of the given pairs within an inclusive date range.
    ///
    /// The result may omit any pair or date for which the source has no
    /// data, and is empty if nothing matches.
    async fn exchange_rates_in(
        &self,
        pairs: &HashSet<CurrencyPair>,
        range: DateRange,
    ) -> Result<ExchangeRates, DataSourceError>;

    /// Finds the rate of one pair on one date, `None` if there is none.
    async fn find_exchange_rate(
        &self,
        pair: &CurrencyPair,
        date: NaiveDate,
    ) -> Result<Option<ExchangeRate>, DataSourceError>;

    /// Fetches rates of the given pairs on a single date.
    ///
    /// If you request `USDCAD` and `EURCHF` on December 31st, you might only
    /// get `USDCAD` back when `EURCHF` has no rate on that date.
    async fn exchange_rates(
        &self,
        pairs: &HashSet<CurrencyPair>,
        date: NaiveDate,
    ) -> Result<ExchangeRates, DataSourceError> {
        self.exchange_rates_in(pairs, DateRange::single(date)).await
    }

    /// Fetches rates of the given pairs between two dates, both inclusive.
    ///
    /// The order of the dates does not matter, and equal dates behave like
    /// [`exchange_rates`](Self::exchange_rates).
    async fn exchange_rates_between(
        &self,
        pairs: &HashSet<CurrencyPair>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<ExchangeRates, DataSourceError> {
        self.exchange_rates_in(pairs, DateRange::new(start, end)).await
    }

    /// Returns all currencies supported by this provider.
    ///
    /// Defaults to the whole ISO 4217 registry; sources with narrower
    /// coverage should report only what they serve.
    fn supported_currencies(&self) -> Box<dyn Iterator<Item = Currency> + Send> {
        Box::new(Currency::all())
    }

    /// Returns the earliest date this provider has data for.
    ///
    /// `NaiveDate::MIN` means there is no known lower bound. The value is
    /// advisory: other methods do not enforce it.
    fn earliest_supported_date(&self) -> NaiveDate {
        NaiveDate::MIN
    }
}

#[async_trait]
impl<P: ForexDataProvider + ?Sized> ForexDataProvider for Arc<P> {
    async fn exchange_rates_in(
        &self,
        pairs: &HashSet<CurrencyPair>,
        range: DateRange,
    ) -> Result<ExchangeRates, DataSourceError> {
        (**self).exchange_rates_in(pairs, range).await
    }

    async fn find_exchange_rate(
        &self,
        pair: &CurrencyPair,
        date: NaiveDate,
    ) -> Result<Option<ExchangeRate>, DataSourceError> {
        (**self).find_exchange_rate(pair, date).await
    }

    async fn exchange_rates(
        &self,
        pairs: &HashSet<CurrencyPair>,
        date: NaiveDate,
    ) -> Result<ExchangeRates, DataSourceError> {
        (**self).exchange_rates(pairs, date).await
    }

    async fn exchange_rates_between(
        &self,
        pairs: &HashSet<CurrencyPair>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<ExchangeRates, DataSourceError> {
        (**self).exchange_rates_between(pairs, start, end).await
    }

    fn supported_currencies(&self) -> Box<dyn Iterator<Item = Currency> + Send> {
        (**self).supported_currencies()
    }

    fn earliest_supported_date(&self) -> NaiveDate {
        (**self).earliest_supported_date()
    }
}

#[async_trait]
impl<P: ForexDataProvider + ?Sized> ForexDataProvider for Box<P> {
    async fn exchange_rates_in(
        &self,
        pairs: &HashSet<CurrencyPair>,
        range: DateRange,
    ) -> Result<ExchangeRates, DataSourceError> {
        (**self).exchange_rates_in(pairs, range).await
    }

    async fn find_exchange_rate(
        &self,
        pair: &CurrencyPair,
        date: NaiveDate,
    ) -> Result<Option<ExchangeRate>, DataSourceError> {
        (**self).find_exchange_rate(pair, date).await
    }

    async fn exchange_rates(
        &self,
        pairs: &HashSet<CurrencyPair>,
        date: NaiveDate,
    ) -> Result<ExchangeRates, DataSourceError> {
        (**self).exchange_rates(pairs, date).await
    }

    async fn exchange_rates_between(
        &self,
        pairs: &HashSet<CurrencyPair>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<ExchangeRates, DataSourceError> {
        (**self).exchange_rates_between(pairs, start, end).await
    }

    fn supported_currencies(&self) -> Box<dyn Iterator<Item = Currency> + Send> {
        (**self).supported_currencies()
    }

    fn earliest_supported_date(&self) -> NaiveDate {
        (**self).earliest_supported_date()
    }
}
