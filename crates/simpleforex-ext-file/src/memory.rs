//! In-process forex data providers.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::DashMap;
use log::debug;

use simpleforex_core::{Currency, CurrencyPair, DateRange, ExchangeRate};
use simpleforex_traits::{DataSourceError, ExchangeRates, ForexDataProvider};

// =============================================================================
// EMPTY PROVIDER
// =============================================================================

/// Provider with no data, for testing and as a placeholder.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyForexDataProvider;

#[async_trait]
impl ForexDataProvider for EmptyForexDataProvider {
    async fn exchange_rates_in(
        &self,
        _pairs: &HashSet<CurrencyPair>,
        _range: DateRange,
    ) -> Result<ExchangeRates, DataSourceError> {
        Ok(ExchangeRates::empty())
    }

    async fn find_exchange_rate(
        &self,
        _pair: &CurrencyPair,
        _date: NaiveDate,
    ) -> Result<Option<ExchangeRate>, DataSourceError> {
        Ok(None)
    }

    fn supported_currencies(&self) -> Box<dyn Iterator<Item = Currency> + Send> {
        Box::new(std::iter::empty())
    }
}

// =============================================================================
// IN-MEMORY PROVIDER
// =============================================================================

/// Thread-safe in-memory store of exchange rates.
///
/// Holds at most one rate per pair and UTC calendar date: when two rates fall
/// on the same date, the one with the later timestamp wins.
#[derive(Debug, Default)]
pub struct InMemoryForexDataProvider {
    rates: DashMap<CurrencyPair, BTreeMap<NaiveDate, ExchangeRate>>,
}

impl InMemoryForexDataProvider {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a rate. Returns false if a later rate for the same pair and
    /// date is already present, in which case the store is unchanged.
    pub fn insert(&self, rate: ExchangeRate) -> bool {
        let date = rate.date();
        let mut by_date = self.rates.entry(rate.currency_pair()).or_default();
        if by_date
            .get(&date)
            .is_some_and(|existing| existing.timestamp() > rate.timestamp())
        {
            return false;
        }
        by_date.insert(date, rate);
        true
    }

    /// Stores every rate, returning how many were kept.
    pub fn extend(&self, rates: impl IntoIterator<Item = ExchangeRate>) -> usize {
        rates.into_iter().filter(|rate| self.insert(*rate)).count()
    }

    /// Number of stored rates across all pairs.
    pub fn len(&self) -> usize {
        self.rates.iter().map(|entry| entry.value().len()).sum()
    }

    /// Returns true if no rate is stored.
    pub fn is_empty(&self) -> bool {
        self.rates.iter().all(|entry| entry.value().is_empty())
    }

    /// Removes every stored rate.
    pub fn clear(&self) {
        self.rates.clear();
    }

    /// Pairs with at least one stored rate, in ascending order.
    pub fn pairs(&self) -> Vec<CurrencyPair> {
        let mut pairs: Vec<_> = self.rates.iter().map(|entry| *entry.key()).collect();
        pairs.sort_unstable();
        pairs
    }

    /// Earliest stored date, if any.
    pub fn earliest_date(&self) -> Option<NaiveDate> {
        self.rates
            .iter()
            .filter_map(|entry| entry.value().keys().next().copied())
            .min()
    }

    /// Currencies appearing in any stored pair, in code order.
    pub fn currencies(&self) -> BTreeSet<Currency> {
        self.rates
            .iter()
            .flat_map(|entry| [entry.key().base(), entry.key().quote()])
            .collect()
    }

    fn select(&self, pairs: &HashSet<CurrencyPair>, range: DateRange) -> Vec<ExchangeRate> {
        let mut wanted: Vec<_> = pairs.iter().copied().collect();
        wanted.sort_unstable();

        let mut found = Vec::new();
        for pair in wanted {
            if let Some(by_date) = self.rates.get(&pair) {
                found.extend(by_date.range(range.start()..=range.end()).map(|(_, r)| *r));
            }
        }
        found
    }
}

impl FromIterator<ExchangeRate> for InMemoryForexDataProvider {
    fn from_iter<T: IntoIterator<Item = ExchangeRate>>(iter: T) -> Self {
        let provider = Self::new();
        provider.extend(iter);
        provider
    }
}

#[async_trait]
impl ForexDataProvider for InMemoryForexDataProvider {
    async fn exchange_rates_in(
        &self,
        pairs: &HashSet<CurrencyPair>,
        range: DateRange,
    ) -> Result<ExchangeRates, DataSourceError> {
        let found = self.select(pairs, range);
        debug!(
            "{} rates for {} pairs in {}",
            found.len(),
            pairs.len(),
            range
        );
        Ok(ExchangeRates::from(found))
    }

    async fn find_exchange_rate(
        &self,
        pair: &CurrencyPair,
        date: NaiveDate,
    ) -> Result<Option<ExchangeRate>, DataSourceError> {
        Ok(self
            .rates
            .get(pair)
            .and_then(|by_date| by_date.get(&date).copied()))
    }

    fn supported_currencies(&self) -> Box<dyn Iterator<Item = Currency> + Send> {
        Box::new(self.currencies().into_iter())
    }

    fn earliest_supported_date(&self) -> NaiveDate {
        self.earliest_date().unwrap_or(NaiveDate::MIN)
    }
}
