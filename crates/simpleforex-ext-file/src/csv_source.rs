//! CSV file forex data provider.

use std::collections::HashSet;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use log::{info, warn};
use parking_lot::RwLock;
use rust_decimal::Decimal;
use serde::Deserialize;

use simpleforex_core::{Currency, CurrencyPair, DateRange, ExchangeRate};
use simpleforex_traits::{DataSourceError, ExchangeRates, ForexDataProvider};

use crate::config::FileSourceConfig;
use crate::memory::InMemoryForexDataProvider;

/// CSV record for exchange rates.
///
/// Fields are read as text so that decimal scale survives parsing.
#[derive(Debug, Deserialize)]
struct RateRecord {
    pair: String,
    value: String,
    timestamp: String,
}

impl RateRecord {
    fn parse(&self) -> Result<ExchangeRate, String> {
        let pair = CurrencyPair::parse(self.pair.trim()).map_err(|e| e.to_string())?;
        let value = Decimal::from_str(self.value.trim())
            .map_err(|e| format!("value {:?}: {e}", self.value))?;
        let timestamp = DateTime::parse_from_rfc3339(self.timestamp.trim())
            .map_err(|e| format!("timestamp {:?}: {e}", self.timestamp))?
            .with_timezone(&Utc);
        ExchangeRate::new(pair, value, timestamp).map_err(|e| e.to_string())
    }
}

/// Forex data provider backed by a CSV file.
///
/// The file has a header row and one rate per line:
///
/// ```text
/// pair,value,timestamp
/// EURUSD,1.0842,2025-06-02T16:00:00Z
/// USDJPY,144.37,2025-06-02T16:00:00Z
/// ```
///
/// Rates are loaded into memory on construction and on [`reload`](Self::reload).
/// A missing file yields an empty source.
#[derive(Debug)]
pub struct CsvForexDataProvider {
    config: FileSourceConfig,
    rates: RwLock<Arc<InMemoryForexDataProvider>>,
}

impl CsvForexDataProvider {
    /// Create a provider for the configured file and load it.
    pub fn new(config: FileSourceConfig) -> Result<Self, DataSourceError> {
        let source = Self {
            config,
            rates: RwLock::new(Arc::new(InMemoryForexDataProvider::new())),
        };
        source.reload()?;
        Ok(source)
    }

    /// Returns the configuration this provider was built from.
    pub fn config(&self) -> &FileSourceConfig {
        &self.config
    }

    /// Number of loaded rates.
    pub fn len(&self) -> usize {
        self.current().len()
    }

    /// Returns true if no rate is loaded.
    pub fn is_empty(&self) -> bool {
        self.current().is_empty()
    }

    /// Snapshot of the loaded rates; the lock is released before returning.
    fn current(&self) -> Arc<InMemoryForexDataProvider> {
        Arc::clone(&self.rates.read())
    }

    /// Reload rates from file.
    ///
    /// The whole file is parsed into a new store which then replaces the
    /// current one in a single step. Queries see either the old or the new
    /// rates, never a partial load, and a failed reload keeps the old ones.
    pub fn reload(&self) -> Result<(), DataSourceError> {
        let path = &self.config.path;
        if !path.exists() {
            info!("{} not found, serving no rates", path.display());
            *self.rates.write() = Arc::new(InMemoryForexDataProvider::new());
            return Ok(());
        }

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| DataSourceError::IoError(e.to_string()))?;

        let mut loaded = Vec::new();
        let mut skipped = 0usize;
        for (index, result) in reader.deserialize::<RateRecord>().enumerate() {
            // Header is line 1
            let line = index + 2;
            let parsed = result
                .map_err(|e| e.to_string())
                .and_then(|record| record.parse());

            match parsed {
                Ok(rate) if self.accepts(&rate) => loaded.push(rate),
                Ok(_) => {}
                Err(reason) if self.config.skip_invalid_rows => {
                    warn!("{}:{line}: skipping row: {reason}", path.display());
                    skipped += 1;
                }
                Err(reason) => {
                    return Err(DataSourceError::ParseError(format!(
                        "{}:{line}: {reason}",
                        path.display()
                    )));
                }
            }
        }

        let fresh = InMemoryForexDataProvider::new();
        let kept = fresh.extend(loaded);
        *self.rates.write() = Arc::new(fresh);
        info!(
            "loaded {kept} exchange rates from {} ({skipped} rows skipped)",
            path.display()
        );
        Ok(())
    }

    fn accepts(&self, rate: &ExchangeRate) -> bool {
        let pair = rate.currency_pair();
        self.config.allows(pair.base()) && self.config.allows(pair.quote())
    }
}

#[async_trait]
impl ForexDataProvider for CsvForexDataProvider {
    async fn exchange_rates_in(
        &self,
        pairs: &HashSet<CurrencyPair>,
        range: DateRange,
    ) -> Result<ExchangeRates, DataSourceError> {
        self.current().exchange_rates_in(pairs, range).await
    }

    async fn find_exchange_rate(
        &self,
        pair: &CurrencyPair,
        date: NaiveDate,
    ) -> Result<Option<ExchangeRate>, DataSourceError> {
        self.current().find_exchange_rate(pair, date).await
    }

    fn supported_currencies(&self) -> Box<dyn Iterator<Item = Currency> + Send> {
        match &self.config.currencies {
            Some(allowed) => Box::new(allowed.clone().into_iter()),
            None => self.current().supported_currencies(),
        }
    }

    fn earliest_supported_date(&self) -> NaiveDate {
        self.config
            .earliest_date
            .unwrap_or_else(|| self.current().earliest_supported_date())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    fn pair(s: &str) -> CurrencyPair {
        s.parse().unwrap()
    }

    const RATES: &str = "\
pair,value,timestamp
EURUSD,1.0842,2025-06-02T16:00:00Z
USDJPY,144.37,2025-06-02T16:00:00Z
EURUSD,1.0851,2025-06-03T16:00:00+00:00
GBPUSD,1.3520,2025-06-03T23:30:00-02:00
";

    #[test]
    fn test_missing_file_is_empty_source() {
        let provider =
            CsvForexDataProvider::new(FileSourceConfig::new("/no/such/rates.csv")).unwrap();
        assert!(provider.is_empty());
        assert_eq!(provider.earliest_supported_date(), NaiveDate::MIN);
    }

    #[tokio::test]
    async fn test_load_and_query() {
        let file = csv_file(RATES);
        let provider = CsvForexDataProvider::new(FileSourceConfig::new(file.path())).unwrap();
        assert_eq!(provider.len(), 4);

        let rate = provider
            .find_exchange_rate(&pair("EURUSD"), day(2))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(rate.value(), dec!(1.0842));
        assert_eq!(rate.value().scale(), 4);

        // 23:30 at UTC-2 is the next UTC day
        let gbp = provider.find_exchange_rate(&pair("GBPUSD"), day(4)).await.unwrap();
        assert_eq!(gbp.map(|r| r.value()), Some(dec!(1.352)));

        assert_eq!(provider.earliest_supported_date(), day(2));
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let file = csv_file(
            "pair,value,timestamp
EURUSD,1.0842,2025-06-02T16:00:00Z
EUREUR,1.0,2025-06-02T16:00:00Z
USDJPY,-1,2025-06-02T16:00:00Z
USDCAD,abc,2025-06-02T16:00:00Z
USDCHF,0.82,yesterday
GBPUSD,1.35
",
        );
        let provider = CsvForexDataProvider::new(FileSourceConfig::new(file.path())).unwrap();
        assert_eq!(provider.len(), 1);
    }

    #[test]
    fn test_strict_mode_fails_on_malformed_row() {
        let file = csv_file(
            "pair,value,timestamp
EURUSD,1.0842,2025-06-02T16:00:00Z
USDJPY,0,2025-06-02T16:00:00Z
",
        );
        let err = CsvForexDataProvider::new(FileSourceConfig::new(file.path()).strict())
            .unwrap_err();
        match err {
            DataSourceError::ParseError(msg) => assert!(msg.contains(":3:"), "{msg}"),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_currency_whitelist() {
        let file = csv_file(RATES);
        let config = FileSourceConfig::new(file.path())
            .with_currencies([Currency::EUR, Currency::USD, Currency::CHF]);
        let provider = CsvForexDataProvider::new(config).unwrap();

        assert_eq!(provider.len(), 2);
        assert_eq!(
            provider.supported_currencies().collect::<Vec<_>>(),
            vec![Currency::CHF, Currency::EUR, Currency::USD]
        );
    }

    #[test]
    fn test_earliest_date_override() {
        let file = csv_file(RATES);
        let config = FileSourceConfig::new(file.path()).with_earliest_date(day(1));
        let provider = CsvForexDataProvider::new(config).unwrap();
        assert_eq!(provider.earliest_supported_date(), day(1));
    }

    #[test]
    fn test_reload() {
        let mut file = csv_file("pair,value,timestamp\nEURUSD,1.0842,2025-06-02T16:00:00Z\n");
        let config = FileSourceConfig::new(file.path()).strict();
        let provider = CsvForexDataProvider::new(config).unwrap();
        assert_eq!(provider.len(), 1);

        file.write_all(b"USDJPY,144.37,2025-06-02T16:00:00Z\n").unwrap();
        file.flush().unwrap();
        provider.reload().unwrap();
        assert_eq!(provider.len(), 2);

        file.write_all(b"not,a,row\n").unwrap();
        file.flush().unwrap();
        assert!(provider.reload().is_err());
        assert_eq!(provider.len(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_queries_during_reload_see_full_data() {
        let file = csv_file(RATES);
        let provider =
            Arc::new(CsvForexDataProvider::new(FileSourceConfig::new(file.path())).unwrap());

        let reloader = {
            let provider = Arc::clone(&provider);
            tokio::task::spawn_blocking(move || {
                for _ in 0..200 {
                    provider.reload().unwrap();
                }
            })
        };

        let wanted: HashSet<_> = [pair("EURUSD"), pair("USDJPY")].into_iter().collect();
        while !reloader.is_finished() {
            let rates = provider
                .exchange_rates_between(&wanted, day(1), day(30))
                .await
                .unwrap();
            assert_eq!(rates.count(), 3);
            assert!(provider
                .find_exchange_rate(&pair("USDJPY"), day(2))
                .await
                .unwrap()
                .is_some());
        }
        reloader.await.unwrap();
        assert_eq!(provider.len(), 4);
    }
}
