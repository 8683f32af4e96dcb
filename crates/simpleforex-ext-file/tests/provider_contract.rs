//! Behaviour every provider in this crate shares, checked through `dyn ForexDataProvider`.

use std::collections::HashSet;
use std::io::Write;
use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use tempfile::NamedTempFile;

use simpleforex_core::{Currency, CurrencyPair, ExchangeRate};
use simpleforex_ext_file::{
    create_empty_provider, create_file_provider, FileSourceConfig, InMemoryForexDataProvider,
};
use simpleforex_traits::ForexDataProvider;

const RATES: &str = "\
pair,value,timestamp
EURUSD,1.0351,2025-12-29T16:00:00Z
EURUSD,1.0402,2025-12-30T16:00:00Z
EURUSD,1.0423,2025-12-31T16:00:00Z
USDCAD,1.4388,2025-12-29T16:00:00Z
USDCAD,1.4375,2025-12-31T16:00:00Z
USDJPY,157.20,2025-12-30T16:00:00Z
EURCHF,0.9390,2025-12-31T16:00:00Z
";

fn rates_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(RATES.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn pair(s: &str) -> CurrencyPair {
    s.parse().unwrap()
}

fn pairs(codes: &[&str]) -> HashSet<CurrencyPair> {
    codes.iter().map(|p| pair(p)).collect()
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 12, d).unwrap()
}

fn sorted(rates: impl Iterator<Item = ExchangeRate>) -> Vec<ExchangeRate> {
    let mut rates: Vec<_> = rates.collect();
    rates.sort_by_key(|r| (r.currency_pair(), r.timestamp()));
    rates
}

/// The CSV provider and an in-memory copy of the same file.
fn providers(file: &NamedTempFile) -> Vec<Arc<dyn ForexDataProvider>> {
    let csv = create_file_provider(&FileSourceConfig::new(file.path())).unwrap();
    let memory = InMemoryForexDataProvider::new();
    for line in RATES.lines().skip(1) {
        let fields: Vec<_> = line.split(',').collect();
        let rate = ExchangeRate::builder()
            .currency_pair(pair(fields[0]))
            .value(fields[1].parse().unwrap())
            .timestamp(fields[2].parse().unwrap())
            .build()
            .unwrap();
        memory.insert(rate);
    }
    vec![csv, Arc::new(memory)]
}

#[tokio::test]
async fn partial_results_on_a_single_date() {
    let file = rates_file();
    for provider in providers(&file) {
        // Asking for USDCAD and EURCHF on the 30th only finds neither
        let none = provider
            .exchange_rates(&pairs(&["USDCAD", "EURCHF"]), day(30))
            .await
            .unwrap();
        assert_eq!(none.count(), 0);

        // On the 31st both exist, on the 29th only USDCAD does
        let both = provider
            .exchange_rates(&pairs(&["USDCAD", "EURCHF"]), day(31))
            .await
            .unwrap();
        assert_eq!(both.count(), 2);
        let one: Vec<_> = provider
            .exchange_rates(&pairs(&["USDCAD", "EURCHF"]), day(29))
            .await
            .unwrap()
            .collect();
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].currency_pair(), pair("USDCAD"));
    }
}

#[tokio::test]
async fn boundary_order_does_not_matter() {
    let file = rates_file();
    let wanted = pairs(&["EURUSD", "USDJPY", "USDCAD"]);
    for provider in providers(&file) {
        let forward = provider
            .exchange_rates_between(&wanted, day(29), day(31))
            .await
            .unwrap();
        let backward = provider
            .exchange_rates_between(&wanted, day(31), day(29))
            .await
            .unwrap();
        let forward = sorted(forward);
        assert_eq!(forward.len(), 6);
        assert_eq!(forward, sorted(backward));
    }
}

#[tokio::test]
async fn single_day_range_equals_single_date() {
    let file = rates_file();
    let wanted = pairs(&["EURUSD", "USDJPY", "USDCAD", "EURCHF"]);
    for provider in providers(&file) {
        for d in 28..=31 {
            let range = provider
                .exchange_rates_between(&wanted, day(d), day(d))
                .await
                .unwrap();
            let single = provider.exchange_rates(&wanted, day(d)).await.unwrap();
            assert_eq!(sorted(range), sorted(single));
        }
    }
}

#[tokio::test]
async fn no_data_is_empty_not_an_error() {
    let file = rates_file();
    let mut all = providers(&file);
    all.push(create_empty_provider());
    for provider in all {
        let rates = provider
            .exchange_rates_between(&pairs(&["GBPUSD"]), day(1), day(31))
            .await
            .unwrap();
        assert_eq!(rates.count(), 0);
        let rates = provider
            .exchange_rates(&HashSet::new(), day(31))
            .await
            .unwrap();
        assert_eq!(rates.count(), 0);
        assert!(provider
            .find_exchange_rate(&pair("USDEUR"), day(31))
            .await
            .unwrap()
            .is_none());
    }
}

#[tokio::test]
async fn find_matches_range_query() {
    let file = rates_file();
    for provider in providers(&file) {
        let found = provider
            .find_exchange_rate(&pair("USDJPY"), day(30))
            .await
            .unwrap()
            .unwrap();
        let listed: Vec<_> = provider
            .exchange_rates(&pairs(&["USDJPY"]), day(30))
            .await
            .unwrap()
            .collect();
        assert_eq!(listed, vec![found]);
        assert_eq!(found.to_string(), "USDJPY 157.20 2025-12-30T16:00:00Z");
    }
}

#[test]
fn metadata_reflects_loaded_data() {
    let file = rates_file();
    for provider in providers(&file) {
        assert_eq!(provider.earliest_supported_date(), day(29));
        assert_eq!(
            provider.supported_currencies().collect::<Vec<_>>(),
            vec![
                Currency::CAD,
                Currency::CHF,
                Currency::EUR,
                Currency::JPY,
                Currency::USD
            ]
        );
    }
}

#[test]
fn config_file_drives_the_factory() {
    let rates = rates_file();
    let mut config = NamedTempFile::new().unwrap();
    writeln!(config, "path = {:?}", rates.path().display().to_string()).unwrap();
    writeln!(config, "currencies = [\"USD\", \"CAD\"]").unwrap();
    config.flush().unwrap();

    let config = FileSourceConfig::from_file(config.path()).unwrap();
    let provider = create_file_provider(&config).unwrap();
    assert_eq!(
        provider.supported_currencies().collect::<Vec<_>>(),
        vec![Currency::CAD, Currency::USD]
    );
    assert_eq!(provider.earliest_supported_date(), day(29));
}

proptest! {
    #[test]
    fn range_queries_ignore_boundary_order(a in 0i64..6, b in 0i64..6) {
        let file = rates_file();
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let wanted = pairs(&["EURUSD", "USDJPY", "USDCAD", "EURCHF"]);
        let start = day(27) + Duration::days(a);
        let end = day(27) + Duration::days(b);

        for provider in providers(&file) {
            let (forward, backward, count) = runtime.block_on(async {
                let forward = provider.exchange_rates_between(&wanted, start, end).await.unwrap();
                let backward = provider.exchange_rates_between(&wanted, end, start).await.unwrap();
                let lo = start.min(end);
                let hi = start.max(end);
                let count = provider
                    .exchange_rates_between(&wanted, lo, hi)
                    .await
                    .unwrap()
                    .filter(|r| lo <= r.date() && r.date() <= hi)
                    .count();
                (sorted(forward), sorted(backward), count)
            });
            prop_assert_eq!(forward.len(), count);
            prop_assert_eq!(forward, backward);
        }
    }
}
