//! File source configuration.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use simpleforex_core::Currency;
use simpleforex_traits::DataSourceError;

/// Configuration of a CSV-backed forex data provider.
///
/// ```toml
/// path = "data/rates.csv"
/// earliest_date = "1999-01-04"
/// currencies = ["EUR", "USD", "JPY"]
/// skip_invalid_rows = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSourceConfig {
    /// CSV file with `pair,value,timestamp` rows
    pub path: PathBuf,

    /// Overrides the earliest date derived from the loaded data
    #[serde(default)]
    pub earliest_date: Option<NaiveDate>,

    /// Only rows whose pair uses these currencies are loaded
    #[serde(default)]
    pub currencies: Option<BTreeSet<Currency>>,

    /// Skip malformed rows with a warning instead of failing the load
    #[serde(default = "default_true")]
    pub skip_invalid_rows: bool,
}

fn default_true() -> bool {
    true
}

impl FileSourceConfig {
    /// Creates a configuration for the given file with default settings.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            earliest_date: None,
            currencies: None,
            skip_invalid_rows: default_true(),
        }
    }

    /// Restricts the source to the given currencies.
    #[must_use]
    pub fn with_currencies(mut self, currencies: impl IntoIterator<Item = Currency>) -> Self {
        self.currencies = Some(currencies.into_iter().collect());
        self
    }

    /// Sets the advertised earliest date.
    #[must_use]
    pub fn with_earliest_date(mut self, date: NaiveDate) -> Self {
        self.earliest_date = Some(date);
        self
    }

    /// Fails the load on the first malformed row.
    #[must_use]
    pub fn strict(mut self) -> Self {
        self.skip_invalid_rows = false;
        self
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DataSourceError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| DataSourceError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, DataSourceError> {
        toml::from_str(content).map_err(|e| DataSourceError::Config(e.to_string()))
    }

    /// Returns true if the currency passes the whitelist.
    pub fn allows(&self, currency: Currency) -> bool {
        self.currencies
            .as_ref()
            .map_or(true, |allowed| allowed.contains(&currency))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = FileSourceConfig::from_toml_str(r#"path = "rates.csv""#).unwrap();
        assert_eq!(config, FileSourceConfig::new("rates.csv"));
        assert!(config.skip_invalid_rows);
        assert!(config.allows(Currency::XAU));
    }

    #[test]
    fn test_full_document() {
        let config = FileSourceConfig::from_toml_str(
            r#"
            path = "data/rates.csv"
            earliest_date = "1999-01-04"
            currencies = ["EUR", "USD"]
            skip_invalid_rows = false
            "#,
        )
        .unwrap();

        let expected = FileSourceConfig::new("data/rates.csv")
            .with_earliest_date(NaiveDate::from_ymd_opt(1999, 1, 4).unwrap())
            .with_currencies([Currency::USD, Currency::EUR])
            .strict();
        assert_eq!(config, expected);
        assert!(config.allows(Currency::EUR));
        assert!(!config.allows(Currency::GBP));
    }

    #[test]
    fn test_rejects_unknown_currency() {
        let err = FileSourceConfig::from_toml_str(
            r#"
            path = "rates.csv"
            currencies = ["EUR", "ABC"]
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, DataSourceError::Config(_)));
    }

    #[test]
    fn test_missing_path_is_config_error() {
        let err = FileSourceConfig::from_toml_str("skip_invalid_rows = true").unwrap_err();
        assert!(matches!(err, DataSourceError::Config(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "path = \"/var/lib/forex/rates.csv\"").unwrap();
        let config = FileSourceConfig::from_file(file.path()).unwrap();
        assert_eq!(config.path, PathBuf::from("/var/lib/forex/rates.csv"));

        let err = FileSourceConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, DataSourceError::Config(_)));
    }
}
