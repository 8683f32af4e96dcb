//! Error types for data provider operations.

use simpleforex_core::ForexError;
use thiserror::Error;

/// Error raised by a forex data source.
///
/// "No data for this query" is never an error; providers return an empty
/// result instead. These variants cover the data source itself misbehaving.
#[derive(Debug, Error)]
pub enum DataSourceError {
    /// Source not available
    #[error("source not available: {0}")]
    Unavailable(String),

    /// Connection to external service failed
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Operation timed out
    #[error("timeout")]
    Timeout,

    /// Rate limited
    #[error("rate limited")]
    RateLimited,

    /// Upstream payload could not be parsed
    #[error("parse error: {0}")]
    ParseError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(String),

    /// Invalid provider configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ForexError),
}

impl DataSourceError {
    /// Returns true if retrying the same request may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Unavailable(_) | Self::ConnectionFailed(_) | Self::Timeout | Self::RateLimited
        )
    }
}

impl From<std::io::Error> for DataSourceError {
    fn from(e: std::io::Error) -> Self {
        DataSourceError::IoError(e.to_string())
    }
}
