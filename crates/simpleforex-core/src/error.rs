//! Error types for SimpleForex value types.
//!
//! Both kinds are local validation failures raised before any I/O happens.
//! They are never used to signal "no data found"; providers report that
//! with an empty result.

use thiserror::Error;

/// A specialized Result type for SimpleForex operations.
pub type ForexResult<T> = Result<T, ForexError>;

/// The main error type for SimpleForex value types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ForexError {
    /// A required argument or field was absent.
    #[error("Null argument: {field} is required")]
    NullArgument {
        /// Name of the missing field.
        field: &'static str,
    },

    /// An argument was present but semantically invalid.
    #[error("Invalid argument: {reason}")]
    InvalidArgument {
        /// Description of what's invalid.
        reason: String,
    },
}

impl ForexError {
    /// Creates a null argument error.
    #[must_use]
    pub fn null_argument(field: &'static str) -> Self {
        Self::NullArgument { field }
    }

    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Returns true if this error reports a missing argument.
    #[must_use]
    pub fn is_null_argument(&self) -> bool {
        matches!(self, Self::NullArgument { .. })
    }

    /// Returns true if this error reports an invalid argument.
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ForexError::invalid_argument("currency pair base and quote cannot be identical");
        assert!(err.to_string().contains("Invalid argument"));
        assert!(err.to_string().contains("identical"));
    }

    #[test]
    fn test_null_argument_display() {
        let err = ForexError::null_argument("timestamp");
        assert_eq!(err.to_string(), "Null argument: timestamp is required");
        assert!(err.is_null_argument());
        assert!(!err.is_invalid_argument());
    }
}
