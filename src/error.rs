//! Error types for the matching engine
//!
//! Provides structured error types for storage class construction and
//! membership maintenance.

use thiserror::Error;

/// Unified error type for the matching engine
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    // =========================================================================
    // Data Integrity Errors
    // =========================================================================
    /// A pool was presented for matching without its capability map
    /// initialized. The defect originates in whatever subsystem built the
    /// pool; the caller decides whether to skip the pool or abort the batch.
    #[error(
        "Invalid pool state: pool {pool} has no capability map \
         (class {storage_class} requires attribute {attribute})"
    )]
    InvalidPoolState {
        storage_class: String,
        pool: String,
        attribute: String,
    },
}

impl Error {
    /// Check if this error indicates a data-integrity violation in another
    /// subsystem rather than bad caller input
    pub fn is_data_integrity(&self) -> bool {
        matches!(self, Error::InvalidPoolState { .. })
    }

    /// Check if this error is a construction-time configuration failure
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Configuration(_) | Error::JsonParse(_))
    }
}

/// Result type alias for the matching engine
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let err = Error::InvalidPoolState {
            storage_class: "gold".into(),
            pool: "pool-1".into(),
            attribute: "media".into(),
        };
        assert!(err.is_data_integrity());
        assert!(!err.is_configuration());

        let err = Error::Configuration("missing name".into());
        assert!(err.is_configuration());
        assert!(!err.is_data_integrity());
    }

    #[test]
    fn test_json_parse_conversion() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: Error = parse_err.into();
        assert!(err.is_configuration());
        assert!(err.to_string().starts_with("JSON parse error"));
    }
}
