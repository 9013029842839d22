//! Core error types for the Tradeboard engine.
//!
//! Public component operations absorb these errors at their boundary (a
//! missing or corrupt input degrades to "absent" data). The fallible helpers
//! underneath return them so callers can decide how loudly to log.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the engine.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read delimited data: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to decode JSON document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid file name pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),
}

impl Error {
    /// True when the error only says the input does not exist yet.
    ///
    /// Missing files and directories are the normal state before the trading
    /// engine's first run, so callers log these at debug level only.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_detected() {
        let err = Error::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(err.is_not_found());

        let err = Error::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "nope",
        ));
        assert!(!err.is_not_found());
        assert!(!Error::InvalidConfigValue("x".into()).is_not_found());
    }

    #[test]
    fn test_error_messages() {
        let err = Error::InvalidPattern {
            pattern: "[".into(),
            reason: "unbalanced".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid file name pattern '[': unbalanced"
        );
    }
}
