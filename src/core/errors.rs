//! Shared error types for the application

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for trafficminer operations
///
/// Only run-level and I/O failures live here. A body that fails to parse or
/// a URL that cannot be decomposed is handled inside the pipeline and never
/// becomes an `Error`.
#[derive(Debug, Error)]
pub enum Error {
    /// The transaction history could not be enumerated; the run is aborted
    #[error("Unable to read transaction history: {message}")]
    HistoryUnavailable {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A run was stopped through its cancellation token
    #[error("Run cancelled after {processed} transactions")]
    Cancelled { processed: usize },

    /// Writing an export file failed
    #[error("Failed to export results to {path}: {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a history error from a message alone
    pub fn history(message: impl Into<String>) -> Self {
        Self::HistoryUnavailable {
            message: message.into(),
            source: None,
        }
    }

    /// Create a history error wrapping the underlying cause
    pub fn history_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::HistoryUnavailable {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_history_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.har");
        let err = Error::history_with_source("cannot open capture", io);

        assert_eq!(
            err.to_string(),
            "Unable to read transaction history: cannot open capture"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn test_export_error_names_path() {
        let err = Error::Export {
            path: PathBuf::from("/tmp/out.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("/tmp/out.json"));
    }
}
