//! Store error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from credential and snapshot persistence.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The selected backend cannot be opened (missing settings, unreachable
    /// database, failed migration). Fatal for the process.
    #[error("Store configuration error: {0}")]
    Configuration(String),

    /// Reading or writing a local file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A stored document exists but is not valid JSON for its type.
    #[error("Stored {what} is malformed: {source}")]
    Corrupt {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be serialized for storage.
    #[error("Failed to encode {what}: {source}")]
    Encode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),
}

impl StoreError {
    /// Configuration errors end the process; everything else is a command failure.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
