//! Error types for store operations.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for the configuration store.
///
/// Parse anomalies (malformed headers, lines without a delimiter) are never
/// errors; they stay in the document as inert lines. Only filesystem failures
/// and contract violations surface here.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The file to parse does not exist.
    #[error("Config file not found: '{}'", path.display())]
    NotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// Reading or writing the file failed.
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A key, section or value cannot be represented in the file format.
    #[error("Invalid {what} '{given}': {reason}")]
    InvalidArgument {
        /// Which argument was rejected
        what: &'static str,
        /// The rejected text
        given: String,
        /// Why it was rejected
        reason: &'static str,
    },

    /// The operation needs a parsed store (or a store with a path).
    #[error("Invalid store state for {operation}: {reason}")]
    InvalidState {
        /// Name of the attempted operation
        operation: &'static str,
        /// What is missing
        reason: &'static str,
    },

    /// A stored value could not be converted to the requested type.
    #[error("Invalid value '{value}' for [{section}] {key}: {reason}")]
    InvalidValue {
        /// Section of the value
        section: String,
        /// Key of the value
        key: String,
        /// Raw value text
        value: String,
        /// Conversion failure message
        reason: String,
    },
}

impl StoreError {
    /// Creates an `InvalidArgument` error.
    #[must_use]
    pub fn invalid_argument(what: &'static str, given: &str, reason: &'static str) -> Self {
        Self::InvalidArgument {
            what,
            given: given.to_string(),
            reason,
        }
    }

    /// Creates an `InvalidState` error for an operation on an unparsed store.
    #[must_use]
    pub const fn not_loaded(operation: &'static str) -> Self {
        Self::InvalidState {
            operation,
            reason: "no document has been parsed",
        }
    }

    /// Creates an `InvalidState` error for an operation that needs a path.
    #[must_use]
    pub const fn no_path(operation: &'static str) -> Self {
        Self::InvalidState {
            operation,
            reason: "store was not parsed from a file",
        }
    }

    /// Returns `true` for [`StoreError::NotFound`].
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
