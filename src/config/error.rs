//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for configuration operations.
///
/// Covers errors from parsing, validation, and file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write a generated file (for init command).
    #[error("Failed to write file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Refused to overwrite an existing file without `--force`.
    #[error("File '{}' already exists (use --force to overwrite)", path.display())]
    AlreadyExists {
        /// Path to the existing file
        path: PathBuf,
    },

    /// Invalid line ending value.
    #[error("Invalid line ending '{value}': expected lf, crlf, or preserve")]
    InvalidLineEnding {
        /// The invalid value provided
        value: String,
    },

    /// Invalid regex pattern for dump filtering.
    #[error("Invalid regex pattern '{pattern}': {source}")]
    InvalidRegex {
        /// The invalid pattern
        pattern: String,
        /// Underlying regex error
        #[source]
        source: regex::Error,
    },
}
