//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// How INI files are written
    #[serde(default)]
    pub store: StoreSection,

    /// Output of the `dump` command
    #[serde(default)]
    pub dump: DumpSection,
}

/// Store configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreSection {
    /// Line terminator: "lf", "crlf" or "preserve"
    pub line_ending: Option<String>,

    /// Write through a temporary file and rename (default: true)
    pub atomic_writes: Option<bool>,
}

/// Dump configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DumpSection {
    /// Print JSON instead of INI-style lines
    #[serde(default)]
    pub json: bool,

    /// Regex pattern keys must match to be printed
    pub filter: Option<String>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# launcher-ini Configuration File
# Place at <config dir>/launcher-ini/config.toml or pass with --config.

[store]
# Line terminator for written files (default: preserve)
# Accepted values: "lf"/"unix", "crlf"/"windows"/"dos", "preserve"/"auto"
# line_ending = "preserve"

# Write through a temporary file and rename it over the target (default: true)
# atomic_writes = true

[dump]
# Print JSON instead of INI-style lines
# json = false

# Only print keys matching this regex
# Note: --filter on the command line REPLACES this pattern
# filter = "^bot_"
"#
    .to_string()
}
