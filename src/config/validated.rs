//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::Path;

use regex::Regex;

use crate::launcher::default_launcher_template;
use crate::store::{LineEnding, Persister};

use super::cli::{Cli, Command};
use super::defaults;
use super::error::ConfigError;
use super::toml::{TomlConfig, default_config_template};

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Line terminator for written files. `None` keeps the file's own.
    pub line_ending: Option<LineEnding>,

    /// Write through a temporary file and rename
    pub atomic_writes: bool,

    /// Print `dump` output as JSON
    pub dump_json: bool,

    /// Only dump keys matching this pattern
    pub dump_filter: Option<Regex>,

    /// Dry-run mode (print resulting documents without writing)
    pub dry_run: bool,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line_ending = self
            .line_ending
            .map_or_else(|| "preserve".to_string(), |e| e.to_string());
        let filter = self.dump_filter.as_ref().map_or("none", Regex::as_str);

        write!(
            f,
            "Config {{ line_ending: {line_ending}, atomic_writes: {}, dump_json: {}, \
             dump_filter: {filter}, dry_run: {} }}",
            self.atomic_writes, self.dump_json, self.dry_run,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The line ending value is unknown
    /// - The dump filter is not a valid regex
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let line_ending = Self::resolve_line_ending(cli, toml)?;

        // --no-atomic only disables; TOML decides otherwise
        let atomic_writes = !cli.no_atomic
            && toml
                .and_then(|t| t.store.atomic_writes)
                .unwrap_or(defaults::ATOMIC_WRITES);

        let cli_json = matches!(cli.command, Command::Dump { json: true, .. });
        let dump_json = cli_json || toml.is_some_and(|t| t.dump.json);

        let dump_filter = Self::resolve_dump_filter(cli, toml)?;

        Ok(Self {
            line_ending,
            atomic_writes,
            dump_json,
            dump_filter,
            dry_run: cli.dry_run,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path. Otherwise
    /// the default location is used when a file exists there.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let path = cli
            .config
            .clone()
            .or_else(|| defaults::config_path().filter(|p| p.is_file()));

        let toml = match path {
            Some(ref path) => {
                tracing::debug!("Loading config file {}", path.display());
                Some(TomlConfig::load(path)?)
            }
            None => None,
        };

        Self::from_raw(cli, toml.as_ref())
    }

    /// Returns the persister matching `atomic_writes`.
    #[must_use]
    pub const fn persister(&self) -> Persister {
        if self.atomic_writes {
            Persister::atomic()
        } else {
            Persister::direct()
        }
    }

    fn resolve_line_ending(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Option<LineEnding>, ConfigError> {
        // CLI takes precedence
        if let Some(arg) = cli.line_ending {
            return Ok(arg.into());
        }

        // Fall back to TOML, then preserve
        match toml.and_then(|t| t.store.line_ending.as_deref()) {
            Some(value) => parse_line_ending(value),
            None => Ok(None),
        }
    }

    fn resolve_dump_filter(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Option<Regex>, ConfigError> {
        // CLI pattern replaces the TOML one
        let cli_filter = match &cli.command {
            Command::Dump { filter, .. } => filter.as_deref(),
            _ => None,
        };

        let pattern = cli_filter.or_else(|| toml.and_then(|t| t.dump.filter.as_deref()));

        pattern
            .map(|p| {
                Regex::new(p).map_err(|e| ConfigError::InvalidRegex {
                    pattern: p.to_string(),
                    source: e,
                })
            })
            .transpose()
    }
}

/// Writes the launcher settings template to a file.
///
/// # Errors
///
/// Returns an error if the file exists and `force` is not set, or if the
/// file cannot be written.
pub fn write_default_config(path: &Path, force: bool) -> Result<(), ConfigError> {
    write_new_file(path, &default_launcher_template(), force)
}

/// Writes the commented TOML configuration template to a file.
///
/// Parent directories are created, so the default location works on a fresh
/// system.
///
/// # Errors
///
/// Same as [`write_default_config`].
pub fn write_config_template(path: &Path, force: bool) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::FileWrite {
                path: path.to_path_buf(),
                source: e,
            })?;
        }
    }

    write_new_file(path, &default_config_template(), force)
}

fn write_new_file(path: &Path, content: &str, force: bool) -> Result<(), ConfigError> {
    if path.exists() && !force {
        return Err(ConfigError::AlreadyExists {
            path: path.to_path_buf(),
        });
    }

    std::fs::write(path, content).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn parse_line_ending(s: &str) -> Result<Option<LineEnding>, ConfigError> {
    match s.to_lowercase().as_str() {
        "lf" | "unix" | "\\n" => Ok(Some(LineEnding::Lf)),
        "crlf" | "windows" | "dos" | "\\r\\n" => Ok(Some(LineEnding::CrLf)),
        "preserve" | "auto" => Ok(None),
        _ => Err(ConfigError::InvalidLineEnding {
            value: s.to_string(),
        }),
    }
}
