//! Configuration layer for launcher-ini.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Template generation ([`write_default_config`], [`write_config_template`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! The config file is read from `--config` when given, otherwise from
//! `<config dir>/launcher-ini/config.toml` if that file exists.
//!
//! The `dump --filter` pattern **replaces** the TOML `dump.filter` pattern.
//!
//! # Boolean Flag Semantics
//!
//! `dump --json` uses OR semantics: set in either source, the result is `true`.
//! `--no-atomic` only disables atomic writes; it can never re-enable them
//! after TOML turned them off.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod validated_tests;

pub use cli::{Cli, Command, LineEndingArg};
pub use error::ConfigError;
pub use toml::{TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, write_config_template, write_default_config};
