//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::store::LineEnding;

use super::defaults;

/// launcher-ini: structure-preserving INI editor
///
/// Reads and edits bot launcher and BWAPI configuration files while keeping
/// comments, blank lines and commented-out keys intact.
#[derive(Debug, Parser)]
#[command(name = "launcher-ini")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Line terminator for written files
    #[arg(long = "line-ending", value_enum, global = true)]
    pub line_ending: Option<LineEndingArg>,

    /// Write files in place instead of through a temporary file
    #[arg(long = "no-atomic", global = true)]
    pub no_atomic: bool,

    /// Print the resulting document instead of writing it
    #[arg(long = "dry-run", global = true)]
    pub dry_run: bool,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for launcher-ini
///
/// An empty SECTION (`""`) addresses keys above the first header.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the value of a key
    Get {
        /// INI file to read
        file: PathBuf,
        /// Section name
        section: String,
        /// Key name
        key: String,
    },

    /// Set a key, creating it (and its section) when missing
    Set {
        /// INI file to edit
        file: PathBuf,
        /// Section name
        section: String,
        /// Key name
        key: String,
        /// New value
        value: String,
    },

    /// Uncomment a disabled key
    Enable {
        /// INI file to edit
        file: PathBuf,
        /// Section name
        section: String,
        /// Key name
        key: String,
    },

    /// Comment out an active key
    Disable {
        /// INI file to edit
        file: PathBuf,
        /// Section name
        section: String,
        /// Key name
        key: String,
    },

    /// Print all active keys
    Dump {
        /// INI file to read
        file: PathBuf,
        /// Print JSON instead of INI-style lines
        #[arg(long)]
        json: bool,
        /// Only print keys matching this regex
        #[arg(long, value_name = "REGEX")]
        filter: Option<String>,
    },

    /// Validate a launcher settings file
    Check {
        /// Launcher INI file
        file: PathBuf,
    },

    /// Point the `ai` key of a bwapi.ini at a bot DLL
    PointAi {
        /// bwapi.ini to edit
        ini: PathBuf,
        /// Bot module DLL
        dll: PathBuf,
    },

    /// Generate a launcher settings template
    Init {
        /// Output path for the settings file
        #[arg(long, short, default_value = defaults::INIT_OUTPUT)]
        output: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Generate a commented configuration file for this tool
    InitConfig {
        /// Output path (default: the platform config directory)
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Line terminator argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LineEndingArg {
    /// Unix line endings (`\n`)
    #[value(name = "lf")]
    Lf,
    /// Windows line endings (`\r\n`)
    #[value(name = "crlf")]
    CrLf,
    /// Keep whatever the file already uses
    #[value(name = "preserve")]
    Preserve,
}

impl From<LineEndingArg> for Option<LineEnding> {
    fn from(arg: LineEndingArg) -> Self {
        match arg {
            LineEndingArg::Lf => Some(LineEnding::Lf),
            LineEndingArg::CrLf => Some(LineEnding::CrLf),
            LineEndingArg::Preserve => None,
        }
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is one of the init commands.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(
            self.command,
            Command::Init { .. } | Command::InitConfig { .. }
        )
    }

    /// Returns true if the command writes to a file.
    #[must_use]
    pub const fn is_mutation(&self) -> bool {
        matches!(
            self.command,
            Command::Set { .. }
                | Command::Enable { .. }
                | Command::Disable { .. }
                | Command::PointAi { .. }
        )
    }
}
