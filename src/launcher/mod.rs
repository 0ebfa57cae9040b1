//! Typed consumers of the configuration store.
//!
//! The launcher reads its own settings file into [`LauncherSettings`] and
//! reconfigures a third-party `bwapi.ini` through [`BwapiIni`]. Both only use
//! the public [`IniStore`](crate::store::IniStore) surface.

mod bwapi;
mod settings;


pub use bwapi::BwapiIni;
pub use settings::{LauncherSettings, default_launcher_template};

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::store::StoreError;

/// Section and key names used by the launcher's own settings file.
pub mod keys {
    /// Section holding game installation paths.
    pub const STARCRAFT: &str = "starcraft";
    /// Path to `StarCraft.exe`.
    pub const STARCRAFT_EXE: &str = "starcraft_exe";
    /// Path to the BWAPI injector DLL.
    pub const BWAPI_DLL: &str = "bwapi_dll";

    /// Section holding the bot description.
    pub const BWHEADLESS: &str = "bwheadless";
    /// Display name of the bot.
    pub const BOT_NAME: &str = "bot_name";
    /// Race the bot plays.
    pub const BOT_RACE: &str = "bot_race";
    /// Optional path to the bot module DLL.
    pub const BOT_DLL: &str = "bot_dll";
    /// Optional map to start on.
    pub const MAP: &str = "map";
}

/// Errors from reading or writing launcher settings.
#[derive(Debug, Error)]
pub enum LauncherError {
    /// A required key is missing or disabled.
    #[error("Missing required setting [{section}] {key}")]
    MissingKey {
        /// Section that should hold the key
        section: &'static str,
        /// The missing key
        key: &'static str,
    },

    /// The race value is not one of the known races.
    #[error("Invalid race '{value}': expected Terran, Zerg, Protoss or Random")]
    InvalidRace {
        /// The rejected value
        value: String,
    },

    /// The underlying store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A StarCraft race.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Race {
    /// Terran
    Terran,
    /// Zerg
    Zerg,
    /// Protoss
    Protoss,
    /// Random race
    Random,
}

impl Race {
    /// Returns the canonical spelling used in INI files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Terran => "Terran",
            Self::Zerg => "Zerg",
            Self::Protoss => "Protoss",
            Self::Random => "Random",
        }
    }
}

impl fmt::Display for Race {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Race {
    type Err = LauncherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "terran" | "t" => Ok(Self::Terran),
            "zerg" | "z" => Ok(Self::Zerg),
            "protoss" | "p" => Ok(Self::Protoss),
            "random" | "r" => Ok(Self::Random),
            _ => Err(LauncherError::InvalidRace {
                value: s.to_string(),
            }),
        }
    }
}
