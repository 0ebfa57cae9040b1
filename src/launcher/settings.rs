//! The launcher's own settings file.

use std::fmt;
use std::path::PathBuf;

use crate::store::IniStore;

use super::keys::{
    BOT_DLL, BOT_NAME, BOT_RACE, BWAPI_DLL, BWHEADLESS, MAP, STARCRAFT, STARCRAFT_EXE,
};
use super::{LauncherError, Race};

/// Validated launcher settings.
///
/// Read with [`LauncherSettings::from_store`]; written back with
/// [`LauncherSettings::write_to`], which only touches the keys it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherSettings {
    /// Path to `StarCraft.exe`
    pub starcraft_exe: PathBuf,

    /// Path to the BWAPI injector DLL
    pub bwapi_dll: PathBuf,

    /// Bot display name
    pub bot_name: String,

    /// Race the bot plays
    pub bot_race: Race,

    /// Bot module DLL, if the bot is a DLL bot
    pub bot_dll: Option<PathBuf>,

    /// Map to start on, if any
    pub map: Option<String>,
}

impl fmt::Display for LauncherSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Launcher {{ starcraft_exe: {}, bwapi_dll: {}, bot: {} ({}), bot_dll: {}, map: {} }}",
            self.starcraft_exe.display(),
            self.bwapi_dll.display(),
            self.bot_name,
            self.bot_race,
            self.bot_dll
                .as_ref()
                .map_or_else(|| "none".to_string(), |p| p.display().to_string()),
            self.map.as_deref().unwrap_or("none"),
        )
    }
}

impl LauncherSettings {
    /// Reads and validates the settings.
    ///
    /// Empty optional values count as absent.
    ///
    /// # Errors
    ///
    /// Returns [`LauncherError::MissingKey`] when a required key is missing,
    /// disabled or empty, and [`LauncherError::InvalidRace`] for an unknown race.
    pub fn from_store(store: &IniStore) -> Result<Self, LauncherError> {
        let starcraft_exe = PathBuf::from(required(store, STARCRAFT, STARCRAFT_EXE)?);
        let bwapi_dll = PathBuf::from(required(store, STARCRAFT, BWAPI_DLL)?);
        let bot_name = required(store, BWHEADLESS, BOT_NAME)?.to_string();
        let bot_race = required(store, BWHEADLESS, BOT_RACE)?.parse::<Race>()?;
        let bot_dll = optional(store, BWHEADLESS, BOT_DLL)?.map(PathBuf::from);
        let map = optional(store, BWHEADLESS, MAP)?.map(str::to_string);

        Ok(Self {
            starcraft_exe,
            bwapi_dll,
            bot_name,
            bot_race,
            bot_dll,
            map,
        })
    }

    /// Writes the settings into a store.
    ///
    /// Optional settings that are `None` are disabled rather than removed, so
    /// a previous value can be re-enabled by hand later. Returns `true` if the
    /// document changed.
    ///
    /// # Errors
    ///
    /// Returns the store's errors, e.g. for paths containing `;`.
    pub fn write_to(&self, store: &mut IniStore) -> Result<bool, LauncherError> {
        let mut changed = false;

        changed |= store.set(
            STARCRAFT,
            STARCRAFT_EXE,
            &self.starcraft_exe.to_string_lossy(),
        )?;
        changed |= store.set(STARCRAFT, BWAPI_DLL, &self.bwapi_dll.to_string_lossy())?;
        changed |= store.set(BWHEADLESS, BOT_NAME, &self.bot_name)?;
        changed |= store.set(BWHEADLESS, BOT_RACE, self.bot_race.as_str())?;

        changed |= match &self.bot_dll {
            Some(dll) => store.set(BWHEADLESS, BOT_DLL, &dll.to_string_lossy())?,
            None => store.disable(BWHEADLESS, BOT_DLL)?,
        };
        changed |= match &self.map {
            Some(map) => store.set(BWHEADLESS, MAP, map)?,
            None => store.disable(BWHEADLESS, MAP)?,
        };

        Ok(changed)
    }
}

fn required<'a>(
    store: &'a IniStore,
    section: &'static str,
    key: &'static str,
) -> Result<&'a str, LauncherError> {
    optional(store, section, key)?.ok_or(LauncherError::MissingKey { section, key })
}

fn optional<'a>(
    store: &'a IniStore,
    section: &str,
    key: &str,
) -> Result<Option<&'a str>, LauncherError> {
    Ok(store.get(section, key)?.filter(|v| !v.is_empty()))
}

/// Generates a launcher settings file with comments.
#[must_use]
pub fn default_launcher_template() -> String {
    r"; Bot launcher settings
; Lines starting with ';' are comments. Commented-out keys can be
; re-enabled with `launcher-ini enable <file> <section> <key>`.

[starcraft]
; Path to StarCraft.exe (required)
starcraft_exe = C:\StarCraft\StarCraft.exe

; BWAPI injector DLL (required)
bwapi_dll = C:\StarCraft\bwapi-data\BWAPI.dll

[bwheadless]
; Bot display name (required)
bot_name = MyBot

; Terran, Zerg, Protoss or Random (required)
bot_race = Random

; Bot module DLL for DLL bots
; bot_dll = C:\StarCraft\bwapi-data\AI\MyBot.dll

; Map to start on
; map = maps\sscai\(2)Benzene.scx
"
    .to_string()
}
