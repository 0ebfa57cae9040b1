//! Editing a third-party `bwapi.ini`.
//!
//! BWAPI ships its ini with most keys present but commented out, so the
//! launcher mostly flips existing lines on and off instead of adding new
//! ones. Everything the user wrote by hand stays as it was.

use std::path::Path;

use crate::store::IniStore;

use super::{LauncherError, LauncherSettings, Race};

const AI_SECTION: &str = "ai";
const AI_KEY: &str = "ai";
const AUTO_MENU_SECTION: &str = "auto_menu";
const AUTO_MENU_KEY: &str = "auto_menu";
const RACE_KEY: &str = "race";
const MAP_KEY: &str = "map";

/// Launcher view of a `bwapi.ini` store.
///
/// Borrows the store mutably; persisting is left to the caller.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use launcher_ini::launcher::BwapiIni;
/// use launcher_ini::store::IniStore;
///
/// let mut store = IniStore::parse_str("[ai]\n; ai = bwapi-data\\AI\\ExampleAIModule.dll\n");
/// BwapiIni::new(&mut store).point_ai_at(Path::new("bwapi-data\\AI\\MyBot.dll")).unwrap();
///
/// assert_eq!(store.render(), "[ai]\nai = bwapi-data\\AI\\MyBot.dll\n");
/// ```
#[derive(Debug)]
pub struct BwapiIni<'a> {
    store: &'a mut IniStore,
}

impl<'a> BwapiIni<'a> {
    /// Wraps a parsed `bwapi.ini` store.
    pub const fn new(store: &'a mut IniStore) -> Self {
        Self { store }
    }

    /// Returns the DLL the `ai` key currently points at.
    ///
    /// # Errors
    ///
    /// Propagates store errors.
    pub fn ai_module(&self) -> Result<Option<&str>, LauncherError> {
        Ok(self.store.get(AI_SECTION, AI_KEY)?)
    }

    /// Points `[ai] ai` at a bot DLL, re-enabling a commented-out key first.
    ///
    /// Returns `true` if the document changed.
    ///
    /// # Errors
    ///
    /// Returns a store error if the path cannot be stored (e.g. contains `;`).
    pub fn point_ai_at(&mut self, dll: &Path) -> Result<bool, LauncherError> {
        let changed = self
            .store
            .set(AI_SECTION, AI_KEY, &dll.to_string_lossy())?;
        tracing::debug!(dll = %dll.display(), changed, "Pointed BWAPI ai module");
        Ok(changed)
    }

    /// Comments out `[ai] ai` so BWAPI starts without a bot module.
    ///
    /// # Errors
    ///
    /// Propagates store errors.
    pub fn disable_ai(&mut self) -> Result<bool, LauncherError> {
        Ok(self.store.disable(AI_SECTION, AI_KEY)?)
    }

    /// Sets `[auto_menu] race`.
    ///
    /// # Errors
    ///
    /// Propagates store errors.
    pub fn set_race(&mut self, race: Race) -> Result<bool, LauncherError> {
        Ok(self.store.set(AUTO_MENU_SECTION, RACE_KEY, race.as_str())?)
    }

    /// Sets `[auto_menu] map`, or disables it for `None`.
    ///
    /// # Errors
    ///
    /// Propagates store errors.
    pub fn set_map(&mut self, map: Option<&str>) -> Result<bool, LauncherError> {
        let changed = match map {
            Some(map) => self.store.set(AUTO_MENU_SECTION, MAP_KEY, map)?,
            None => self.store.disable(AUTO_MENU_SECTION, MAP_KEY)?,
        };
        Ok(changed)
    }

    /// Sets `[auto_menu] auto_menu` (e.g. `SINGLE_PLAYER`, `LAN`, `OFF`).
    ///
    /// # Errors
    ///
    /// Propagates store errors.
    pub fn set_auto_menu(&mut self, mode: &str) -> Result<bool, LauncherError> {
        Ok(self.store.set(AUTO_MENU_SECTION, AUTO_MENU_KEY, mode)?)
    }

    /// Applies launcher settings: bot module, race and map.
    ///
    /// A bot without a DLL runs as an external client, so the `ai` key is
    /// disabled in that case. Returns `true` if anything changed.
    ///
    /// # Errors
    ///
    /// Propagates store errors.
    pub fn apply(&mut self, settings: &LauncherSettings) -> Result<bool, LauncherError> {
        let mut changed = match &settings.bot_dll {
            Some(dll) => self.point_ai_at(dll)?,
            None => self.disable_ai()?,
        };
        changed |= self.set_race(settings.bot_race)?;
        changed |= self.set_map(settings.map.as_deref())?;
        Ok(changed)
    }
}
