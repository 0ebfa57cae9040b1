//! Structure-preserving INI configuration store.
//!
//! This module provides [`IniStore`], which parses a `key = value` file into
//! sections, lets callers read and change single values, and writes the file
//! back without disturbing any line the caller did not touch.
//!
//! # Layers
//!
//! - [`RawDocument`]: the verbatim line buffer, the only thing ever written
//! - [`classify`]: stateless per-line helpers
//! - [`ParsedModel`]: section/key index rebuilt from the document
//! - `mutate`: in-place line edits for `set`, `enable`, `disable`
//! - [`Persister`]: disk reads and atomic writes
//!
//! Reads only consult the model. Writes edit the document and then rebuild
//! the model from it, so a re-parse of the written file always agrees with
//! what the store reports.
//!
//! # Example
//!
//! ```
//! use launcher_ini::store::IniStore;
//!
//! let mut store = IniStore::parse_str("[bwheadless]\nbot_name = OLDBOT\n; bot_race = Zerg\n");
//!
//! store.set("bwheadless", "bot_name", "NEWBOT").unwrap();
//! store.enable("bwheadless", "bot_race").unwrap();
//!
//! assert_eq!(store.get("bwheadless", "bot_race").unwrap(), Some("Zerg"));
//! assert_eq!(store.render(), "[bwheadless]\nbot_name = NEWBOT\nbot_race = Zerg\n");
//! ```

pub mod classify;
mod document;
mod error;
mod model;
mod mutate;
mod persist;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use document::{LineEnding, RawDocument};
pub use error::StoreError;
pub use model::{EntrySnapshot, ParsedModel, Section, SectionSnapshot, StoreSnapshot};
pub use persist::Persister;

use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use classify::{COMMENT_DELIMITER, KEY_DELIMITER};

/// An INI document together with its parsed index.
///
/// Created with [`IniStore::parse`] (from a file) or [`IniStore::parse_str`]
/// (from text). [`IniStore::default`] gives an unparsed store on which every
/// mutation fails with [`StoreError::InvalidState`].
///
/// The store is a plain owned value. Share it by reference, or wrap it in a
/// mutex when several threads need it.
#[derive(Debug, Default)]
pub struct IniStore {
    path: Option<PathBuf>,
    document: RawDocument,
    model: ParsedModel,
    loaded: bool,
    auto_persist: bool,
    persister: Persister,
}

impl IniStore {
    // ========================================================================
    // Construction and lifecycle
    // ========================================================================

    /// Parses a file into a new store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the file is missing, or
    /// [`StoreError::Io`] if it cannot be read.
    pub fn parse(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let mut store = Self::default();
        store.load(path)?;
        Ok(store)
    }

    /// Parses text into a new store that has no backing file.
    #[must_use]
    pub fn parse_str(text: &str) -> Self {
        let document = RawDocument::from_text(text);
        Self {
            model: ParsedModel::build(&document),
            document,
            loaded: true,
            ..Self::default()
        }
    }

    /// Uses the given persister for all later writes.
    #[must_use]
    pub fn with_persister(mut self, persister: Persister) -> Self {
        self.persister = persister;
        self
    }

    /// Replaces the store contents with a freshly parsed file.
    ///
    /// On failure the previous contents are cleared, never kept half-loaded.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] or [`StoreError::Io`].
    pub fn load(&mut self, path: impl Into<PathBuf>) -> Result<(), StoreError> {
        let path = path.into();

        match Persister::read(&path) {
            Ok(document) => {
                self.model = ParsedModel::build(&document);
                self.document = document;
                self.loaded = true;
                tracing::debug!(
                    path = %path.display(),
                    lines = self.document.len(),
                    keys = self.model.key_count(),
                    "Parsed config file"
                );
                self.path = Some(path);
                Ok(())
            }
            Err(e) => {
                self.clear();
                Err(e)
            }
        }
    }

    /// Re-reads the file the store was parsed from.
    ///
    /// Discards every unsaved change.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidState`] for a store without a path, or the
    /// errors of [`IniStore::load`].
    pub fn refresh(&mut self) -> Result<(), StoreError> {
        let path = self.path.clone().ok_or(StoreError::no_path("refresh"))?;
        self.load(path)
    }

    /// Drops the document, the model and the path.
    ///
    /// The persister and auto-persist setting are kept.
    pub fn clear(&mut self) {
        self.path = None;
        self.document = RawDocument::new();
        self.model = ParsedModel::default();
        self.loaded = false;
    }

    /// Returns `true` after a successful parse.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Returns the file the store was parsed from, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Saves after every mutation that changed the document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidState`] when enabling on a store that was
    /// not parsed from a file.
    pub fn set_auto_persist(&mut self, enabled: bool) -> Result<(), StoreError> {
        if enabled && self.path.is_none() {
            return Err(StoreError::no_path("set_auto_persist"));
        }
        self.auto_persist = enabled;
        Ok(())
    }

    /// Returns `true` if mutations are saved immediately.
    #[must_use]
    pub const fn auto_persist(&self) -> bool {
        self.auto_persist
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Returns the value of an active key.
    ///
    /// `Ok(None)` means the section or key does not exist (or is disabled).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidArgument`] if `key` is empty.
    pub fn get(&self, section: &str, key: &str) -> Result<Option<&str>, StoreError> {
        if key.is_empty() {
            return Err(StoreError::invalid_argument("key", key, "must not be empty"));
        }
        Ok(self.model.get(section, key))
    }

    /// Returns `true` if the key is active and has a value (possibly empty).
    #[must_use]
    pub fn has_value(&self, section: &str, key: &str) -> bool {
        matches!(self.get(section, key), Ok(Some(_)))
    }

    /// Parses a value with [`FromStr`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidValue`] if the text does not parse, or
    /// [`StoreError::InvalidArgument`] if `key` is empty.
    pub fn get_parsed<T>(&self, section: &str, key: &str) -> Result<Option<T>, StoreError>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.get(section, key)?
            .map(|value| {
                value.parse::<T>().map_err(|e| StoreError::InvalidValue {
                    section: section.to_string(),
                    key: key.to_string(),
                    value: value.to_string(),
                    reason: e.to_string(),
                })
            })
            .transpose()
    }

    /// Reads a boolean flag.
    ///
    /// Accepts `true/false`, `yes/no`, `on/off` and `1/0`, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidValue`] for any other text.
    pub fn get_bool(&self, section: &str, key: &str) -> Result<Option<bool>, StoreError> {
        self.get(section, key)?
            .map(|value| {
                parse_flag(value).ok_or_else(|| StoreError::InvalidValue {
                    section: section.to_string(),
                    key: key.to_string(),
                    value: value.to_string(),
                    reason: "expected true/false, yes/no, on/off or 1/0".to_string(),
                })
            })
            .transpose()
    }

    /// Returns `true` if the key only exists commented out.
    #[must_use]
    pub fn is_disabled(&self, section: &str, key: &str) -> bool {
        mutate::is_disabled(&self.document, section, key)
    }

    /// Iterates section names in document order, global section first.
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.model.sections().map(Section::name)
    }

    /// Iterates the active entries of a section.
    ///
    /// Yields nothing for an unknown section.
    pub fn entries(&self, section: &str) -> impl Iterator<Item = (&str, &str)> {
        self.model.section(section).into_iter().flat_map(Section::entries)
    }

    /// Returns the parsed index.
    #[must_use]
    pub const fn model(&self) -> &ParsedModel {
        &self.model
    }

    /// Returns the raw lines.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        self.document.lines()
    }

    /// Returns the number of raw lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.document.len()
    }

    /// Returns the document text exactly as [`IniStore::save`] would write it.
    #[must_use]
    pub fn render(&self) -> String {
        self.document.render()
    }

    /// Returns the document text with the given line terminator.
    #[must_use]
    pub fn render_with(&self, ending: LineEnding) -> String {
        self.document.render_with(ending)
    }

    /// Returns the line terminator detected when parsing.
    #[must_use]
    pub const fn line_ending(&self) -> LineEnding {
        self.document.line_ending()
    }

    /// Returns a serializable copy of the parsed index.
    #[must_use]
    pub fn snapshot(&self) -> StoreSnapshot {
        self.model.snapshot()
    }

    // ========================================================================
    // Writes
    // ========================================================================

    /// Sets a value, creating the key or section when missing.
    ///
    /// A key that only exists commented out is re-enabled and then updated.
    /// Returns `true` if the document changed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidArgument`] for names or values the format
    /// cannot hold, [`StoreError::InvalidState`] before a successful parse,
    /// or an I/O error from auto-persist.
    pub fn set(&mut self, section: &str, key: &str, value: &str) -> Result<bool, StoreError> {
        validate_section(section)?;
        validate_key(key)?;
        validate_value(value)?;
        self.ensure_loaded("set")?;

        self.apply("set", section, key, |doc| mutate::set(doc, section, key, value))
    }

    /// Uncomments a disabled key.
    ///
    /// Succeeds without changes when the key is already active or no
    /// commented-out line for it exists. Returns `true` if the document
    /// changed.
    ///
    /// # Errors
    ///
    /// Same as [`IniStore::set`].
    pub fn enable(&mut self, section: &str, key: &str) -> Result<bool, StoreError> {
        validate_section(section)?;
        validate_key(key)?;
        self.ensure_loaded("enable")?;

        if self.model.get(section, key).is_some() {
            return Ok(false);
        }

        self.apply("enable", section, key, |doc| mutate::enable(doc, section, key))
    }

    /// Comments out an active key. The line stays in the document.
    ///
    /// Succeeds without changes when the key is not active. Returns `true` if
    /// the document changed.
    ///
    /// # Errors
    ///
    /// Same as [`IniStore::set`].
    pub fn disable(&mut self, section: &str, key: &str) -> Result<bool, StoreError> {
        validate_section(section)?;
        validate_key(key)?;
        self.ensure_loaded("disable")?;

        if self.model.get(section, key).is_none() {
            return Ok(false);
        }

        self.apply("disable", section, key, |doc| mutate::disable(doc, section, key))
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Writes the document to `path` with its own line terminator.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidState`] before a successful parse, or
    /// [`StoreError::Io`] if writing fails.
    pub fn persist(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        self.persist_with(path, self.document.line_ending())
    }

    /// Writes the document to `path` with the given line terminator.
    ///
    /// # Errors
    ///
    /// Same as [`IniStore::persist`].
    pub fn persist_with(
        &self,
        path: impl AsRef<Path>,
        ending: LineEnding,
    ) -> Result<(), StoreError> {
        self.ensure_loaded("persist")?;
        let path = path.as_ref();

        self.persister.write(path, &self.document, ending)?;
        tracing::info!(
            path = %path.display(),
            lines = self.document.len(),
            "Saved config file"
        );
        Ok(())
    }

    /// Writes the document back to the file it was parsed from.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidState`] for a store without a path, or
    /// the errors of [`IniStore::persist`].
    pub fn save(&self) -> Result<(), StoreError> {
        let path = self.path.as_deref().ok_or(StoreError::no_path("save"))?;
        self.persist(path)
    }

    // ========================================================================
    // Internals
    // ========================================================================

    const fn ensure_loaded(&self, operation: &'static str) -> Result<(), StoreError> {
        if self.loaded {
            Ok(())
        } else {
            Err(StoreError::not_loaded(operation))
        }
    }

    /// Runs one document edit, rebuilds the model and auto-saves.
    ///
    /// A failed auto-save rolls the edit back, so the store keeps matching
    /// the file on disk and a retry writes again.
    fn apply<F>(
        &mut self,
        operation: &'static str,
        section: &str,
        key: &str,
        edit: F,
    ) -> Result<bool, StoreError>
    where
        F: FnOnce(&mut RawDocument) -> bool,
    {
        let backup = self.auto_persist.then(|| self.document.clone());

        if !edit(&mut self.document) {
            tracing::trace!(operation, section, key, "No change needed");
            return Ok(false);
        }

        self.model = ParsedModel::build(&self.document);
        tracing::debug!(operation, section, key, "Config document updated");

        if let Some(backup) = backup {
            if let Err(e) = self.save() {
                tracing::warn!(operation, section, key, "Auto-save failed, edit rolled back");
                self.document = backup;
                self.model = ParsedModel::build(&self.document);
                return Err(e);
            }
        }

        Ok(true)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

fn has_line_break(text: &str) -> bool {
    text.contains(['\n', '\r'])
}

fn validate_key(key: &str) -> Result<(), StoreError> {
    let reason = if key.trim().is_empty() {
        "must not be empty"
    } else if key != key.trim() {
        "must not have surrounding whitespace"
    } else if key.contains([KEY_DELIMITER, COMMENT_DELIMITER]) {
        "must not contain '=' or ';'"
    } else if key.starts_with('[') {
        "must not start with '['"
    } else if has_line_break(key) {
        "must not contain line breaks"
    } else {
        return Ok(());
    };

    Err(StoreError::invalid_argument("key", key, reason))
}

fn validate_section(section: &str) -> Result<(), StoreError> {
    let reason = if section != section.trim() {
        "must not have surrounding whitespace"
    } else if section.contains(['[', ']', COMMENT_DELIMITER]) {
        "must not contain '[', ']' or ';'"
    } else if has_line_break(section) {
        "must not contain line breaks"
    } else {
        return Ok(());
    };

    Err(StoreError::invalid_argument("section", section, reason))
}

fn validate_value(value: &str) -> Result<(), StoreError> {
    let reason = if value.contains(COMMENT_DELIMITER) {
        "must not contain ';' (no escaping is supported)"
    } else if has_line_break(value) {
        "must not contain line breaks"
    } else if value != value.trim() {
        "must not have surrounding whitespace"
    } else {
        return Ok(());
    };

    Err(StoreError::invalid_argument("value", value, reason))
}
