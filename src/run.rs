//! Command execution logic.
//!
//! Each subcommand opens its file through [`IniStore`], does its work and
//! writes results to the given output. Edits go back to disk through the
//! persister chosen by the configuration, unless dry-run mode is on.

use std::io::{self, Write};
use std::path::Path;

use regex::Regex;
use thiserror::Error;

use launcher_ini::config::{Command, ValidatedConfig};
use launcher_ini::launcher::{BwapiIni, LauncherError, LauncherSettings};
use launcher_ini::store::classify::format_entry;
use launcher_ini::store::{IniStore, StoreError, StoreSnapshot};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for command execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Reading, editing or writing an INI file failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Launcher settings are incomplete or invalid.
    #[error("Invalid launcher settings: {0}")]
    Launcher(#[from] LauncherError),

    /// Serializing `dump --json` output failed.
    #[error("Failed to encode JSON output: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing to the output stream failed.
    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Result of a successful command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The command did what it was asked.
    Done,

    /// `get` found no active value for the key.
    NotFound,
}

/// Executes one subcommand.
///
/// # Errors
///
/// Returns an error if the target file cannot be read, parsed, edited or
/// written, or if output cannot be written.
pub fn execute<W: Write>(
    command: &Command,
    config: &ValidatedConfig,
    out: &mut W,
) -> Result<Outcome, RunError> {
    match command {
        Command::Get { file, section, key } => get(file, section, key, out),
        Command::Set {
            file,
            section,
            key,
            value,
        } => edit(file, config, out, |store| Ok(store.set(section, key, value)?)),
        Command::Enable { file, section, key } => {
            edit(file, config, out, |store| Ok(store.enable(section, key)?))
        }
        Command::Disable { file, section, key } => {
            edit(file, config, out, |store| Ok(store.disable(section, key)?))
        }
        Command::PointAi { ini, dll } => edit(ini, config, out, |store| {
            Ok(BwapiIni::new(store).point_ai_at(dll)?)
        }),
        Command::Dump { file, .. } => dump(file, config, out),
        Command::Check { file } => check(file, out),
        // Handled before the configuration is loaded
        Command::Init { .. } | Command::InitConfig { .. } => Ok(Outcome::Done),
    }
}

fn get<W: Write>(file: &Path, section: &str, key: &str, out: &mut W) -> Result<Outcome, RunError> {
    let store = IniStore::parse(file)?;

    match store.get(section, key)? {
        Some(value) => {
            writeln!(out, "{value}")?;
            Ok(Outcome::Done)
        }
        None => {
            tracing::debug!(section, key, "No active value");
            Ok(Outcome::NotFound)
        }
    }
}

/// Applies one edit and writes the file back if anything changed.
///
/// A requested line-ending conversion also counts as a change.
fn edit<W, F>(
    file: &Path,
    config: &ValidatedConfig,
    out: &mut W,
    apply: F,
) -> Result<Outcome, RunError>
where
    W: Write,
    F: FnOnce(&mut IniStore) -> Result<bool, RunError>,
{
    let mut store = IniStore::parse(file)?.with_persister(config.persister());
    let changed = apply(&mut store)?;

    let ending = config.line_ending.unwrap_or_else(|| store.line_ending());
    let converts = ending != store.line_ending();

    if config.dry_run {
        out.write_all(store.render_with(ending).as_bytes())?;
        tracing::info!(
            path = %file.display(),
            changed,
            "Dry-run: file not written"
        );
        return Ok(Outcome::Done);
    }

    if changed || converts {
        store.persist_with(file, ending)?;
    } else {
        tracing::info!(path = %file.display(), "Already up to date");
    }

    Ok(Outcome::Done)
}

fn dump<W: Write>(file: &Path, config: &ValidatedConfig, out: &mut W) -> Result<Outcome, RunError> {
    let store = IniStore::parse(file)?;
    let snapshot = filter_snapshot(store.snapshot(), config.dump_filter.as_ref());

    if config.dump_json {
        serde_json::to_writer_pretty(&mut *out, &snapshot)?;
        writeln!(out)?;
    } else {
        write_entries(&snapshot, out)?;
    }

    Ok(Outcome::Done)
}

fn check<W: Write>(file: &Path, out: &mut W) -> Result<Outcome, RunError> {
    let store = IniStore::parse(file)?;
    let settings = LauncherSettings::from_store(&store)?;

    writeln!(out, "{settings}")?;
    Ok(Outcome::Done)
}

/// Keeps only entries whose key matches `filter`, dropping emptied sections.
fn filter_snapshot(mut snapshot: StoreSnapshot, filter: Option<&Regex>) -> StoreSnapshot {
    if let Some(filter) = filter {
        for section in &mut snapshot.sections {
            section.entries.retain(|entry| filter.is_match(&entry.key));
        }
        snapshot.sections.retain(|section| !section.entries.is_empty());
    }
    snapshot
}

fn write_entries<W: Write>(snapshot: &StoreSnapshot, out: &mut W) -> io::Result<()> {
    for section in &snapshot.sections {
        if !section.name.is_empty() {
            writeln!(out, "[{}]", section.name)?;
        }
        for entry in &section.entries {
            writeln!(out, "{}", format_entry("", &entry.key, &entry.value, None))?;
        }
    }
    Ok(())
}
