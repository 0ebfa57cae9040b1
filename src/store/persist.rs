//! Reading documents from disk and writing them back.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::StoreError;
use super::document::{LineEnding, RawDocument};

/// Reads and writes [`RawDocument`]s.
///
/// # Atomic Writes
///
/// By default, uses the write-to-temp-then-rename pattern:
/// 1. Write to `{path}.tmp`
/// 2. Rename `{path}.tmp` to `{path}`
///
/// The target is either fully replaced or left in its prior state.
/// [`Persister::direct`] writes in place instead, for filesystems where a
/// rename over an existing file is not possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Persister {
    atomic: bool,
}

impl Default for Persister {
    fn default() -> Self {
        Self::atomic()
    }
}

impl Persister {
    /// Creates a persister using temp-file-and-rename writes.
    #[must_use]
    pub const fn atomic() -> Self {
        Self { atomic: true }
    }

    /// Creates a persister that writes the target file directly.
    #[must_use]
    pub const fn direct() -> Self {
        Self { atomic: false }
    }

    /// Returns `true` if writes go through a temp file.
    #[must_use]
    pub const fn is_atomic(self) -> bool {
        self.atomic
    }

    /// Reads a document from disk.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the file is missing, or
    /// [`StoreError::Io`] if it cannot be read (including non-UTF-8 content).
    pub fn read(path: &Path) -> Result<RawDocument, StoreError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                StoreError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                StoreError::Io {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        Ok(RawDocument::from_text(&content))
    }

    /// Writes a document with the given line terminator.
    ///
    /// Line contents are written exactly as stored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if any filesystem step fails.
    pub fn write(
        self,
        path: &Path,
        document: &RawDocument,
        ending: LineEnding,
    ) -> Result<(), StoreError> {
        let io_error = |source: std::io::Error| StoreError::Io {
            path: path.to_path_buf(),
            source,
        };
        let content = document.render_with(ending);

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(io_error)?;
            }
        }

        if !self.atomic {
            return std::fs::write(path, content).map_err(io_error);
        }

        // Append .tmp instead of replacing extension to avoid conflicts
        // (e.g., bwapi.ini -> bwapi.ini.tmp, not bwapi.tmp)
        let temp_path = temp_path(path);

        std::fs::write(&temp_path, content).map_err(io_error)?;

        if let Err(e) = std::fs::rename(&temp_path, path) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(io_error(e));
        }

        Ok(())
    }
}

/// Returns `{path}.tmp`, keeping non-UTF-8 path bytes intact.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

#[cfg(test)]
#[path = "persist_tests.rs"]
mod tests;
