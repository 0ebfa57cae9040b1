//! Default values for configuration options.
//!
//! Centralized constants to avoid magic values scattered across the codebase.

use std::path::PathBuf;

/// Default for writing through a temporary file.
pub const ATOMIC_WRITES: bool = true;

/// Default output path for `init`.
pub const INIT_OUTPUT: &str = "launcher.ini";

/// Directory under the platform config dir holding the config file.
pub const CONFIG_DIR_NAME: &str = "launcher-ini";

/// File name of the config file.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default config file location, e.g. `~/.config/launcher-ini/config.toml`.
///
/// Returns `None` when the platform has no config directory.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}
