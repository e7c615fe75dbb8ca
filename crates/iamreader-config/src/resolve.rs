//! Path resolution for configured directories.
//!
//! Entries in `[paths]` may be relative, absolute or start with `~`. Relative entries are
//! anchored at the directory of the config file that set them. Nothing is required to
//! exist yet: output directories are often created later by the rendering tools.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::ConfigError;

/// Resolves a configured path against `base`.
///
/// - `~` and `~/rest` are expanded to the home directory
/// - Relative paths are joined onto `base`
/// - Absolute paths are returned unchanged
pub fn resolve_path(path: &str, base: &Path) -> Result<PathBuf, ConfigError> {
    let expanded = expand_tilde(path)?;
    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        Ok(base.join(expanded))
    }
}

/// Expands a tilde prefix to the home directory.
fn expand_tilde(path: &str) -> Result<PathBuf, ConfigError> {
    if path == "~" {
        return home_dir();
    }

    if let Some(rest) = path.strip_prefix("~/") {
        return Ok(home_dir()?.join(rest));
    }

    Ok(PathBuf::from(path))
}

/// Returns the home directory.
fn home_dir() -> Result<PathBuf, ConfigError> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or(ConfigError::NoHomeDirectory)
}
