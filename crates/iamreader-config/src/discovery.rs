//! Configuration file discovery.
//!
//! A book project keeps its `.iamreader.toml` at the project root, next to the `resources/`
//! directory. Running iamreader from anywhere below it finds that file by walking up from
//! the working directory; `~/.iamreader.toml` supplies personal defaults underneath.

use std::path::{Path, PathBuf};

use directories::BaseDirs;
use tracing::debug;

use crate::parse::is_root_config;

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".iamreader.toml";

/// Discovers all configuration files relevant to the given directory.
///
/// Returns paths in precedence order: closest to `cwd` first, global last. A config with
/// `root = true` ends the walk, and the global config is then skipped as well.
pub fn discover_config_files(cwd: &Path) -> Vec<PathBuf> {
    let mut configs = Vec::new();

    for dir in cwd.ancestors() {
        let candidate = dir.join(CONFIG_FILENAME);
        if !candidate.is_file() {
            continue;
        }
        let is_root = is_root_config(&candidate);
        debug!(path = %candidate.display(), root = is_root, "found config file");
        configs.push(candidate);
        if is_root {
            return configs;
        }
    }

    if let Some(global) = global_config_path()
        && global.is_file()
        && !configs.contains(&global)
    {
        debug!(path = %global.display(), "found global config file");
        configs.push(global);
    }

    configs
}

/// Returns the path to the global configuration file (`~/.iamreader.toml`).
///
/// Returns `None` if the home directory cannot be determined.
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
}

/// Checks if a path is the global configuration file.
pub fn is_global_config(path: &Path) -> bool {
    global_config_path().is_some_and(|global| path == global)
}
