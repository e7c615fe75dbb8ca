//! Configuration file parsing.
//!
//! Parses individual `.iamreader.toml` files into intermediate `RawConfig` structures
//! that preserve the optional nature of all fields before merging.

use std::{fs, path::Path};

use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional to support partial configs that will be merged.
/// This mirrors the TOML schema exactly.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// Working directories.
    pub paths: Option<RawPaths>,
    /// Index file settings.
    pub index: Option<RawIndexSettings>,
    /// Media file selection.
    pub media: Option<RawMediaSettings>,
    /// Caption settings.
    pub caption: Option<RawCaptionSettings>,
    /// Publishing settings.
    pub publish: Option<RawPublishSettings>,
    /// Logging settings.
    pub logging: Option<RawLoggingSettings>,
}

/// Raw `[paths]` section. Relative entries are resolved against the file's directory.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawPaths {
    /// Resources directory.
    pub resources: Option<String>,
    /// Recorded audio directory.
    pub audio: Option<String>,
    /// Rendered video directory.
    pub video: Option<String>,
    /// Rendered caption image directory.
    pub images: Option<String>,
}

/// Raw `[index]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawIndexSettings {
    /// Index file name inside the resources directory.
    pub filename: Option<String>,
}

/// Raw `[media]` section.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawMediaSettings {
    /// Media file glob(s). Accepts either a single string or an array of strings.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub patterns: Option<Vec<String>>,
}

/// Raw `[caption]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawCaptionSettings {
    /// Separator between title path segments.
    pub separator: Option<String>,
}

/// Raw `[publish]` section.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawPublishSettings {
    /// Ledger file name inside the resources directory.
    pub ledger: Option<String>,
    /// Glob(s) selecting the rendered files to publish from the video directory.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub patterns: Option<Vec<String>>,
}

/// Raw `[logging]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawLoggingSettings {
    /// Default log filter directive.
    pub level: Option<String>,
}

/// Parses a configuration file from disk.
///
/// Returns a `RawConfig` with all fields as optionals, ready for merging.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    let config: RawConfig = toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })?;
    check_file_names(&config, path)?;
    Ok(config)
}

/// Rejects blank file names, which would make the index or ledger path the resources
/// directory itself.
fn check_file_names(config: &RawConfig, path: &Path) -> Result<(), ConfigError> {
    let names = [
        (
            "index.filename",
            config.index.as_ref().and_then(|i| i.filename.as_deref()),
        ),
        (
            "publish.ledger",
            config.publish.as_ref().and_then(|p| p.ledger.as_deref()),
        ),
    ];
    match names
        .into_iter()
        .find(|(_, value)| value.is_some_and(|v| v.trim().is_empty()))
    {
        Some((key, _)) => Err(ConfigError::EmptyFileName {
            path: path.to_path_buf(),
            key,
        }),
        None => Ok(()),
    }
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    parse_config_file(path).is_ok_and(|config| config.root == Some(true))
}
