//! Error types for iamreader configuration.

use std::{io, path::PathBuf};

use thiserror::Error;
use toml::de;

/// Errors that make a configuration unusable.
///
/// Problems that still leave a usable configuration are reported as
/// [`ConfigWarning`](crate::ConfigWarning)s instead.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The file is not valid TOML or does not match the settings schema.
    #[error("failed to parse config file {path}: {source}")]
    ParseToml {
        /// Path to the file that could not be parsed.
        path: PathBuf,
        /// Underlying TOML parse error.
        source: de::Error,
    },

    /// A file name setting is blank.
    #[error("empty file name for {key} in {path}")]
    EmptyFileName {
        /// Config file defining the value.
        path: PathBuf,
        /// Dotted setting name, e.g. `index.filename`.
        key: &'static str,
    },

    /// A media pattern does not compile.
    #[error("invalid media pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The invalid pattern.
        pattern: String,
        /// Underlying glob error.
        source: globset::Error,
    },

    /// A path starts with `~` but there is no home directory to expand it to.
    #[error("cannot expand '~': no home directory")]
    NoHomeDirectory,
}
