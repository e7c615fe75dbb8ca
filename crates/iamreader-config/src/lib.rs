//! Configuration system for iamreader.
//!
//! iamreader uses TOML configuration files named `.iamreader.toml`. Configuration is resolved
//! by walking up the directory tree from the current working directory, collecting any
//! `.iamreader.toml` files found, then loading `~/.iamreader.toml` as the global config with
//! lowest precedence.
//!
//! Nothing here is global state: the loaded [`Config`] is passed explicitly to whatever
//! needs the index location, media directories or logging level.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod patterns;
mod resolve;
mod validate;

#[cfg(test)]
mod test_support;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawCaptionSettings, RawConfig, RawIndexSettings, RawLoggingSettings, RawMediaSettings,
    RawPaths, RawPublishSettings, parse_config_file, parse_config_str,
};
pub use patterns::MediaPatterns;
pub use resolve::resolve_path;
use serde::{Deserialize, Serialize};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Default resources directory, holding the index and the publishing ledger.
pub const DEFAULT_RESOURCES_DIR: &str = "resources";
/// Default directory of recorded audio.
pub const DEFAULT_AUDIO_DIR: &str = "out/audio";
/// Default directory for rendered videos.
pub const DEFAULT_VIDEO_DIR: &str = "out/video";
/// Default directory for rendered caption images.
pub const DEFAULT_IMAGES_DIR: &str = "out/images";
/// Default index file name inside the resources directory.
pub const DEFAULT_INDEX_FILENAME: &str = "index.txt";
/// Default publishing ledger file name inside the resources directory.
pub const DEFAULT_LEDGER_FILENAME: &str = "iamreader.json";
/// Default media file pattern.
pub const DEFAULT_MEDIA_PATTERN: &str = "*.mp3";
/// Default pattern for rendered videos to publish.
pub const DEFAULT_PUBLISH_PATTERN: &str = "*.avi";
/// Default separator between caption lines.
pub const DEFAULT_CAPTION_SEPARATOR: &str = "\n\n";
/// Default logging level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Top-level merged configuration for iamreader.
///
/// This represents the fully resolved configuration after merging all discovered
/// `.iamreader.toml` files according to precedence rules.
#[derive(Debug, Clone)]
pub struct Config {
    /// Resolved working directories.
    pub paths: Paths,
    /// Index file settings.
    pub index: IndexSettings,
    /// Media file selection.
    pub media: MediaSettings,
    /// Caption rendering settings.
    pub caption: CaptionSettings,
    /// Publishing ledger settings.
    pub publish: PublishSettings,
    /// Logging settings.
    pub logging: LoggingSettings,
    /// Directory containing the most specific project config file, `None` when only the
    /// global config (or nothing) was loaded.
    pub config_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::with_base(Path::new("."))
    }
}

impl Config {
    /// Returns the default configuration with paths resolved against `base`.
    pub fn with_base(base: &Path) -> Self {
        Self {
            paths: Paths::with_base(base),
            index: IndexSettings::default(),
            media: MediaSettings::default(),
            caption: CaptionSettings::default(),
            publish: PublishSettings::default(),
            logging: LoggingSettings::default(),
            config_root: None,
        }
    }

    /// Loads configuration by discovering and merging all relevant `.iamreader.toml` files.
    ///
    /// This is the main entry point for loading configuration. It:
    /// 1. Discovers all `.iamreader.toml` files from `cwd` up to the filesystem root
    /// 2. Appends `~/.iamreader.toml` if it exists
    /// 3. Parses each file
    /// 4. Merges them according to precedence rules (closest to `cwd` wins)
    ///
    /// Without any configuration file, defaults are resolved against `cwd`.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files, cwd)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first. `cwd` is
    /// the base for default paths when no project config (anything but the global
    /// `~/.iamreader.toml`) is among them.
    pub fn load_from_files(files: &[PathBuf], cwd: &Path) -> Result<Self, ConfigError> {
        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        merge_configs(&parsed, cwd)
    }

    /// Returns the full path of the index file.
    pub fn index_path(&self) -> PathBuf {
        self.paths.resources.join(&self.index.filename)
    }

    /// Returns the full path of the publishing ledger.
    pub fn ledger_path(&self) -> PathBuf {
        self.paths.resources.join(&self.publish.ledger)
    }

    /// Compiles the configured media file patterns.
    pub fn compile_media_patterns(&self) -> Result<MediaPatterns, ConfigError> {
        MediaPatterns::compile(&self.media.patterns)
    }

    /// Compiles the patterns selecting rendered videos to publish.
    pub fn compile_publish_patterns(&self) -> Result<MediaPatterns, ConfigError> {
        MediaPatterns::compile(&self.publish.patterns)
    }

    /// Validates the configuration and returns any warnings.
    ///
    /// This checks for:
    /// - Missing resources or audio directories
    /// - A missing index file
    /// - Media patterns that are invalid or match nothing in the audio directory
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings to TOML format.
    ///
    /// The output has the same layout as a `.iamreader.toml` file, with paths fully
    /// resolved.
    pub fn settings_to_toml(&self) -> String {
        let serializable = SerializableSettings {
            paths: SerializablePaths::from(&self.paths),
            index: self.index.clone(),
            media: self.media.clone(),
            caption: self.caption.clone(),
            publish: self.publish.clone(),
            logging: self.logging.clone(),
        };
        toml::to_string_pretty(&serializable).expect("settings serialization should not fail")
    }
}

/// Resolved working directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    /// Directory holding the index and the publishing ledger.
    pub resources: PathBuf,
    /// Directory of recorded audio files.
    pub audio: PathBuf,
    /// Directory for rendered videos.
    pub video: PathBuf,
    /// Directory for rendered caption images.
    pub images: PathBuf,
}

impl Paths {
    /// Returns the default directories below `base`.
    pub fn with_base(base: &Path) -> Self {
        Self {
            resources: base.join(DEFAULT_RESOURCES_DIR),
            audio: base.join(DEFAULT_AUDIO_DIR),
            video: base.join(DEFAULT_VIDEO_DIR),
            images: base.join(DEFAULT_IMAGES_DIR),
        }
    }
}

/// Index file settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IndexSettings {
    /// Index file name inside the resources directory.
    pub filename: String,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            filename: String::from(DEFAULT_INDEX_FILENAME),
        }
    }
}

/// Media file selection settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MediaSettings {
    /// Glob patterns matched against media file names.
    pub patterns: Vec<String>,
}

impl Default for MediaSettings {
    fn default() -> Self {
        Self {
            patterns: vec![String::from(DEFAULT_MEDIA_PATTERN)],
        }
    }
}

/// Caption rendering settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CaptionSettings {
    /// Separator placed between title path segments.
    pub separator: String,
}

impl Default for CaptionSettings {
    fn default() -> Self {
        Self {
            separator: String::from(DEFAULT_CAPTION_SEPARATOR),
        }
    }
}

/// Publishing ledger settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PublishSettings {
    /// Ledger file name inside the resources directory.
    pub ledger: String,
    /// Globs selecting the rendered files to publish from the video directory.
    pub patterns: Vec<String>,
}

impl Default for PublishSettings {
    fn default() -> Self {
        Self {
            ledger: String::from(DEFAULT_LEDGER_FILENAME),
            patterns: vec![String::from(DEFAULT_PUBLISH_PATTERN)],
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive, e.g. `info` or `iamreader_annotations=debug`.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: String::from(DEFAULT_LOG_LEVEL),
        }
    }
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableSettings {
    /// Resolved directories.
    paths: SerializablePaths,
    /// Index file settings.
    index: IndexSettings,
    /// Media file selection.
    media: MediaSettings,
    /// Caption settings.
    caption: CaptionSettings,
    /// Publishing settings.
    publish: PublishSettings,
    /// Logging settings.
    logging: LoggingSettings,
}

/// Paths rendered as display strings.
#[derive(Serialize)]
struct SerializablePaths {
    /// Resources directory.
    resources: String,
    /// Audio directory.
    audio: String,
    /// Video directory.
    video: String,
    /// Images directory.
    images: String,
}

impl From<&Paths> for SerializablePaths {
    fn from(paths: &Paths) -> Self {
        Self {
            resources: paths.resources.display().to_string(),
            audio: paths.audio.display().to_string(),
            video: paths.video.display().to_string(),
            images: paths.images.display().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::with_base(Path::new("/book"));
        assert_eq!(config.paths.resources, PathBuf::from("/book/resources"));
        assert_eq!(config.paths.audio, PathBuf::from("/book/out/audio"));
        assert_eq!(config.paths.video, PathBuf::from("/book/out/video"));
        assert_eq!(config.paths.images, PathBuf::from("/book/out/images"));
        assert_eq!(config.index.filename, "index.txt");
        assert_eq!(config.media.patterns, vec!["*.mp3"]);
        assert_eq!(config.caption.separator, "\n\n");
        assert_eq!(config.publish.ledger, "iamreader.json");
        assert_eq!(config.publish.patterns, vec!["*.avi"]);
        assert_eq!(config.logging.level, "info");
        assert!(config.config_root.is_none());
    }

    #[test]
    fn test_index_and_ledger_paths() {
        let config = Config::with_base(Path::new("/book"));
        assert_eq!(config.index_path(), PathBuf::from("/book/resources/index.txt"));
        assert_eq!(
            config.ledger_path(),
            PathBuf::from("/book/resources/iamreader.json")
        );
    }

    #[test]
    fn test_settings_to_toml() {
        let config = Config::with_base(Path::new("/book"));
        let toml = config.settings_to_toml();

        // Should produce valid TOML with expected sections
        assert!(toml.contains("[paths]"));
        assert!(toml.contains("[index]"));
        assert!(toml.contains("[media]"));
        assert!(toml.contains("[caption]"));
        assert!(toml.contains("[publish]"));
        assert!(toml.contains("[logging]"));
        assert!(toml.contains("filename = \"index.txt\""));

        // Should be parseable back
        let parsed: toml::Value =
            toml::from_str(&toml).expect("settings_to_toml should produce valid TOML");
        assert_eq!(
            parsed["paths"]["resources"].as_str(),
            Some("/book/resources")
        );
        assert_eq!(parsed["caption"]["separator"].as_str(), Some("\n\n"));
    }
}
