//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`, applying precedence
//! rules and resolving paths.

use std::path::{Path, PathBuf};

use crate::{
    CaptionSettings, Config, ConfigError, IndexSettings, LoggingSettings, MediaSettings, Paths,
    PublishSettings,
    parse::{
        RawCaptionSettings, RawConfig, RawIndexSettings, RawLoggingSettings, RawMediaSettings,
        RawPaths, RawPublishSettings,
    },
    discovery::is_global_config,
    resolve::resolve_path,
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

impl ParsedConfig {
    /// Directory containing the config file.
    fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to
/// the working directory), lowest precedence last (global config).
///
/// Merge rules:
/// - Every setting: the highest-precedence file that defines it wins
/// - Paths: resolved against the directory of the file that defined them
/// - Paths nobody defined: defaults below `config_root`, the directory of the closest
///   project config. The global config never anchors defaults; without a project config
///   they stay below `cwd`.
pub fn merge_configs(configs: &[ParsedConfig], cwd: &Path) -> Result<Config, ConfigError> {
    let config_root = configs
        .iter()
        .find(|parsed| !is_global_config(&parsed.path))
        .map(|parsed| parsed.dir().to_path_buf());
    let base = config_root.as_deref().unwrap_or(cwd);

    Ok(Config {
        paths: merge_paths(configs, base)?,
        index: merge_section(configs, |c| c.index.as_ref(), apply_raw_index),
        media: merge_section(configs, |c| c.media.as_ref(), apply_raw_media),
        caption: merge_section(configs, |c| c.caption.as_ref(), apply_raw_caption),
        publish: merge_section(configs, |c| c.publish.as_ref(), apply_raw_publish),
        logging: merge_section(configs, |c| c.logging.as_ref(), apply_raw_logging),
        config_root,
    })
}

/// Merges one scalar section across all configs.
///
/// Iterates in reverse (lowest precedence first) so higher precedence overwrites.
fn merge_section<T, R>(
    configs: &[ParsedConfig],
    section: impl Fn(&RawConfig) -> Option<&R>,
    apply: impl Fn(&mut T, &R),
) -> T
where
    T: Default,
{
    let mut result = T::default();
    for parsed in configs.iter().rev() {
        if let Some(raw) = section(&parsed.config) {
            apply(&mut result, raw);
        }
    }
    result
}

/// Merges the `[paths]` sections, resolving each entry where it was defined.
fn merge_paths(configs: &[ParsedConfig], base: &Path) -> Result<Paths, ConfigError> {
    let mut result = Paths::with_base(base);

    for parsed in configs.iter().rev() {
        if let Some(ref paths) = parsed.config.paths {
            apply_raw_paths(&mut result, paths, parsed.dir())?;
        }
    }

    Ok(result)
}

/// Applies raw paths to result, resolving against `config_dir`.
fn apply_raw_paths(
    result: &mut Paths,
    raw: &RawPaths,
    config_dir: &Path,
) -> Result<(), ConfigError> {
    if let Some(ref v) = raw.resources {
        result.resources = resolve_path(v, config_dir)?;
    }
    if let Some(ref v) = raw.audio {
        result.audio = resolve_path(v, config_dir)?;
    }
    if let Some(ref v) = raw.video {
        result.video = resolve_path(v, config_dir)?;
    }
    if let Some(ref v) = raw.images {
        result.images = resolve_path(v, config_dir)?;
    }
    Ok(())
}

/// Applies raw index settings to result.
fn apply_raw_index(result: &mut IndexSettings, raw: &RawIndexSettings) {
    if let Some(ref v) = raw.filename {
        result.filename = v.clone();
    }
}

/// Applies raw media settings to result. A defined pattern list replaces the lower one.
fn apply_raw_media(result: &mut MediaSettings, raw: &RawMediaSettings) {
    if let Some(ref v) = raw.patterns {
        result.patterns = v.clone();
    }
}

/// Applies raw caption settings to result.
fn apply_raw_caption(result: &mut CaptionSettings, raw: &RawCaptionSettings) {
    if let Some(ref v) = raw.separator {
        result.separator = v.clone();
    }
}

/// Applies raw publishing settings to result.
fn apply_raw_publish(result: &mut PublishSettings, raw: &RawPublishSettings) {
    if let Some(ref v) = raw.ledger {
        result.ledger = v.clone();
    }
    if let Some(ref v) = raw.patterns {
        result.patterns = v.clone();
    }
}

/// Applies raw logging settings to result.
fn apply_raw_logging(result: &mut LoggingSettings, raw: &RawLoggingSettings) {
    if let Some(ref v) = raw.level {
        result.level = v.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{discovery::global_config_path, parse::parse_config_str, test_support::TestDir};

    fn parsed(path: PathBuf, toml: &str) -> ParsedConfig {
        ParsedConfig {
            config: parse_config_str(toml, &path).unwrap(),
            path,
        }
    }

    #[test]
    fn test_merge_empty_configs() {
        let result = merge_configs(&[], Path::new("/book")).unwrap();
        assert!(result.config_root.is_none());
        assert_eq!(result.index.filename, "index.txt");
        assert_eq!(result.paths.resources, PathBuf::from("/book/resources"));
    }

    #[test]
    fn test_global_config_does_not_anchor_defaults() {
        let dir = TestDir::new();
        let cwd = dir.create_dir("book");
        let global = parsed(
            global_config_path().unwrap(),
            "[logging]\nlevel = \"debug\"\n\n[paths]\nimages = \"/srv/images\"\n",
        );

        let result = merge_configs(&[global], &cwd).unwrap();
        assert!(result.config_root.is_none());
        assert_eq!(result.logging.level, "debug");
        assert_eq!(result.paths.resources, cwd.join("resources"));
        assert_eq!(result.paths.audio, cwd.join("out/audio"));
        assert_eq!(result.ledger_path(), cwd.join("resources/iamreader.json"));
        assert_eq!(result.paths.images, PathBuf::from("/srv/images"));
    }

    #[test]
    fn test_project_config_anchors_defaults_over_global() {
        let dir = TestDir::new();
        let cwd = dir.create_dir("book/chapters");
        let project = parsed(dir.path().join("book/.iamreader.toml"), "");
        let global = parsed(global_config_path().unwrap(), "");

        let result = merge_configs(&[project, global], &cwd).unwrap();
        let book = dir.path().join("book");
        assert_eq!(result.config_root.as_deref(), Some(book.as_path()));
        assert_eq!(result.paths.resources, book.join("resources"));
    }

    #[test]
    fn test_defaults_anchor_at_config_root() {
        let dir = TestDir::new();
        let config = parsed(dir.path().join("book/.iamreader.toml"), "");

        let result = merge_configs(&[config], dir.path()).unwrap();
        let book = dir.path().join("book");
        assert_eq!(result.config_root.as_deref(), Some(book.as_path()));
        assert_eq!(result.paths.resources, book.join("resources"));
        assert_eq!(result.paths.audio, book.join("out/audio"));
        assert_eq!(result.index_path(), book.join("resources/index.txt"));
    }

    #[test]
    fn test_scalar_override() {
        let dir = TestDir::new();
        let high = parsed(
            dir.path().join("book/.iamreader.toml"),
            "[caption]\nseparator = \" | \"\n",
        );
        let low = parsed(
            dir.path().join(".iamreader.toml"),
            "[caption]\nseparator = \"\\n\"\n\n[logging]\nlevel = \"warn\"\n",
        );

        let result = merge_configs(&[high, low], dir.path()).unwrap();
        assert_eq!(result.caption.separator, " | ");
        assert_eq!(result.logging.level, "warn");
    }

    #[test]
    fn test_paths_resolve_against_defining_file() {
        let dir = TestDir::new();
        let high = parsed(
            dir.path().join("series/book/.iamreader.toml"),
            "[paths]\naudio = \"recordings\"\n",
        );
        let low = parsed(
            dir.path().join("series/.iamreader.toml"),
            "[paths]\nresources = \"shared\"\naudio = \"ignored\"\n",
        );

        let result = merge_configs(&[high, low], dir.path()).unwrap();
        assert_eq!(
            result.paths.audio,
            dir.path().join("series/book/recordings")
        );
        assert_eq!(result.paths.resources, dir.path().join("series/shared"));
        // Untouched defaults use the closest config's directory.
        assert_eq!(
            result.paths.video,
            dir.path().join("series/book/out/video")
        );
    }

    #[test]
    fn test_media_patterns_replace_not_append() {
        let dir = TestDir::new();
        let high = parsed(
            dir.path().join("book/.iamreader.toml"),
            "[media]\npatterns = \"*.flac\"\n",
        );
        let low = parsed(
            dir.path().join(".iamreader.toml"),
            "[media]\npatterns = [\"*.mp3\", \"*.ogg\"]\n",
        );

        let result = merge_configs(&[high, low], dir.path()).unwrap();
        assert_eq!(result.media.patterns, vec!["*.flac"]);
    }

    #[test]
    fn test_lower_precedence_fills_gaps() {
        let dir = TestDir::new();
        let high = parsed(dir.path().join("book/.iamreader.toml"), "[index]\n");
        let low = parsed(
            dir.path().join(".iamreader.toml"),
            "[index]\nfilename = \"outline.txt\"\n\n[publish]\nledger = \"yt.json\"\n",
        );

        let result = merge_configs(&[high, low], dir.path()).unwrap();
        assert_eq!(result.index.filename, "outline.txt");
        assert_eq!(result.publish.ledger, "yt.json");
        assert_eq!(
            result.ledger_path(),
            dir.path().join("book/resources/yt.json")
        );
    }
}
