//! Configuration validation.
//!
//! Validates a loaded configuration against the filesystem and reports warnings for
//! anything that would make the other commands come up empty.

use std::{fmt, fs, path::Path};

use crate::{Config, patterns::compile_glob};

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// The resources directory does not exist.
    ResourcesMissing {
        /// Path that doesn't exist.
        path: String,
    },
    /// The index file does not exist.
    IndexMissing {
        /// Path that doesn't exist.
        path: String,
    },
    /// The audio directory does not exist.
    AudioMissing {
        /// Path that doesn't exist.
        path: String,
    },
    /// A media pattern is not a valid glob.
    InvalidMediaPattern {
        /// The offending pattern.
        pattern: String,
        /// Why it failed to compile.
        reason: String,
    },
    /// A media pattern matches nothing in the audio directory.
    MediaPatternMatchesNothing {
        /// Pattern that matched nothing.
        pattern: String,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResourcesMissing { path } => {
                write!(f, "resources directory does not exist: {path}")
            }
            Self::IndexMissing { path } => write!(f, "index file does not exist: {path}"),
            Self::AudioMissing { path } => write!(f, "audio directory does not exist: {path}"),
            Self::InvalidMediaPattern { pattern, reason } => {
                write!(f, "media pattern '{pattern}' is invalid: {reason}")
            }
            Self::MediaPatternMatchesNothing { pattern } => {
                write!(f, "media pattern '{pattern}' matches no audio files")
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    if config.paths.resources.is_dir() {
        let index = config.index_path();
        if !index.is_file() {
            warnings.push(ConfigWarning::IndexMissing {
                path: index.display().to_string(),
            });
        }
    } else {
        warnings.push(ConfigWarning::ResourcesMissing {
            path: config.paths.resources.display().to_string(),
        });
    }

    let audio_exists = config.paths.audio.is_dir();
    if !audio_exists {
        warnings.push(ConfigWarning::AudioMissing {
            path: config.paths.audio.display().to_string(),
        });
    }

    for pattern in &config.media.patterns {
        match compile_glob(pattern) {
            Err(err) => warnings.push(ConfigWarning::InvalidMediaPattern {
                pattern: pattern.clone(),
                reason: err.to_string(),
            }),
            Ok(glob) if audio_exists => {
                let matcher = glob.compile_matcher();
                if !any_file_matches(&config.paths.audio, |name| matcher.is_match(name)) {
                    warnings.push(ConfigWarning::MediaPatternMatchesNothing {
                        pattern: pattern.clone(),
                    });
                }
            }
            Ok(_) => {}
        }
    }

    warnings
}

/// Checks whether any regular file directly inside `dir` has a matching name.
fn any_file_matches(dir: &Path, is_match: impl Fn(&Path) -> bool) -> bool {
    let Ok(entries) = fs::read_dir(dir) else {
        return false;
    };

    entries.flatten().any(|entry| {
        let path = entry.path();
        path.is_file() && is_match(Path::new(&entry.file_name()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestDir;

    /// A project with every directory and file in place.
    fn complete_project() -> TestDir {
        let dir = TestDir::new();
        dir.create_file("resources/index.txt", "Book\n  01_a First\n");
        dir.create_file("out/audio/01_a.mp3", "");
        dir
    }

    #[test]
    fn test_complete_project_has_no_warnings() {
        let dir = complete_project();
        let config = Config::with_base(dir.path());
        assert!(validate_config(&config).is_empty());
    }

    #[test]
    fn test_empty_project() {
        let dir = TestDir::new();
        let config = Config::with_base(dir.path());

        let warnings = validate_config(&config);
        assert_eq!(warnings.len(), 2);
        assert!(matches!(warnings[0], ConfigWarning::ResourcesMissing { .. }));
        assert!(matches!(warnings[1], ConfigWarning::AudioMissing { .. }));
    }

    #[test]
    fn test_missing_index() {
        let dir = TestDir::new();
        dir.create_dir("resources");
        dir.create_file("out/audio/01_a.mp3", "");
        let config = Config::with_base(dir.path());

        let warnings = validate_config(&config);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].to_string().contains("index.txt"));
    }

    #[test]
    fn test_pattern_matching_nothing() {
        let dir = complete_project();
        let mut config = Config::with_base(dir.path());
        config.media.patterns = vec!["*.mp3".to_string(), "*.flac".to_string()];

        let warnings = validate_config(&config);
        assert_eq!(
            warnings,
            vec![ConfigWarning::MediaPatternMatchesNothing {
                pattern: "*.flac".to_string()
            }]
        );
    }

    #[test]
    fn test_directories_do_not_count_as_media() {
        let dir = TestDir::new();
        dir.create_file("resources/index.txt", "");
        dir.create_dir("out/audio/old.mp3");
        let config = Config::with_base(dir.path());

        let warnings = validate_config(&config);
        assert_eq!(warnings.len(), 1);
        assert!(matches!(
            warnings[0],
            ConfigWarning::MediaPatternMatchesNothing { .. }
        ));
    }

    #[test]
    fn test_invalid_pattern() {
        let dir = complete_project();
        let mut config = Config::with_base(dir.path());
        config.media.patterns = vec!["[mp3".to_string()];

        let warnings = validate_config(&config);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].to_string().starts_with("media pattern '[mp3' is invalid"));
    }
}
