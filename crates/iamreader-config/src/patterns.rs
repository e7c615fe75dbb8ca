//! Media file pattern compilation and matching.
//!
//! Media patterns select which files in the audio directory take part in tagging,
//! captioning and publishing. They are matched against the file name only.

use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::ConfigError;

/// Compiled media file patterns.
#[derive(Debug, Clone)]
pub struct MediaPatterns {
    /// The source patterns, kept for reporting.
    patterns: Vec<String>,
    /// The compiled set.
    set: GlobSet,
}

impl MediaPatterns {
    /// Compiles a list of glob patterns.
    pub fn compile(patterns: &[String]) -> Result<Self, ConfigError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            builder.add(compile_glob(pattern)?);
        }
        let set = builder.build().map_err(|e| ConfigError::InvalidPattern {
            pattern: patterns.join(", "),
            source: e,
        })?;

        Ok(Self {
            patterns: patterns.to_vec(),
            set,
        })
    }

    /// Returns true if the file name of `path` matches any pattern.
    ///
    /// Paths without a file name never match.
    pub fn matches(&self, path: &Path) -> bool {
        path.file_name().is_some_and(|name| self.set.is_match(name))
    }

    /// Returns the source patterns.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

/// Compiles a single glob pattern.
pub(crate) fn compile_glob(pattern: &str) -> Result<Glob, ConfigError> {
    Glob::new(pattern).map_err(|e| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(patterns: &[&str]) -> MediaPatterns {
        let owned: Vec<String> = patterns.iter().map(|p| (*p).to_string()).collect();
        MediaPatterns::compile(&owned).unwrap()
    }

    #[test]
    fn test_default_pattern() {
        let patterns = compile(&["*.mp3"]);
        assert!(patterns.matches(Path::new("/book/out/audio/01_ch1.mp3")));
        assert!(patterns.matches(Path::new("xx_note.mp3")));
        assert!(!patterns.matches(Path::new("01_ch1.wav")));
        assert!(!patterns.matches(Path::new("01_ch1.mp3.bak")));
    }

    #[test]
    fn test_matches_file_name_not_directories() {
        let patterns = compile(&["0*"]);
        assert!(patterns.matches(Path::new("/data/01_a.mp3")));
        assert!(!patterns.matches(Path::new("/0audio/a.mp3")));
    }

    #[test]
    fn test_multiple_patterns() {
        let patterns = compile(&["*.mp3", "*.flac"]);
        assert!(patterns.matches(Path::new("a.flac")));
        assert!(patterns.matches(Path::new("a.mp3")));
        assert!(!patterns.matches(Path::new("a.ogg")));
        assert_eq!(patterns.patterns(), ["*.mp3", "*.flac"]);
    }

    #[test]
    fn test_no_patterns_match_nothing() {
        let patterns = compile(&[]);
        assert!(!patterns.matches(Path::new("a.mp3")));
    }

    #[test]
    fn test_path_without_file_name() {
        let patterns = compile(&["*"]);
        assert!(!patterns.matches(Path::new("/")));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = MediaPatterns::compile(&["[mp3".to_string()]).unwrap_err();
        match err {
            ConfigError::InvalidPattern { pattern, .. } => assert_eq!(pattern, "[mp3"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
