//! Shared context for running CLI commands.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
};

use iamreader_annotations::Annotations;
use iamreader_config::{Config, ConfigError, MediaPatterns};

use crate::cli::{args::GlobalArgs, media::discover_media};

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (defaults below `cwd` if no config files were found).
    pub config: Config,
    /// Index file given on the command line, already resolved against `cwd`.
    index_override: Option<PathBuf>,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load(global: &GlobalArgs) -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        Ok(Self::new(cwd, config, global.index.as_deref()))
    }

    /// Builds a context from already loaded parts.
    pub fn new(cwd: PathBuf, config: Config, index_override: Option<&Path>) -> Self {
        let index_override = index_override.map(|path| cwd.join(path));
        Self {
            cwd,
            config,
            index_override,
        }
    }

    /// Returns the index file in effect.
    pub fn index_path(&self) -> PathBuf {
        self.index_override
            .clone()
            .unwrap_or_else(|| self.config.index_path())
    }

    /// Parses the index, printing a consistent error on failure.
    pub fn annotations(&self) -> Result<Annotations, ExitCode> {
        Annotations::load(&self.index_path()).map_err(|e| {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        })
    }

    /// Lists the recorded files in the audio directory, printing a consistent error on
    /// failure.
    pub fn media_files(&self) -> Result<Vec<PathBuf>, ExitCode> {
        let patterns = self.config.compile_media_patterns();
        list_or_failure(&self.config.paths.audio, patterns)
    }

    /// Lists the rendered files in the video directory that are due for publishing.
    pub fn publish_files(&self) -> Result<Vec<PathBuf>, ExitCode> {
        let patterns = self.config.compile_publish_patterns();
        list_or_failure(&self.config.paths.video, patterns)
    }
}

/// Lists `dir` with compiled `patterns`, or prints the error and fails.
fn list_or_failure(
    dir: &Path,
    patterns: Result<MediaPatterns, ConfigError>,
) -> Result<Vec<PathBuf>, ExitCode> {
    let patterns = patterns.map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::FAILURE
    })?;

    discover_media(dir, &patterns).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::FAILURE
    })
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}
