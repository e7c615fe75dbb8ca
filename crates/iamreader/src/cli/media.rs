//! Media file discovery in the audio and video directories.

use std::{
    ffi::OsStr,
    io,
    path::{Path, PathBuf},
};

use iamreader_config::MediaPatterns;
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

/// Failure to list a media directory.
#[derive(Debug, Error)]
#[error("failed to list media directory {}: {source}", dir.display())]
pub struct MediaError {
    /// The directory being listed.
    dir: PathBuf,
    /// Underlying error.
    #[source]
    source: io::Error,
}

/// Returns the regular files directly inside `dir` whose names match `patterns`.
///
/// Hidden files are ignored and symlinks are not followed. The result is sorted.
pub fn discover_media(dir: &Path, patterns: &MediaPatterns) -> Result<Vec<PathBuf>, MediaError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
    {
        let entry = entry.map_err(|e| MediaError {
            dir: dir.to_path_buf(),
            source: e.into(),
        })?;

        if !entry.file_type().is_file() || is_hidden(entry.file_name()) {
            continue;
        }
        if patterns.matches(entry.path()) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    debug!(dir = %dir.display(), count = files.len(), "discovered media files");
    Ok(files)
}

/// Returns true for dot-files.
fn is_hidden(name: &OsStr) -> bool {
    name.to_str().is_some_and(|s| s.starts_with('.'))
}
