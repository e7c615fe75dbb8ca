//! Error types for index loading.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur when loading an annotation index.
#[derive(Debug, Error)]
pub enum AnnotationError {
    /// Failed to read the index file.
    #[error("failed to read index file {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A media-bound line carries no title after its media id.
    #[error("empty title for media id '{media_id}' on line {line}")]
    EmptyTitle {
        /// 1-based line number in the index source.
        line: usize,
        /// The media id that was matched on the line.
        media_id: String,
    },
}
