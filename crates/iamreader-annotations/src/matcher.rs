//! Joining media files against the tree by file stem.

use std::{
    path::{Path, PathBuf},
    vec,
};

use crate::{resolve::NodeRef, tree::Annotations};

/// One media file paired with its node, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMatch<'a> {
    /// File name without its final extension.
    pub stem: String,
    /// The file path as supplied by the caller.
    pub path: PathBuf,
    /// Node bound to `stem`, or `None` when the index has no such media id.
    pub node: Option<NodeRef<'a>>,
}

/// Lazy iterator of [`FileMatch`] items in ascending path order.
///
/// Built from a sorted copy of the caller's paths. It is consumed as it goes and cannot be
/// restarted.
pub struct FileMatches<'a> {
    /// Tree used for media id lookups.
    tree: &'a Annotations,
    /// Remaining paths, already sorted.
    paths: vec::IntoIter<PathBuf>,
}

impl<'a> FileMatches<'a> {
    /// Sorts a copy of `paths` and prepares the lookup.
    pub(crate) fn new<I, P>(tree: &'a Annotations, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut sorted: Vec<PathBuf> = paths
            .into_iter()
            .map(|p| p.as_ref().to_path_buf())
            .collect();
        sorted.sort();
        Self {
            tree,
            paths: sorted.into_iter(),
        }
    }
}

impl<'a> Iterator for FileMatches<'a> {
    type Item = FileMatch<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let path = self.paths.next()?;
        let stem = file_stem(&path);
        let node = self.tree.node_by_media_id(&stem);
        Some(FileMatch { stem, path, node })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.paths.size_hint()
    }
}

impl ExactSizeIterator for FileMatches<'_> {}

/// Returns the file name of `path` without its final extension.
fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
