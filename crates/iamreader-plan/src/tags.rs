//! Audio tag plans.
//!
//! Describes the ID3 values a tagger would stamp onto each recorded file: the book's
//! author as artist, the first title below the root as album and the node's own title.
//! When the resources directory holds a cover image, every file gets it as front cover.

use std::path::{Path, PathBuf};

use iamreader_annotations::FileMatch;
use serde::Serialize;
use tracing::warn;

/// Genre written to every file.
pub const GENRE: &str = "Audiobook";

/// Cover image file name inside the resources directory.
pub const COVER_FILENAME: &str = "cover.jpg";

/// Returns the cover image in `resources`, if there is one.
pub fn cover_image(resources: &Path) -> Option<PathBuf> {
    let cover = resources.join(COVER_FILENAME);
    cover.is_file().then_some(cover)
}

/// Tag values for one media file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagPlan {
    /// The media file.
    pub path: PathBuf,
    /// Its media id.
    pub stem: String,
    /// 1-based position among all considered files.
    pub track: usize,
    /// Author of the book the node belongs to.
    pub artist: String,
    /// First title below the root, or empty for top-level nodes.
    pub album: String,
    /// The node's own title.
    pub title: String,
    /// Always [`GENRE`].
    pub genre: String,
    /// Release year.
    pub year: i32,
    /// Front cover image, when the book has one.
    pub cover: Option<PathBuf>,
}

/// Builds tag plans for `matches`, in iteration order.
///
/// The track counter advances for every file, so a gap in the numbering marks a file
/// with no node. Such files are skipped with a warning.
pub fn plan_tags<'a, I>(matches: I, year: i32, cover: Option<&Path>) -> Vec<TagPlan>
where
    I: IntoIterator<Item = FileMatch<'a>>,
{
    let mut plans = Vec::new();

    for (track, file) in (1..).zip(matches) {
        let Some(node) = file.node else {
            warn!(file = %file.stem, "no index entry, skipped");
            continue;
        };

        plans.push(TagPlan {
            track,
            artist: node.author_of_top_ancestor(),
            album: node
                .full_title_path(false)
                .into_iter()
                .next()
                .unwrap_or_default(),
            title: node.title.clone(),
            genre: GENRE.to_string(),
            year,
            cover: cover.map(Path::to_path_buf),
            stem: file.stem,
            path: file.path,
        });
    }

    plans
}
