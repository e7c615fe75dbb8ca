//! Caption plans for media-to-video rendering.
//!
//! Each recorded file becomes a still-image video whose caption is the node's title path
//! below the root, one segment per block, drawn over the book's background template.

use std::path::{Path, PathBuf};

use iamreader_annotations::FileMatch;
use serde::Serialize;
use tracing::warn;

/// Background template file name inside the resources directory.
pub const BACKGROUND_FILENAME: &str = "bg.png";

/// Where rendered artifacts would go and how captions are laid out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionLayout {
    /// Text placed between title path segments.
    pub separator: String,
    /// Background image captions are drawn on.
    pub template: PathBuf,
    /// Directory for caption images.
    pub images_dir: PathBuf,
    /// Directory for rendered videos.
    pub video_dir: PathBuf,
}

impl CaptionLayout {
    /// Builds a layout whose background is [`BACKGROUND_FILENAME`] in `resources`.
    pub fn new(separator: &str, resources: &Path, images_dir: &Path, video_dir: &Path) -> Self {
        Self {
            separator: separator.to_string(),
            template: resources.join(BACKGROUND_FILENAME),
            images_dir: images_dir.to_path_buf(),
            video_dir: video_dir.to_path_buf(),
        }
    }

    /// Returns the caption image path for a media id.
    fn image_for(&self, stem: &str) -> PathBuf {
        self.images_dir.join(format!("{stem}.png"))
    }

    /// Returns the video path for a media id.
    fn video_for(&self, stem: &str) -> PathBuf {
        self.video_dir.join(format!("{stem}.avi"))
    }
}

/// Caption for one media file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaptionPlan {
    /// The source media file.
    pub path: PathBuf,
    /// Its media id.
    pub stem: String,
    /// Caption text.
    pub text: String,
    /// Background image the caption is drawn on.
    pub template: PathBuf,
    /// Would-be caption image.
    pub image: PathBuf,
    /// Would-be video.
    pub video: PathBuf,
}

/// Builds caption plans for `matches`, in iteration order.
///
/// Files without a node, and nodes whose path below the root is empty, are skipped with a
/// warning.
pub fn plan_captions<'a, I>(matches: I, layout: &CaptionLayout) -> Vec<CaptionPlan>
where
    I: IntoIterator<Item = FileMatch<'a>>,
{
    matches
        .into_iter()
        .filter_map(|file| plan_one(file, layout))
        .collect()
}

/// Builds the caption for a single file.
fn plan_one(file: FileMatch<'_>, layout: &CaptionLayout) -> Option<CaptionPlan> {
    let Some(node) = file.node else {
        warn!(file = %file.stem, "no index entry, skipped");
        return None;
    };

    let text = node.full_title_path(false).join(&layout.separator);
    if text.trim().is_empty() {
        warn!(file = %file.stem, line = node.line, "nothing to caption, skipped");
        return None;
    }

    Some(CaptionPlan {
        image: layout.image_for(&file.stem),
        video: layout.video_for(&file.stem),
        template: layout.template.clone(),
        text,
        stem: file.stem,
        path: file.path,
    })
}
