//! Line classification for index sources.
//!
//! Each raw line of an index is either skipped (blank or a `-` comment) or turned into a
//! content line carrying its indentation depth, title text and an optional media id.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::AnnotationError;

/// Matches a media-bound line: a two-digit or `xx` prefix, an underscore and a token,
/// then whitespace and the title.
static MEDIA_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^((?:[0-9]{2}|xx)_\S+)\s+(.+)$").expect("media line pattern is valid")
});

/// Marker that starts a commentary line.
const COMMENT_PREFIX: char = '-';

/// A line that produces a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine {
    /// 1-based line number in the source.
    pub line: usize,
    /// Number of leading whitespace characters.
    pub depth: usize,
    /// Title text, still including any `[Author]` prefix.
    pub title: String,
    /// Media id, when the line matched the media pattern.
    pub media_id: Option<String>,
}

/// Classification result for a single raw line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Blank or commentary line.
    Skip,
    /// A line that becomes a node.
    Content(ContentLine),
}

/// Classifies one raw line of an index source.
///
/// `line` is the 1-based line number, used for diagnostics. The raw text may still carry
/// its `\n` or `\r\n` terminator.
pub fn classify_line(line: usize, raw: &str) -> Result<LineKind, AnnotationError> {
    let text = raw.trim_end_matches(['\n', '\r']);
    let stripped = text.trim();

    if stripped.is_empty() || stripped.starts_with(COMMENT_PREFIX) {
        return Ok(LineKind::Skip);
    }

    let depth = text.chars().take_while(|c| c.is_whitespace()).count();

    let (title, media_id) = match MEDIA_LINE.captures(stripped) {
        Some(caps) => {
            let media_id = caps[1].to_string();
            let title = require_title(line, &media_id, &caps[2])?;
            debug!(line, media_id = %media_id, title = %title, "media line");
            (title, Some(media_id))
        }
        None => (stripped.to_string(), None),
    };

    Ok(LineKind::Content(ContentLine {
        line,
        depth,
        title,
        media_id,
    }))
}

/// Rejects a media-bound title that is blank.
fn require_title(line: usize, media_id: &str, title: &str) -> Result<String, AnnotationError> {
    if title.trim().is_empty() {
        return Err(AnnotationError::EmptyTitle {
            line,
            media_id: media_id.to_string(),
        });
    }
    Ok(title.to_string())
}
