//! Annotation nodes stored in the tree arena.
//!
//! Nodes never own each other. Parent and child relations are `NodeId` indices into the
//! owning [`Annotations`](crate::Annotations) arena, so the tree has no reference cycles
//! and can be shared freely once built.

use std::fmt;

use crate::resolve::split_author;

/// Index of a node within its [`Annotations`](crate::Annotations) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Returns the position of the node in encounter order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A single parsed record of the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationNode {
    /// Display title with any `[Author]` prefix removed.
    pub title: String,
    /// Title as written in the index, before author extraction.
    pub title_raw: String,
    /// Author declared on this node, empty when none.
    pub author: String,
    /// Number of leading whitespace characters on the source line.
    pub depth: usize,
    /// Media id bound to this node, if the line carried one.
    pub media_id: Option<String>,
    /// 1-based line number in the index source.
    pub line: usize,
    /// Parent node, `None` for roots.
    pub parent: Option<NodeId>,
    /// Child nodes in encounter order.
    pub children: Vec<NodeId>,
}

impl AnnotationNode {
    /// Creates a detached node, extracting the author from the raw title.
    pub fn new(title_raw: String, depth: usize, media_id: Option<String>, line: usize) -> Self {
        let (author, title) = split_author(&title_raw);
        Self {
            title,
            title_raw,
            author,
            depth,
            media_id,
            line,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Returns true if the node has no parent.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

impl fmt::Display for AnnotationNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.media_id {
            Some(id) => write!(f, "{} [{id}]", self.title),
            None => f.write_str(&self.title),
        }
    }
}
