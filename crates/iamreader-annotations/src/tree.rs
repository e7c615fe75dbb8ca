//! The annotation tree container.
//!
//! [`Annotations`] owns every node of a parsed index in a flat arena together with the
//! media id lookup table. It is built once, eagerly, and is read-only afterwards.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use crate::{
    AnnotationError,
    build::build_nodes,
    matcher::FileMatches,
    node::{AnnotationNode, NodeId},
    resolve::NodeRef,
};

/// A parsed index: all nodes plus the media id lookup table.
#[derive(Debug, Clone, Default)]
pub struct Annotations {
    /// Path the index was loaded from, if it came from disk.
    source: Option<PathBuf>,
    /// All nodes in encounter order.
    nodes: Vec<AnnotationNode>,
    /// Media id to node. Later duplicates replace earlier ones.
    by_media_id: HashMap<String, NodeId>,
}

impl Annotations {
    /// Reads and parses the index file at `path`.
    pub fn load(path: &Path) -> Result<Self, AnnotationError> {
        let content = fs::read_to_string(path).map_err(|source| AnnotationError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;

        let mut annotations = Self::parse(&content)?;
        annotations.source = Some(path.to_path_buf());
        debug!(
            path = %path.display(),
            nodes = annotations.len(),
            media = annotations.by_media_id.len(),
            "loaded index"
        );
        Ok(annotations)
    }

    /// Parses an index held in memory.
    pub fn parse(content: &str) -> Result<Self, AnnotationError> {
        let nodes = build_nodes(content)?;

        let mut by_media_id = HashMap::new();
        for (idx, node) in nodes.iter().enumerate() {
            if let Some(media_id) = &node.media_id
                && let Some(previous) = by_media_id.insert(media_id.clone(), NodeId(idx))
            {
                warn!(
                    media_id = %media_id,
                    line = node.line,
                    shadowed_line = nodes[previous.0].line,
                    "duplicate media id, the later entry wins"
                );
            }
        }

        Ok(Self {
            source: None,
            nodes,
            by_media_id,
        })
    }

    /// Returns the path the index was loaded from.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the index produced no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the raw node data for `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    pub fn get(&self, id: NodeId) -> &AnnotationNode {
        &self.nodes[id.0]
    }

    /// Returns a navigable view of the node `id`.
    pub fn node(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef::new(self, id)
    }

    /// Looks up the node bound to a media id.
    pub fn node_by_media_id(&self, media_id: &str) -> Option<NodeRef<'_>> {
        self.by_media_id
            .get(media_id)
            .map(|&id| NodeRef::new(self, id))
    }

    /// Returns all media ids in the lookup table, sorted.
    pub fn media_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.by_media_id.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Returns every node in encounter (line) order.
    pub fn iter(&self) -> impl Iterator<Item = NodeRef<'_>> {
        (0..self.nodes.len()).map(|idx| NodeRef::new(self, NodeId(idx)))
    }

    /// Returns the root nodes in encounter order.
    pub fn roots(&self) -> impl Iterator<Item = NodeRef<'_>> {
        self.iter().filter(|node| node.is_root())
    }

    /// Returns every node in root-first, depth-first order.
    pub fn iter_preorder(&self) -> Preorder<'_> {
        let mut stack: Vec<NodeId> = self.roots().map(|node| node.id()).collect();
        stack.reverse();
        Preorder { tree: self, stack }
    }

    /// Pairs media files with their nodes by file stem, in sorted path order.
    ///
    /// The caller's collection is left untouched; a sorted copy is walked lazily.
    pub fn nodes_for_paths<I, P>(&self, paths: I) -> FileMatches<'_>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        FileMatches::new(self, paths)
    }
}

/// Depth-first, root-first iterator over an [`Annotations`] tree.
pub struct Preorder<'a> {
    /// The tree being walked.
    tree: &'a Annotations,
    /// Pending nodes, next on top.
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = self.tree.get(id);
        self.stack.extend(node.children.iter().rev());
        Some(NodeRef::new(self.tree, id))
    }
}
