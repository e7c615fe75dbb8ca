//! Tree construction from classified index lines.
//!
//! The builder is a single pass over content lines. Each new node is placed relative to
//! the node created just before it:
//! - same depth: sibling, sharing the previous node's parent
//! - deeper: child of the previous node
//! - shallower ("level up"): sibling of the latest node ever recorded at that exact depth
//!
//! Level-up resolution looks up the depth history rather than popping an indentation
//! stack, so irregular indentation can attach a node somewhere other than its visual
//! ancestor. Index files in the wild rely on this order and it is kept as is.

use std::collections::BTreeMap;

use tracing::warn;

use crate::{
    AnnotationError,
    classify::{ContentLine, LineKind, classify_line},
    node::{AnnotationNode, NodeId},
};

/// Incremental builder for the node arena.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    /// All nodes in encounter order.
    nodes: Vec<AnnotationNode>,
    /// Most recently created node at each depth.
    by_depth: BTreeMap<usize, NodeId>,
    /// Most recently created node overall.
    last: Option<NodeId>,
}

impl TreeBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one content line to the tree and returns the new node's id.
    pub fn push(&mut self, content: ContentLine) -> NodeId {
        let ContentLine {
            line,
            depth,
            title,
            media_id,
        } = content;

        let id = NodeId(self.nodes.len());
        let mut node = AnnotationNode::new(title, depth, media_id, line);
        node.parent = self.resolve_parent(depth, line);

        if let Some(parent) = node.parent {
            self.nodes[parent.0].children.push(id);
        }

        self.by_depth.insert(depth, id);
        self.nodes.push(node);
        self.last = Some(id);
        id
    }

    /// Picks the parent for a node at `depth` given the builder's history.
    fn resolve_parent(&self, depth: usize, line: usize) -> Option<NodeId> {
        let last = &self.nodes[self.last?.0];

        if depth == last.depth {
            return last.parent;
        }
        if depth > last.depth {
            return self.last;
        }

        if let Some(&seen) = self.by_depth.get(&depth) {
            return self.nodes[seen.0].parent;
        }

        // Nothing was ever recorded at this depth: hang the node under the latest node at
        // the closest shallower depth, or make it a root.
        let fallback = self.by_depth.range(..depth).next_back().map(|(_, &id)| id);
        warn!(
            line,
            depth,
            parent_line = fallback.map(|id| self.nodes[id.0].line),
            "no earlier node at this indentation, attaching to nearest shallower node"
        );
        fallback
    }

    /// Consumes the builder and returns the node arena.
    pub fn finish(self) -> Vec<AnnotationNode> {
        self.nodes
    }
}

/// Classifies every line of `content` and builds the node arena.
///
/// Fails on the first line that cannot be classified; no partial tree is returned.
pub fn build_nodes(content: &str) -> Result<Vec<AnnotationNode>, AnnotationError> {
    let mut builder = TreeBuilder::new();

    for (idx, raw) in content.lines().enumerate() {
        if let LineKind::Content(line) = classify_line(idx + 1, raw)? {
            builder.push(line);
        }
    }

    Ok(builder.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Returns `(title, parent title)` pairs in encounter order.
    fn parents(content: &str) -> Vec<(String, Option<String>)> {
        let nodes = build_nodes(content).unwrap();
        nodes
            .iter()
            .map(|n| {
                (
                    n.title.clone(),
                    n.parent.map(|p| nodes[p.0].title.clone()),
                )
            })
            .collect()
    }

    fn pair(title: &str, parent: Option<&str>) -> (String, Option<String>) {
        (title.to_string(), parent.map(str::to_string))
    }

    #[test]
    fn test_first_node_is_root() {
        assert_eq!(parents("Book\n"), vec![pair("Book", None)]);
    }

    #[test]
    fn test_equal_depth_roots_are_siblings() {
        assert_eq!(
            parents("One\nTwo\n"),
            vec![pair("One", None), pair("Two", None)]
        );
    }

    #[test]
    fn test_deeper_line_is_child_of_previous() {
        assert_eq!(
            parents("Book\n  Part\n      Chapter\n"),
            vec![
                pair("Book", None),
                pair("Part", Some("Book")),
                pair("Chapter", Some("Part")),
            ]
        );
    }

    #[test]
    fn test_level_up_uses_latest_node_at_depth() {
        let content = "Book\n  Part One\n    Chapter\n  Part Two\n";
        assert_eq!(
            parents(content),
            vec![
                pair("Book", None),
                pair("Part One", Some("Book")),
                pair("Chapter", Some("Part One")),
                pair("Part Two", Some("Book")),
            ]
        );
    }

    #[test]
    fn test_level_up_follows_depth_history_not_stack() {
        // "F" returns to depth 4. The latest depth-4 node is "C", whose parent is "B",
        // although an indentation stack would have placed "F" under "D".
        let content = "A\n  B\n    C\n  D\n      E\n    F\n";
        assert_eq!(
            parents(content),
            vec![
                pair("A", None),
                pair("B", Some("A")),
                pair("C", Some("B")),
                pair("D", Some("A")),
                pair("E", Some("D")),
                pair("F", Some("B")),
            ]
        );
    }

    #[test]
    fn test_level_up_to_unseen_depth_attaches_to_shallower_node() {
        let content = "Book\n    Deep\n  Middle\n";
        assert_eq!(
            parents(content),
            vec![
                pair("Book", None),
                pair("Deep", Some("Book")),
                pair("Middle", Some("Book")),
            ]
        );
    }

    #[test]
    fn test_level_up_to_unseen_depth_without_shallower_node_is_root() {
        let content = "    Deep\n  Middle\n";
        assert_eq!(
            parents(content),
            vec![pair("Deep", None), pair("Middle", None)]
        );
    }

    #[test]
    fn test_children_recorded_in_order() {
        let nodes = build_nodes("Book\n  A\n  B\n    B1\n  C\n").unwrap();
        let root = &nodes[0];
        let titles: Vec<&str> = root
            .children
            .iter()
            .map(|id| nodes[id.0].title.as_str())
            .collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_comments_and_blanks_do_not_affect_structure() {
        let content = "Book\n\n  - note\n  Part\n\n    Chapter\n";
        assert_eq!(
            parents(content),
            vec![
                pair("Book", None),
                pair("Part", Some("Book")),
                pair("Chapter", Some("Part")),
            ]
        );
    }

    #[test]
    fn test_line_numbers_count_skipped_lines() {
        let nodes = build_nodes("Book\n- note\n\n  Part\n").unwrap();
        assert_eq!(nodes[0].line, 1);
        assert_eq!(nodes[1].line, 4);
    }

    #[test]
    fn test_empty_content_builds_no_nodes() {
        assert!(build_nodes("").unwrap().is_empty());
        assert!(build_nodes("\n- only a comment\n").unwrap().is_empty());
    }
}
