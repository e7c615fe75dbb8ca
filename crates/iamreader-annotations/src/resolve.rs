//! Title and author resolution.
//!
//! Authors are declared with a leading `[Name]` on a title. Consumers read them back
//! through [`NodeRef`], which walks the ancestor chain inside the arena.

use std::{fmt, ops::Deref, ptr};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    node::{AnnotationNode, NodeId},
    tree::Annotations,
};

/// Matches a leading bracketed author followed by the remaining title.
static AUTHOR_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[([^\]]*)\](.*)$").expect("author pattern is valid"));

/// Splits a raw title into `(author, title)`.
///
/// Without a bracket prefix the author is empty and the title is the trimmed input.
pub fn split_author(raw: &str) -> (String, String) {
    match AUTHOR_PREFIX.captures(raw.trim()) {
        Some(caps) => (caps[1].trim().to_string(), caps[2].trim().to_string()),
        None => (String::new(), raw.trim().to_string()),
    }
}

/// A borrowed view of one node together with the arena it lives in.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    /// The owning container.
    tree: &'a Annotations,
    /// The node this view points at.
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    /// Creates a view of `id` within `tree`.
    pub(crate) fn new(tree: &'a Annotations, id: NodeId) -> Self {
        Self { tree, id }
    }

    /// Returns the node's id.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the underlying node data.
    pub fn node(&self) -> &'a AnnotationNode {
        self.tree.get(self.id)
    }

    /// Returns the parent node, if any.
    pub fn parent(&self) -> Option<Self> {
        self.node().parent.map(|id| Self::new(self.tree, id))
    }

    /// Returns the children in encounter order.
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let tree = self.tree;
        self.node()
            .children
            .iter()
            .map(move |&id| NodeRef::new(tree, id))
    }

    /// Returns the ancestors, nearest first.
    pub fn ancestors(&self) -> Ancestors<'a> {
        Ancestors {
            next: self.parent(),
        }
    }

    /// Collects titles from the root down to this node.
    ///
    /// The root is still traversed when `include_root` is false, its title is just left
    /// out of the result.
    pub fn full_title_path(&self, include_root: bool) -> Vec<String> {
        let mut titles: Vec<String> = Vec::with_capacity(self.node().depth + 1);
        titles.push(self.title.clone());
        titles.extend(self.ancestors().map(|a| a.title.clone()));
        titles.reverse();

        if !include_root {
            titles.remove(0);
        }
        titles
    }

    /// Returns the author of the root of this node's ancestor chain.
    ///
    /// Authors declared on intermediate ancestors are ignored, and a root asked about
    /// itself yields an empty string.
    pub fn author_of_top_ancestor(&self) -> String {
        self.ancestors()
            .last()
            .map(|top| top.author.clone())
            .unwrap_or_default()
    }
}

impl Deref for NodeRef<'_> {
    type Target = AnnotationNode;

    fn deref(&self) -> &Self::Target {
        self.node()
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("node", self.node())
            .finish()
    }
}

impl fmt::Display for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.node(), f)
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && ptr::eq(self.tree, other.tree)
    }
}

impl Eq for NodeRef<'_> {}

/// Iterator over a node's ancestors, nearest first.
pub struct Ancestors<'a> {
    /// Next ancestor to yield.
    next: Option<NodeRef<'a>>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = current.parent();
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_author_with_brackets() {
        assert_eq!(
            split_author("[Mark Twain] Tom Sawyer"),
            ("Mark Twain".to_string(), "Tom Sawyer".to_string())
        );
        assert_eq!(
            split_author("[  Twain ]Tom"),
            ("Twain".to_string(), "Tom".to_string())
        );
    }

    #[test]
    fn test_split_author_without_brackets() {
        assert_eq!(
            split_author("  Chapter One "),
            (String::new(), "Chapter One".to_string())
        );
        // A bracket that is not leading does not declare an author.
        assert_eq!(
            split_author("Notes [draft]"),
            (String::new(), "Notes [draft]".to_string())
        );
    }

    #[test]
    fn test_split_author_empty_brackets() {
        assert_eq!(
            split_author("[] Untitled"),
            (String::new(), "Untitled".to_string())
        );
    }

    fn twain() -> Annotations {
        Annotations::parse("[Twain] Tom Sawyer\n  [Clemens] Part One\n    Chapter One\n").unwrap()
    }

    #[test]
    fn test_full_title_path() {
        let tree = twain();
        let chapter = tree.iter().last().unwrap();
        assert_eq!(
            chapter.full_title_path(true),
            vec!["Tom Sawyer", "Part One", "Chapter One"]
        );
        assert_eq!(chapter.full_title_path(false), vec!["Part One", "Chapter One"]);
    }

    #[test]
    fn test_full_title_path_of_root() {
        let tree = twain();
        let root = tree.roots().next().unwrap();
        assert_eq!(root.full_title_path(true), vec!["Tom Sawyer"]);
        assert!(root.full_title_path(false).is_empty());
    }

    #[test]
    fn test_author_of_top_ancestor_skips_nearer_authors() {
        let tree = twain();
        let chapter = tree.iter().last().unwrap();
        assert_eq!(chapter.author_of_top_ancestor(), "Twain");

        let part = chapter.parent().unwrap();
        assert_eq!(part.author, "Clemens");
        assert_eq!(part.author_of_top_ancestor(), "Twain");
    }

    #[test]
    fn test_author_of_top_ancestor_for_root_is_empty() {
        let tree = twain();
        let root = tree.roots().next().unwrap();
        assert_eq!(root.author, "Twain");
        assert_eq!(root.author_of_top_ancestor(), "");
    }

    #[test]
    fn test_ancestors_nearest_first() {
        let tree = twain();
        let chapter = tree.iter().last().unwrap();
        let titles: Vec<&str> = chapter.ancestors().map(|a| a.node().title.as_str()).collect();
        assert_eq!(titles, vec!["Part One", "Tom Sawyer"]);
    }

    #[test]
    fn test_children_in_order() {
        let tree = Annotations::parse("Book\n  A\n  B\n  C\n").unwrap();
        let root = tree.roots().next().unwrap();
        let titles: Vec<&str> = root.children().map(|c| c.node().title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }
}
