//! Outline index parsing for iamreader.
//!
//! An index is a plain-text outline where indentation encodes hierarchy:
//!
//! ```text
//! [Mark Twain] Tom Sawyer
//!   01_ch1 Chapter One
//!   02_ch2 Chapter Two
//!     xx_ch2a A Footnote
//! ```
//!
//! This crate turns such a document into an immutable [`Annotations`] tree. It supports:
//! - Media ids (`01_ch1`, `xx_ch2a`) binding nodes to media file stems
//! - `[Author]` title prefixes, inherited from the top ancestor
//! - `-` commentary lines, which produce no node
//! - Matching media files against the tree in sorted path order

#![warn(missing_docs)]

mod build;
mod classify;
mod error;
mod matcher;
mod node;
mod resolve;
mod tree;

pub use build::{TreeBuilder, build_nodes};
pub use classify::{ContentLine, LineKind, classify_line};
pub use error::AnnotationError;
pub use matcher::{FileMatch, FileMatches};
pub use node::{AnnotationNode, NodeId};
pub use resolve::{Ancestors, NodeRef, split_author};
pub use tree::{Annotations, Preorder};
