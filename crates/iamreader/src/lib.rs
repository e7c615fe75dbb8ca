//! iamreader: an outline-driven companion for audiobook narration.
//!
//! A narrator keeps a plain-text index of the book: one line per section, nested by
//! indentation, with recorded sections tagged by a media id such as `01_ch1`. Recorded
//! files named after those ids are paired with their index entries, and every downstream
//! step (audio tags, video captions, publishing records) reads titles and authors from
//! the resulting tree.
//!
//! The binary exposes those lookups and read-only plans; nothing here modifies media.

#![warn(missing_docs)]

pub mod cli;
