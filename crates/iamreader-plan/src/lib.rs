//! Read-only plans derived from an iamreader index.
//!
//! Each recording pipeline consumes the annotation tree the same way: walk the matched
//! media files in order and derive something from each node. This crate computes those
//! derivations without touching any media:
//!
//! - [`plan_tags`]: the audio tag values per file
//! - [`plan_captions`]: caption text and output locations per file
//! - [`materialize`]: the next publishing records for a service, given its [`Ledger`]

#![warn(missing_docs)]

mod captions;
mod error;
mod ledger;
mod schedule;
mod tags;
mod template;

pub use captions::{BACKGROUND_FILENAME, CaptionLayout, CaptionPlan, plan_captions};
pub use error::PlanError;
pub use ledger::{Ledger, Record, ServiceLedger};
pub use schedule::{RelativeSchedule, published_date};
pub use tags::{COVER_FILENAME, GENRE, TagPlan, cover_image, plan_tags};
pub use template::materialize;
