//! Error types for plan derivation.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur while reading the ledger or materializing records.
#[derive(Debug, Error)]
pub enum PlanError {
    /// The ledger file could not be read.
    #[error("failed to read ledger {path}: {source}")]
    ReadLedger {
        /// Path to the ledger.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The ledger file is not valid JSON of the expected shape.
    #[error("failed to parse ledger {path}: {source}")]
    ParseLedger {
        /// Path to the ledger.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// A relative `dt_pub` value could not be understood.
    #[error("invalid publication schedule '{value}': {reason}")]
    InvalidSchedule {
        /// The offending value.
        value: String,
        /// What was wrong with it.
        reason: &'static str,
    },

    /// The last published item carries a `dt_pub` that does not start with a date.
    #[error("invalid publication date '{value}' in ledger")]
    InvalidPublishedDate {
        /// The offending value.
        value: String,
    },
}
