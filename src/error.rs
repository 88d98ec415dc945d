//! Error types for loading report input and driving a generator.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for treemap operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures at the crate boundary.
///
/// The tree-building core itself degrades silently (missing dimensions,
/// zero sums, unmatched past rows); these variants cover input that cannot
/// be read at all and generators driven out of order.
#[derive(Debug, Error)]
pub enum Error {
    /// Report file could not be read.
    #[error("failed to read report '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Report JSON could not be decoded.
    #[error("invalid report JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A period list with no tables.
    #[error("report input contains no tables")]
    NoPeriods,

    /// More than a past and a current table.
    #[error("report input has {0} period tables, at most 2 are supported")]
    TooManyPeriods(usize),

    /// Configuration or generation attempted after `generate` already ran.
    #[error("generator already produced its tree and cannot be reused")]
    AlreadyGenerated,
}
