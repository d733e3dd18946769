//! Error type for ingestion and reporting.

use std::io;

/// Errors raised while reading input or writing a report.
///
/// Domain text itself never produces an error.
#[derive(Debug, thiserror::Error)]
pub enum SfxError {
    #[error(transparent)]
    Read(io::Error),
    #[error(transparent)]
    Write(io::Error),
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SfxError>;
