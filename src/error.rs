//! Unified SDK error types.

use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("Data source error: {0}")]
    Source(#[from] SourceError),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Errors raised by a `SeriesSource` implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

/// Conversion errors for a single wire record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("Malformed {field}: {value:?}")]
    Malformed { field: &'static str, value: String },

    #[error("Negative {field}: {value}")]
    Negative { field: &'static str, value: String },
}

impl SdkError {
    /// Whether the caller should retry the whole chart request.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SdkError::Source(SourceError::Transport(_)))
    }
}
