//! Error types for the resift-core library.

use thiserror::Error;

/// Main error type for the resift library.
#[derive(Error, Debug)]
pub enum ScanError {
    /// Receipt extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Collaborator (external AI/OCR service) error.
    #[error("collaborator error: {0}")]
    Collaborator(#[from] CollabError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to line-item extraction.
///
/// A single strategy producing zero items is not an error; it is the signal
/// for the chain to try the next strategy. Only total parse failure is
/// surfaced, so callers can offer manual entry instead of a hard failure.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExtractionError {
    /// Every strategy, including the total-only fallback, produced nothing.
    #[error("no line items detected")]
    NoItems,
}

/// Errors reported by external collaborators at the pipeline boundary.
///
/// These are always recovered: the pipeline logs them and proceeds with its
/// deterministic fallback.
#[derive(Error, Debug)]
pub enum CollabError {
    /// The collaborator could not be reached or refused the request.
    #[error("collaborator unavailable: {0}")]
    Unavailable(String),

    /// The collaborator responded with something we could not use.
    #[error("malformed collaborator response: {0}")]
    InvalidResponse(String),
}

/// Result type for the resift library.
pub type Result<T> = std::result::Result<T, ScanError>;
