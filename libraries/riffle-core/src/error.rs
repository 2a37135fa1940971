//! Core error types for Riffle

use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for Riffle
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Identifier was empty or malformed
    #[error("Invalid {kind} id: {value:?}")]
    InvalidId { kind: &'static str, value: String },

    /// Track has no playable media locator
    #[error("Track {0} has no media URL")]
    MissingMediaUrl(String),

    /// Track has no title
    #[error("Track {0} has no title")]
    MissingTitle(String),
}
