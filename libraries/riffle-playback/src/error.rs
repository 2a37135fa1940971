//! Error types for playback coordination

use crate::engine::EngineError;
use thiserror::Error;

/// Playback errors
///
/// Returned for requests the coordinator refuses. Runtime failures of the
/// engine or of backend collaborators are absorbed by the coordinator and
/// only surface here when the caller asked for the failing operation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlaybackError {
    /// No queue is bound to the coordinator
    #[error("No queue loaded")]
    NoActiveQueue,

    /// Index out of bounds
    #[error("Index {index} out of bounds for queue of {len} tracks")]
    IndexOutOfBounds { index: usize, len: usize },

    /// The playing track cannot be removed
    #[error("Cannot remove the current track (index {0}); skip it first")]
    CannotRemoveCurrent(usize),

    /// A queue always keeps at least one track
    #[error("Cannot remove the only track in the queue")]
    CannotRemoveLastTrack,

    /// Engine refused or failed an operation
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Backend collaborator could not accept a request
    #[error("Report failed: {0}")]
    Report(String),

    /// Configuration value out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
