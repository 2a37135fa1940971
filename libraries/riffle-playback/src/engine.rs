//! Playback engine boundary
//!
//! The engine wraps the one real media resource (an audio element, a
//! decoder + output stream, ...). The coordinator is the only caller; UI
//! code never talks to an engine directly.

use std::time::Duration;
use thiserror::Error;

/// Failures reported by an engine
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Platform declined to start audio (e.g. no user gesture yet)
    #[error("Playback refused: {0}")]
    PlaybackRefused(String),

    /// Media resource could not be fetched or decoded
    #[error("Failed to load {url}: {reason}")]
    LoadFailed { url: String, reason: String },

    /// Seek was rejected
    #[error("Seek failed: {0}")]
    SeekFailed(String),
}

/// Result type for engine operations
pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// Notifications from the engine, delivered in wall-clock order
///
/// Hosts forward these to
/// [`QueueCoordinator::handle_engine_event`](crate::QueueCoordinator::handle_engine_event).
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// Playback position advanced
    TimeUpdate(Duration),

    /// Media duration became known or changed
    DurationChange(Duration),

    /// Engine started producing audio
    Playing,

    /// Engine stopped producing audio
    Paused,

    /// A seek finished settling
    Seeked,

    /// Current media reached its end
    Ended,

    /// A deferred `play()` was rejected
    PlayRejected(String),

    /// Loading the current media failed after `load()` returned
    LoadFailed(String),
}

/// Platform-agnostic playback engine
///
/// Implementors provide the real media resource. `load` and `play` may
/// complete asynchronously; their outcome is reported through
/// [`EngineEvent`]s. Immediate failures are returned as errors.
pub trait PlaybackEngine: Send {
    /// Replace the loaded media with `url`, paused at position zero
    fn load(&mut self, url: &str) -> EngineResult<()>;

    /// Start or resume playback
    fn play(&mut self) -> EngineResult<()>;

    /// Pause playback (no-op when already paused)
    fn pause(&mut self);

    /// Jump to `position`
    fn seek(&mut self, position: Duration) -> EngineResult<()>;

    /// Set linear output gain (0.0 - 1.0)
    fn set_volume(&mut self, gain: f32);

    /// Current playback position
    fn current_time(&self) -> Duration;

    /// Media duration, once known
    fn duration(&self) -> Option<Duration>;

    /// Whether the engine is actually producing audio right now
    fn is_playing(&self) -> bool;

    /// Restart the current media from the beginning
    ///
    /// Equivalent to `seek(Duration::ZERO)`
    fn rewind(&mut self) -> EngineResult<()> {
        self.seek(Duration::ZERO)
    }
}
