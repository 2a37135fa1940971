//! Read-only view of the playback session

use crate::queue::Queue;
use crate::types::{PlaybackState, RepeatMode};
use riffle_core::{Track, TrackId};
use serde::Serialize;
use std::time::Duration;

/// Load failure attached to one queue position
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackError {
    /// Queue position of the failed track
    pub index: usize,
    /// Failed track
    pub track_id: TrackId,
    /// Reason reported by the engine
    pub message: String,
}

/// Everything an observer needs to render a player
///
/// Cloned out of the coordinator; mutating it has no effect on playback.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackSnapshot {
    pub state: PlaybackState,
    pub current_track: Option<Track>,
    pub current_index: Option<usize>,
    pub queue: Option<Queue>,
    pub is_playing: bool,
    pub current_time: Duration,
    pub duration: Duration,
    pub repeat_mode: RepeatMode,
    pub volume: u8,
    pub muted: bool,
    pub track_error: Option<TrackError>,
}

impl PlaybackSnapshot {
    /// Playback progress in `0.0..=1.0` (0 while the duration is unknown)
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 0.0;
        }
        (self.current_time.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }
}
