//! Playback events
//!
//! The coordinator queues these for passive observers (every visual
//! "player" on screen). Hosts drain them after each call into the
//! coordinator and fan them out; observers never mutate playback state.

use crate::types::{PlaybackState, RepeatMode};
use riffle_core::{QueueId, TrackId};
use serde::{Deserialize, Serialize};

/// Events emitted by the coordinator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Coordinator state changed (idle, paused, playing, seeking)
    StateChanged {
        /// The new state
        state: PlaybackState,
    },

    /// A different track became current (or the same one was reactivated)
    TrackChanged {
        /// ID of the new current track
        track_id: TrackId,
        /// Its position in the queue
        index: usize,
        /// ID of the previously current track, if any
        previous_track_id: Option<TrackId>,
    },

    /// The active queue was replaced or mutated
    QueueChanged {
        /// Queue instance
        queue_id: QueueId,
        /// New queue length
        length: usize,
        /// New current index
        current_index: usize,
    },

    /// Position update (from engine progress ticks and seeks)
    PositionUpdate {
        /// Current playback position
        position_ms: u64,
        /// Total track duration (0 while unknown)
        duration_ms: u64,
    },

    /// Media duration became known
    DurationChanged {
        /// Duration in milliseconds
        duration_ms: u64,
    },

    /// The listen threshold was crossed for the current activation
    ListenRecorded {
        /// Track that was counted
        track_id: TrackId,
    },

    /// Reached the end of a non-repeating queue
    QueueEnded,

    /// The current track's media could not be loaded
    TrackFailed {
        /// Track that failed
        track_id: TrackId,
        /// Its position in the queue
        index: usize,
        /// Reason reported by the engine
        message: String,
    },

    /// Volume changed
    VolumeChanged {
        /// New volume level (0-100)
        level: u8,
        /// Whether audio is muted
        is_muted: bool,
    },

    /// Repeat mode changed
    RepeatModeChanged {
        /// New mode
        mode: RepeatMode,
    },

    /// Recoverable error (refused playback, failed seek, ...)
    Error {
        /// Error message
        message: String,
    },
}
