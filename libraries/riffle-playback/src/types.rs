//! Core types for playback coordination

use crate::error::{PlaybackError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Repeat mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop after the last track
    #[default]
    Off,

    /// Replay the current track
    Track,

    /// Wrap around to the first track
    Queue,
}

impl RepeatMode {
    /// Next mode in the UI cycle: off -> queue -> track -> off
    pub fn cycle(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::Queue,
            RepeatMode::Queue => RepeatMode::Track,
            RepeatMode::Track => RepeatMode::Off,
        }
    }
}

/// Coordinator state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// No queue loaded
    Idle,

    /// Queue loaded, engine paused
    Paused,

    /// Queue loaded, engine advancing
    Playing,

    /// Seek in flight; engine play/pause side effects are ignored
    Seeking,
}

/// What to do when a track's media cannot be loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadFailurePolicy {
    /// Stay on the failed track until the user navigates away
    #[default]
    Stall,

    /// Move on to the next track, stopping once every track has failed
    Skip,
}

/// Longest accepted seek settle window
pub const MAX_SEEK_SETTLE_MS: u64 = 5_000;

/// Configuration for the queue coordinator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Initial volume (0-100, default: 80)
    pub volume: u8,

    /// How long engine play/pause events are ignored after a seek (default: 250ms)
    pub seek_settle_ms: u64,

    /// Seconds of playback after which a listen counts (default: 30)
    pub listen_threshold_secs: u64,

    /// Fraction of the track that also counts, if reached earlier (default: 0.25)
    pub listen_threshold_ratio: f64,

    /// Load failure handling (default: Stall)
    pub load_failure: LoadFailurePolicy,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: 80,
            seek_settle_ms: 250,
            listen_threshold_secs: 30,
            listen_threshold_ratio: 0.25,
            load_failure: LoadFailurePolicy::Stall,
        }
    }
}

impl PlaybackConfig {
    /// Seek suppression window
    pub fn seek_settle(&self) -> Duration {
        Duration::from_millis(self.seek_settle_ms.min(MAX_SEEK_SETTLE_MS))
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.volume > 100 {
            return Err(PlaybackError::InvalidConfig(format!(
                "volume must be 0-100, got {}",
                self.volume
            )));
        }
        if !(self.listen_threshold_ratio > 0.0 && self.listen_threshold_ratio <= 1.0) {
            return Err(PlaybackError::InvalidConfig(format!(
                "listen_threshold_ratio must be in (0, 1], got {}",
                self.listen_threshold_ratio
            )));
        }
        if self.seek_settle_ms > MAX_SEEK_SETTLE_MS {
            return Err(PlaybackError::InvalidConfig(format!(
                "seek_settle_ms must be at most {MAX_SEEK_SETTLE_MS}, got {}",
                self.seek_settle_ms
            )));
        }
        Ok(())
    }
}
