/// Queue provenance
use crate::types::{PlaylistId, ReleaseId};
use serde::{Deserialize, Serialize};

/// Where a queue came from
///
/// Used for labeling ("Shuffled from all tracks") and for recognizing that
/// a play request targets the queue that is already loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueueOrigin {
    /// Tracks of one release, in track-number order
    Release { id: ReleaseId, name: String },

    /// Tracks of a playlist, in playlist order
    Playlist {
        id: PlaylistId,
        name: String,
        /// The current user may edit (and therefore reorder) this playlist
        #[serde(default)]
        owned: bool,
    },

    /// The whole catalog in random order
    ShuffleAll { id: String, name: String },
}

impl QueueOrigin {
    /// Build the shuffle-all origin
    pub fn shuffle_all() -> Self {
        QueueOrigin::ShuffleAll {
            id: "all".to_string(),
            name: "All tracks".to_string(),
        }
    }

    /// Source name as stored
    pub fn name(&self) -> &str {
        match self {
            QueueOrigin::Release { name, .. }
            | QueueOrigin::Playlist { name, .. }
            | QueueOrigin::ShuffleAll { name, .. } => name,
        }
    }

    /// Label shown next to the queue
    pub fn label(&self) -> String {
        match self {
            QueueOrigin::Release { name, .. } => format!("Playing from {}", name),
            QueueOrigin::Playlist { name, .. } => format!("Playing from playlist {}", name),
            QueueOrigin::ShuffleAll { .. } => "Shuffled from all tracks".to_string(),
        }
    }

    /// Whether `other` names the same logical source
    ///
    /// Shuffle-all never matches: every shuffle is a new permutation.
    pub fn is_same_source(&self, other: &QueueOrigin) -> bool {
        match (self, other) {
            (QueueOrigin::Release { id: a, .. }, QueueOrigin::Release { id: b, .. }) => a == b,
            (QueueOrigin::Playlist { id: a, .. }, QueueOrigin::Playlist { id: b, .. }) => a == b,
            _ => false,
        }
    }

    /// Playlist whose order should be persisted after a reorder, if any
    pub fn owned_playlist(&self) -> Option<&PlaylistId> {
        match self {
            QueueOrigin::Playlist { id, owned: true, .. } => Some(id),
            _ => None,
        }
    }
}
