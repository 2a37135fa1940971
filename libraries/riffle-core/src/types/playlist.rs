/// Playlist ordering types
use crate::types::{Track, TrackId};
use serde::{Deserialize, Serialize};

/// One entry of a persisted playlist order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistPosition {
    /// Track at this position
    pub track_id: TrackId,

    /// Position in the playlist (0-indexed)
    pub position: u32,
}

impl PlaylistPosition {
    /// Create a new position entry
    pub fn new(track_id: TrackId, position: u32) -> Self {
        Self { track_id, position }
    }

    /// Number a track list in its current order
    pub fn from_tracks<'a>(tracks: impl IntoIterator<Item = &'a Track>) -> Vec<Self> {
        tracks
            .into_iter()
            .enumerate()
            .map(|(i, t)| Self::new(t.id.clone(), i as u32))
            .collect()
    }
}
