/// Track domain type
use crate::error::{CoreError, Result};
use crate::types::{ReleaseId, TrackId};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Playable track
///
/// Immutable once placed in a queue. The same track may appear more than
/// once in a queue, so position (not id) identifies a queue entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Stable track identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Artist display name
    #[serde(default)]
    pub artist: String,

    /// Release this track belongs to
    #[serde(default)]
    pub release_id: Option<ReleaseId>,

    /// Release title (for display/linking)
    #[serde(default)]
    pub release_title: Option<String>,

    /// Position within the release
    #[serde(default)]
    pub track_number: Option<u32>,

    /// Locator of the playable media resource
    pub file_url: String,

    /// Known length, `None` until measured
    #[serde(default, with = "crate::types::serde_secs::option")]
    pub duration: Option<Duration>,

    /// Lyrics (display only)
    #[serde(default)]
    pub lyrics: Option<String>,

    /// Artwork locator (display only)
    #[serde(default)]
    pub artwork_url: Option<String>,

    /// Listen count as last reported by the backend (display only)
    #[serde(default)]
    pub listen_count: Option<u64>,
}

impl Track {
    /// Create a new track with minimal metadata
    pub fn new(
        id: impl Into<TrackId>,
        title: impl Into<String>,
        file_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: String::new(),
            release_id: None,
            release_title: None,
            track_number: None,
            file_url: file_url.into(),
            duration: None,
            lyrics: None,
            artwork_url: None,
            listen_count: None,
        }
    }

    /// Set the artist
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = artist.into();
        self
    }

    /// Attach release metadata
    pub fn with_release(
        mut self,
        release_id: impl Into<ReleaseId>,
        release_title: impl Into<String>,
        track_number: u32,
    ) -> Self {
        self.release_id = Some(release_id.into());
        self.release_title = Some(release_title.into());
        self.track_number = Some(track_number);
        self
    }

    /// Set the known duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration).filter(|d| !d.is_zero());
        self
    }

    /// Duration if it has been measured and is non-zero
    pub fn known_duration(&self) -> Option<Duration> {
        self.duration.filter(|d| !d.is_zero())
    }

    /// Check that the track can be placed in a queue
    pub fn validate(&self) -> Result<()> {
        if self.file_url.trim().is_empty() {
            return Err(CoreError::MissingMediaUrl(self.id.to_string()));
        }
        if self.title.trim().is_empty() {
            return Err(CoreError::MissingTitle(self.id.to_string()));
        }
        Ok(())
    }
}
