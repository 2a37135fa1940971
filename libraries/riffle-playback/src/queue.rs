//! Ordered play queue
//!
//! A flat list of tracks plus a "now playing" pointer. The queue knows
//! nothing about audio; it only keeps `current_index` pointing at the same
//! logical track across reorders and removals.
//!
//! ```text
//!  index:   0      1      2      3
//!         [ A ]  [ B ]  [ C ]  [ A ]    <- duplicates allowed
//!                  ^
//!             current_index
//! ```

use crate::error::{PlaybackError, Result};
use crate::types::RepeatMode;
use riffle_core::{PlaylistPosition, QueueId, QueueOrigin, Track};
use serde::Serialize;

/// Play queue
///
/// Invariant: `current_index < tracks.len()` whenever `tracks` is non-empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Queue {
    id: QueueId,
    tracks: Vec<Track>,
    current_index: usize,
    shuffled: bool,
    repeat_mode: RepeatMode,
    origin: Option<QueueOrigin>,
    /// Tracks were added or removed after generation
    diverged: bool,
}

impl Queue {
    /// Create a queue over `tracks`, starting at the first one
    pub fn new(tracks: Vec<Track>) -> Self {
        Self {
            id: QueueId::generate(),
            tracks,
            current_index: 0,
            shuffled: false,
            repeat_mode: RepeatMode::Off,
            origin: None,
            diverged: false,
        }
    }

    // ===== Accessors =====

    /// Queue instance id
    pub fn id(&self) -> QueueId {
        self.id
    }

    /// All tracks in play order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Track at `index`
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the queue has no tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// "Now playing" position
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Track at the "now playing" position
    pub fn current_track(&self) -> Option<&Track> {
        self.tracks.get(self.current_index)
    }

    /// Whether the queue was shuffled when generated
    pub fn is_shuffled(&self) -> bool {
        self.shuffled
    }

    /// Repeat mode
    pub fn repeat_mode(&self) -> RepeatMode {
        self.repeat_mode
    }

    /// Provenance tag
    pub fn origin(&self) -> Option<&QueueOrigin> {
        self.origin.as_ref()
    }

    /// Whether the track set still matches the source it was built from
    ///
    /// Reordering keeps a queue in sync; adding or removing tracks does not.
    pub fn mirrors_origin(&self) -> bool {
        !self.diverged
    }

    /// Current order as playlist positions
    pub fn positions(&self) -> Vec<PlaylistPosition> {
        PlaylistPosition::from_tracks(&self.tracks)
    }

    // ===== Builders (used by the generator) =====

    pub(crate) fn set_shuffled(&mut self, shuffled: bool) {
        self.shuffled = shuffled;
    }

    /// Tag the queue with its source
    pub fn with_origin(mut self, origin: QueueOrigin) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Start at `index` instead of the first track
    pub fn starting_at(mut self, index: usize) -> Result<Self> {
        self.go_to(index)?;
        Ok(self)
    }

    // ===== Mutations =====

    /// Set the repeat mode
    pub fn set_repeat_mode(&mut self, mode: RepeatMode) {
        self.repeat_mode = mode;
    }

    /// Point `current_index` at `index`
    pub fn go_to(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        self.current_index = index;
        Ok(())
    }

    /// Append a track without touching `current_index`
    pub fn add_to_end(&mut self, track: Track) {
        self.tracks.push(track);
        self.diverged = true;
    }

    /// Append several tracks without touching `current_index`
    pub fn extend(&mut self, tracks: impl IntoIterator<Item = Track>) {
        let before = self.tracks.len();
        self.tracks.extend(tracks);
        self.diverged |= self.tracks.len() != before;
    }

    /// Move the track at `from` so it ends up at `to`
    ///
    /// Remove-then-insert semantics: `to` is an index into the list after
    /// the removal. `current_index` follows the track it pointed at.
    pub fn move_track(&mut self, from: usize, to: usize) -> Result<()> {
        self.check_index(from)?;
        self.check_index(to)?;

        if from == to {
            return Ok(());
        }

        let track = self.tracks.remove(from);
        self.tracks.insert(to, track);

        self.current_index = index_after_move(self.current_index, from, to);

        Ok(())
    }

    /// Remove the track at `index`
    ///
    /// Refused for the current track and for the last remaining track.
    pub fn remove(&mut self, index: usize) -> Result<Track> {
        self.check_index(index)?;

        if self.tracks.len() <= 1 {
            return Err(PlaybackError::CannotRemoveLastTrack);
        }
        if index == self.current_index {
            return Err(PlaybackError::CannotRemoveCurrent(index));
        }

        let track = self.tracks.remove(index);
        self.diverged = true;
        if index < self.current_index {
            self.current_index -= 1;
        }

        Ok(track)
    }

    // ===== Navigation =====

    /// Index that follows the current one under `repeat`
    ///
    /// `None` means there is no next track and playback should stop.
    pub fn compute_next(&self, repeat: RepeatMode) -> Option<usize> {
        if self.tracks.is_empty() {
            return None;
        }

        let last = self.tracks.len() - 1;
        match repeat {
            RepeatMode::Track => Some(self.current_index),
            RepeatMode::Queue if self.current_index >= last => Some(0),
            RepeatMode::Off if self.current_index >= last => None,
            RepeatMode::Queue | RepeatMode::Off => Some(self.current_index + 1),
        }
    }

    /// Index that precedes the current one under `repeat`
    ///
    /// `None` means there is no previous track.
    pub fn compute_previous(&self, repeat: RepeatMode) -> Option<usize> {
        if self.tracks.is_empty() {
            return None;
        }

        match repeat {
            RepeatMode::Track => Some(self.current_index),
            RepeatMode::Queue if self.current_index == 0 => Some(self.tracks.len() - 1),
            RepeatMode::Off if self.current_index == 0 => None,
            RepeatMode::Queue | RepeatMode::Off => Some(self.current_index - 1),
        }
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.tracks.len() {
            return Err(PlaybackError::IndexOutOfBounds {
                index,
                len: self.tracks.len(),
            });
        }
        Ok(())
    }
}

/// Where the row at `index` ends up after moving `from` to `to`
pub(crate) fn index_after_move(index: usize, from: usize, to: usize) -> usize {
    if index == from {
        to
    } else if from < index && to >= index {
        index - 1
    } else if from > index && to <= index {
        index + 1
    } else {
        index
    }
}
