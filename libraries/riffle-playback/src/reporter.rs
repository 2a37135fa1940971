//! Backend collaborators
//!
//! Outbound calls the coordinator makes: record a listen, persist a new
//! playlist order. Calls are fire-and-forget; an `Err` here only means the
//! request could not be handed off, and the coordinator logs it and moves
//! on without touching local state.

use crate::error::Result;
use riffle_core::{PlaylistId, PlaylistPosition, Track};
use tracing::debug;

/// Receiver of outbound playback requests
pub trait PlaybackReporter: Send {
    /// Count one listen of `track`
    fn record_listen(&self, track: &Track) -> Result<()>;

    /// Store a new order for an owned playlist
    fn persist_playlist_order(
        &self,
        playlist_id: &PlaylistId,
        order: &[PlaylistPosition],
    ) -> Result<()>;
}

/// Reporter that drops every request
///
/// For offline sessions and hosts that do not track statistics.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl PlaybackReporter for NullReporter {
    fn record_listen(&self, track: &Track) -> Result<()> {
        debug!(track_id = %track.id, "Listen not reported (offline)");
        Ok(())
    }

    fn persist_playlist_order(
        &self,
        playlist_id: &PlaylistId,
        order: &[PlaylistPosition],
    ) -> Result<()> {
        debug!(
            playlist_id = %playlist_id,
            tracks = order.len(),
            "Playlist order not persisted (offline)"
        );
        Ok(())
    }
}
