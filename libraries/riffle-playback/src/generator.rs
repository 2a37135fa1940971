//! Queue generation
//!
//! Turns a flat track collection plus a source into a ready [`Queue`].
//! Release and playlist queues keep the order they are given in; the
//! shuffle-all queue is a uniform random permutation of the catalog.

use crate::queue::Queue;
use rand::seq::SliceRandom;
use rand::{thread_rng, Rng};
use riffle_core::{PlaylistId, QueueOrigin, ReleaseId, Track};
use tracing::debug;

/// Build a queue over `tracks` in the given order
///
/// Starts at index 0, unshuffled, repeat off. `label` is only used for
/// logging; the caller tags the origin afterwards.
pub fn generate_from_tracks(tracks: Vec<Track>, label: &str) -> Queue {
    debug!(label = %label, tracks = tracks.len(), "Generating queue");
    Queue::new(tracks)
}

/// Queue over a release, in the order supplied (track-number order)
pub fn from_release(id: ReleaseId, name: impl Into<String>, tracks: Vec<Track>) -> Queue {
    let name = name.into();
    generate_from_tracks(tracks, &name).with_origin(QueueOrigin::Release { id, name })
}

/// Queue over a playlist, in playlist order
pub fn from_playlist(
    id: PlaylistId,
    name: impl Into<String>,
    owned: bool,
    tracks: Vec<Track>,
) -> Queue {
    let name = name.into();
    generate_from_tracks(tracks, &name).with_origin(QueueOrigin::Playlist { id, name, owned })
}

/// Queue over the whole catalog in random order
pub fn shuffle_all(catalog: Vec<Track>) -> Queue {
    shuffle_all_with(catalog, &mut thread_rng())
}

/// [`shuffle_all`] with a caller-supplied RNG
pub fn shuffle_all_with<R: Rng + ?Sized>(mut catalog: Vec<Track>, rng: &mut R) -> Queue {
    shuffle_tracks(&mut catalog, rng);

    let mut queue = generate_from_tracks(catalog, "shuffle all").with_origin(QueueOrigin::shuffle_all());
    queue.set_shuffled(true);
    queue
}

/// Fisher-Yates shuffle
///
/// Each track has equal probability of landing at any position.
pub fn shuffle_tracks<R: Rng + ?Sized>(tracks: &mut [Track], rng: &mut R) {
    tracks.shuffle(rng);
}
