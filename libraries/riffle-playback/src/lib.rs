//! Riffle Playback - Queue and playback coordination
//!
//! This crate provides the platform-agnostic core of the player:
//! - Queue model (ordering, current index, repeat navigation)
//! - Queue generation from releases, playlists and shuffle-all
//! - A single coordinator that owns the one audio engine
//! - Seek handling that never changes the play/pause state
//! - Listen tracking (counted at most once per track activation)
//! - Volume control with a logarithmic gain curve
//!
//! The audio engine and the backend are collaborators behind the
//! [`PlaybackEngine`] and [`PlaybackReporter`] traits.
//!
//! # Example
//!
//! ```rust,ignore
//! use riffle_playback::{generator, NullReporter, PlaybackConfig, QueueCoordinator};
//!
//! let mut coordinator = QueueCoordinator::new(
//!     Box::new(engine),
//!     Box::new(NullReporter),
//!     PlaybackConfig::default(),
//! );
//!
//! coordinator.set_current_queue(generator::from_release(release_id, "Night Drive", tracks))?;
//! coordinator.play()?;
//!
//! // Feed engine notifications back in order
//! coordinator.handle_engine_event(EngineEvent::TimeUpdate(Duration::from_secs(12)));
//!
//! for event in coordinator.drain_events() {
//!     // update views
//! }
//! ```

pub mod coordinator;
pub mod engine;
pub mod error;
pub mod events;
pub mod generator;
pub mod listen;
pub mod queue;
pub mod reporter;
pub mod snapshot;
pub mod types;
pub mod volume;

pub use coordinator::QueueCoordinator;
pub use engine::{EngineError, EngineEvent, EngineResult, PlaybackEngine};
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use generator::{from_playlist, from_release, generate_from_tracks, shuffle_all};
pub use listen::{ListenPolicy, ListenTracker};
pub use queue::Queue;
pub use reporter::{NullReporter, PlaybackReporter};
pub use snapshot::{PlaybackSnapshot, TrackError};
pub use types::{LoadFailurePolicy, PlaybackConfig, PlaybackState, RepeatMode};
pub use volume::Volume;
