//! Domain types for Riffle

pub mod ids;
pub mod origin;
pub mod playlist;
pub mod serde_secs;
pub mod track;

pub use ids::{PlaylistId, QueueId, ReleaseId, TrackId};
pub use origin::QueueOrigin;
pub use playlist::PlaylistPosition;
pub use track::Track;
