//! Riffle Server Client
//!
//! HTTP collaborators for the playback core.
//!
//! # Features
//!
//! - **Track lists**: catalog, release and playlist tracks to build queues from
//! - **Playback reports**: listens and playlist order, sent in the background
//! - **Playlist edits**: add and remove playlist tracks
//! - **Settings**: layered TOML + environment configuration
//!
//! # Example
//!
//! ```ignore
//! use riffle_playback::{generator, PlaybackConfig, QueueCoordinator};
//! use riffle_server_client::{BackgroundReporter, ClientSettings, RiffleClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = ClientSettings::load(Some("riffle.toml".as_ref()))?;
//!     let client = RiffleClient::new(settings.server_config())?;
//!
//!     let tracks = client.get_release_tracks(&release_id).await?;
//!     let (reporter, _worker) = BackgroundReporter::spawn(client.clone());
//!
//!     let mut coordinator =
//!         QueueCoordinator::new(Box::new(engine), Box::new(reporter), settings.playback);
//!     coordinator.set_current_queue(generator::from_release(release_id, "Night Drive", tracks))?;
//!     coordinator.play()?;
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod reporter;
mod settings;
mod types;

// Re-export main types
pub use client::RiffleClient;
pub use error::{Result, ServerClientError};
pub use reporter::{BackgroundReporter, ReportSink};
pub use settings::{ClientSettings, ServerSettings, ENV_PREFIX};
pub use types::{
    AddTrackRequest, ListenRequest, PlaylistOrderRequest, ServerConfig, TrackListResponse,
    DEFAULT_TIMEOUT,
};
