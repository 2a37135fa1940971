//! Main Riffle server client.

use crate::error::{Result, ServerClientError};
use crate::types::{
    AddTrackRequest, ListenRequest, PlaylistOrderRequest, ServerConfig, TrackListResponse,
};
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, Response};
use riffle_core::{PlaylistId, PlaylistPosition, ReleaseId, Track, TrackId};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use url::Url;

/// Client for the Riffle server API.
///
/// Fetches the track lists queues are built from and carries the outbound
/// playback calls (listens, playlist order, playlist membership).
///
/// # Example
///
/// ```ignore
/// use riffle_server_client::{RiffleClient, ServerConfig};
///
/// let client = RiffleClient::new(ServerConfig::with_token("https://music.example.com", token))?;
/// let tracks = client.get_release_tracks(&release_id).await?;
/// ```
#[derive(Clone)]
pub struct RiffleClient {
    http: Client,
    base_url: Url,
    access_token: Arc<RwLock<Option<String>>>,
}

impl RiffleClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ServerConfig) -> Result<Self> {
        let base_url = parse_base_url(&config.url)?;

        // Create HTTP client with reasonable defaults
        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Riffle/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            access_token: Arc::new(RwLock::new(config.access_token)),
        })
    }

    /// Get the server URL (without trailing slash).
    pub fn url(&self) -> String {
        self.base_url.as_str().trim_end_matches('/').to_string()
    }

    /// Check if the client has an access token.
    pub async fn is_authenticated(&self) -> bool {
        self.access_token.read().await.is_some()
    }

    /// Replace the access token (e.g., after the host refreshed it).
    pub async fn set_access_token(&self, token: Option<String>) {
        *self.access_token.write().await = token;
    }

    // ===== Track lists =====

    /// Every track in the catalog (input for shuffle-all).
    pub async fn get_all_tracks(&self) -> Result<Vec<Track>> {
        self.fetch_tracks(&["api", "tracks"], "catalog").await
    }

    /// Tracks of a release, in track-number order.
    pub async fn get_release_tracks(&self, release_id: &ReleaseId) -> Result<Vec<Track>> {
        self.fetch_tracks(
            &["api", "releases", release_id.as_str(), "tracks"],
            "release",
        )
        .await
    }

    /// Tracks of a playlist, in playlist order.
    pub async fn get_playlist_tracks(&self, playlist_id: &PlaylistId) -> Result<Vec<Track>> {
        self.fetch_tracks(
            &["api", "playlists", playlist_id.as_str(), "tracks"],
            "playlist",
        )
        .await
    }

    // ===== Outbound playback calls =====

    /// Record one listen of a track.
    pub async fn record_listen(
        &self,
        track_id: &TrackId,
        listened_at: DateTime<Utc>,
    ) -> Result<()> {
        let url = self.endpoint(&["api", "tracks", track_id.as_str(), "listens"])?;
        debug!(url = %url, track_id = %track_id, "Recording listen");

        let request = self.http.post(url).json(&ListenRequest { listened_at });
        self.send(request).await?;

        debug!(track_id = %track_id, "Listen recorded");
        Ok(())
    }

    /// Store a new order for a playlist.
    pub async fn update_playlist_order(
        &self,
        playlist_id: &PlaylistId,
        order: &[PlaylistPosition],
    ) -> Result<()> {
        let url = self.endpoint(&["api", "playlists", playlist_id.as_str(), "order"])?;
        debug!(url = %url, playlist_id = %playlist_id, tracks = order.len(), "Updating playlist order");

        let body = PlaylistOrderRequest {
            tracks: order.to_vec(),
        };
        self.send(self.http.put(url).json(&body)).await?;

        info!(playlist_id = %playlist_id, tracks = order.len(), "Playlist order saved");
        Ok(())
    }

    /// Append a track to a playlist.
    pub async fn add_track_to_playlist(
        &self,
        playlist_id: &PlaylistId,
        track_id: &TrackId,
    ) -> Result<()> {
        let url = self.endpoint(&["api", "playlists", playlist_id.as_str(), "tracks"])?;
        debug!(url = %url, playlist_id = %playlist_id, track_id = %track_id, "Adding track to playlist");

        let body = AddTrackRequest {
            track_id: track_id.clone(),
        };
        self.send(self.http.post(url).json(&body)).await?;
        Ok(())
    }

    /// Remove a track from a playlist.
    pub async fn remove_track_from_playlist(
        &self,
        playlist_id: &PlaylistId,
        track_id: &TrackId,
    ) -> Result<()> {
        let url = self.endpoint(&[
            "api",
            "playlists",
            playlist_id.as_str(),
            "tracks",
            track_id.as_str(),
        ])?;
        debug!(url = %url, playlist_id = %playlist_id, track_id = %track_id, "Removing track from playlist");

        self.send(self.http.delete(url)).await?;
        Ok(())
    }

    // ===== Internal =====

    /// Build an endpoint URL; segments are percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ServerClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn fetch_tracks(&self, segments: &[&str], kind: &str) -> Result<Vec<Track>> {
        let url = self.endpoint(segments)?;
        debug!(url = %url, kind, "Fetching tracks");

        let response = self.send(self.http.get(url)).await?;
        let body: TrackListResponse = response.json().await.map_err(|e| {
            ServerClientError::ParseError(format!("Failed to parse {} tracks: {}", kind, e))
        })?;

        let total = body.tracks.len();
        let tracks: Vec<Track> = body
            .tracks
            .into_iter()
            .filter(|track| match track.validate() {
                Ok(()) => true,
                Err(e) => {
                    warn!(track_id = %track.id, error = %e, "Skipping unplayable track");
                    false
                }
            })
            .collect();

        debug!(kind, tracks = tracks.len(), skipped = total - tracks.len(), "Fetched tracks");
        Ok(tracks)
    }

    /// Attach auth, send, and map non-success statuses to errors.
    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let request = match self.access_token.read().await.as_deref() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                ServerClientError::ServerUnreachable(e.to_string())
            } else {
                ServerClientError::Request(e)
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().to_string();
        let error_text = response.text().await.unwrap_or_default();
        match status.as_u16() {
            401 => Err(ServerClientError::AuthRequired),
            404 => Err(ServerClientError::NotFound(url)),
            code => Err(ServerClientError::ServerError {
                status: code,
                message: error_text,
            }),
        }
    }
}

/// Validate and normalize a base URL.
///
/// Only http(s) is accepted. A trailing slash is added so endpoint paths
/// append below any path prefix (`https://host/riffle/`).
fn parse_base_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ServerClientError::InvalidUrl("URL cannot be empty".into()));
    }

    let url = Url::parse(trimmed).map_err(|e| ServerClientError::InvalidUrl(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ServerClientError::InvalidUrl(
            "URL must start with http:// or https://".into(),
        ));
    }
    if url.cannot_be_a_base() {
        return Err(ServerClientError::InvalidUrl(trimmed.to_string()));
    }

    let mut url = url;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
