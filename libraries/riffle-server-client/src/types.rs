//! Types for Riffle server API requests and responses.

use chrono::{DateTime, Utc};
use riffle_core::{PlaylistPosition, Track, TrackId};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for connecting to a Riffle server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Base URL of the server (e.g., "https://music.example.com")
    pub url: String,
    /// Bearer token sent with every request (if any)
    pub access_token: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl ServerConfig {
    /// Create a new server config with just the URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            access_token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create a config with an existing token.
    pub fn with_token(url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            access_token: Some(access_token.into()),
            ..Self::new(url)
        }
    }

    /// Override the request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// =============================================================================
// Responses
// =============================================================================

/// Track list returned by the catalog, release and playlist endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackListResponse {
    pub tracks: Vec<Track>,
}

// =============================================================================
// Requests
// =============================================================================

/// Body of `POST /api/tracks/{id}/listens`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListenRequest {
    pub listened_at: DateTime<Utc>,
}

/// Body of `PUT /api/playlists/{id}/order`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistOrderRequest {
    pub tracks: Vec<PlaylistPosition>,
}

/// Body of `POST /api/playlists/{id}/tracks`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTrackRequest {
    pub track_id: TrackId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn listen_request_uses_camel_case() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let json = serde_json::to_value(ListenRequest { listened_at: at }).unwrap();
        assert_eq!(json["listenedAt"], "2024-03-01T12:00:00Z");
    }

    #[test]
    fn order_request_shape() {
        let body = PlaylistOrderRequest {
            tracks: vec![PlaylistPosition::new(TrackId::new("t1"), 0)],
        };
        let json = serde_json::to_value(body).unwrap();
        assert_eq!(json["tracks"][0]["trackId"], "t1");
        assert_eq!(json["tracks"][0]["position"], 0);
    }

    #[test]
    fn config_with_token_keeps_default_timeout() {
        let config = ServerConfig::with_token("https://example.com", "abc");
        assert_eq!(config.access_token.as_deref(), Some("abc"));
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }
}
