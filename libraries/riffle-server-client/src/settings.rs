//! Layered client settings
//!
//! Sources, lowest priority first: built-in defaults, an optional TOML
//! file, then `RIFFLE_`-prefixed environment variables using `__` between
//! nesting levels (`RIFFLE_SERVER__URL`, `RIFFLE_PLAYBACK__VOLUME`).

use crate::error::{Result, ServerClientError};
use crate::types::ServerConfig;
use riffle_playback::PlaybackConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "RIFFLE";

/// Everything a Riffle host needs to start a session
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ClientSettings {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub playback: PlaybackConfig,
}

/// `[server]` section
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_url")]
    pub url: String,

    #[serde(default)]
    pub access_token: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            url: default_url(),
            access_token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ClientSettings {
    /// Load from an optional file and `RIFFLE_*` environment variables
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_prefix(path, ENV_PREFIX)
    }

    /// Load with a custom environment prefix
    pub fn load_with_prefix(path: Option<&Path>, env_prefix: &str) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            if !path.exists() {
                return Err(ServerClientError::Config(format!(
                    "settings file not found: {}",
                    path.display()
                )));
            }
            debug!(path = %path.display(), "Loading settings file");
            builder = builder.add_source(config::File::from(path));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(env_prefix)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings: Self = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        let url = self.server.url.trim();
        if url.is_empty() {
            return Err(ServerClientError::Config("server.url is required".into()));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ServerClientError::Config(format!(
                "server.url must start with http:// or https://, got {url}"
            )));
        }
        if self.server.timeout_secs == 0 {
            return Err(ServerClientError::Config(
                "server.timeout_secs must be positive".into(),
            ));
        }

        self.playback
            .validate()
            .map_err(|e| ServerClientError::Config(e.to_string()))
    }

    /// Connection settings for [`RiffleClient`](crate::RiffleClient)
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            url: self.server.url.clone(),
            access_token: self.server.access_token.clone(),
            timeout: Duration::from_secs(self.server.timeout_secs),
        }
    }
}

fn default_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}
