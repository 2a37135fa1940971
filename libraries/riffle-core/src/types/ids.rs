//! ID types for Riffle entities
use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Declares an opaque string identifier with the usual accessors.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing identifier
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the inner string
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(CoreError::InvalidId {
                        kind: $kind,
                        value: s.to_string(),
                    });
                }
                Ok(Self(trimmed.to_string()))
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

string_id!(
    /// Track identifier (opaque, assigned by the backend)
    TrackId,
    "track"
);

string_id!(
    /// Release (album/EP/single) identifier
    ReleaseId,
    "release"
);

string_id!(
    /// Playlist identifier
    PlaylistId,
    "playlist"
);

/// Identifier of one generated queue instance
///
/// Every queue built by the generator gets a fresh id, so two queues
/// built from the same release are still distinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueueId(Uuid);

impl QueueId {
    /// Generate a new random queue ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the inner UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for QueueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_whitespace() {
        let id: TrackId = "  abc ".parse().unwrap();
        assert_eq!(id.as_str(), "abc");
    }

    #[test]
    fn parse_rejects_empty() {
        let err = "   ".parse::<PlaylistId>().unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidId {
                kind: "playlist",
                value: "   ".to_string()
            }
        );
    }

    #[test]
    fn ids_serialize_transparently() {
        let id = ReleaseId::new("rel-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"rel-1\"");
    }

    #[test]
    fn generated_queue_ids_differ() {
        assert_ne!(QueueId::generate(), QueueId::generate());
    }
}
