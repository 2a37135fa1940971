//! Fire-and-forget delivery of playback reports.
//!
//! The coordinator runs synchronously on the UI side and must never wait
//! for the network. [`BackgroundReporter`] hands each request to a tokio
//! worker task over a channel; the worker performs the HTTP call and logs
//! failures. Nothing is retried and nothing flows back to playback state.

use crate::client::RiffleClient;
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use riffle_core::{PlaylistId, PlaylistPosition, Track, TrackId};
use riffle_playback::{PlaybackError, PlaybackReporter};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Destination of playback reports
#[async_trait]
pub trait ReportSink: Send + Sync + 'static {
    /// Record one listen
    async fn record_listen(&self, track_id: &TrackId, listened_at: DateTime<Utc>) -> Result<()>;

    /// Persist a playlist order
    async fn update_playlist_order(
        &self,
        playlist_id: &PlaylistId,
        order: &[PlaylistPosition],
    ) -> Result<()>;
}

#[async_trait]
impl ReportSink for RiffleClient {
    async fn record_listen(&self, track_id: &TrackId, listened_at: DateTime<Utc>) -> Result<()> {
        RiffleClient::record_listen(self, track_id, listened_at).await
    }

    async fn update_playlist_order(
        &self,
        playlist_id: &PlaylistId,
        order: &[PlaylistPosition],
    ) -> Result<()> {
        RiffleClient::update_playlist_order(self, playlist_id, order).await
    }
}

/// Queued report
#[derive(Debug, Clone, PartialEq)]
enum ReportRequest {
    Listen {
        track_id: TrackId,
        listened_at: DateTime<Utc>,
    },
    PlaylistOrder {
        playlist_id: PlaylistId,
        order: Vec<PlaylistPosition>,
    },
}

/// [`PlaybackReporter`] that delivers reports from a background task
///
/// Dropping every clone closes the channel; the worker drains what is
/// queued and exits, so awaiting the returned handle flushes pending
/// reports.
#[derive(Debug, Clone)]
pub struct BackgroundReporter {
    tx: mpsc::UnboundedSender<ReportRequest>,
}

impl BackgroundReporter {
    /// Start the worker on the current tokio runtime.
    ///
    /// Must be called from within a runtime.
    pub fn spawn<S: ReportSink>(sink: S) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(run_worker(sink, rx));
        (Self { tx }, handle)
    }

    fn enqueue(&self, request: ReportRequest) -> riffle_playback::Result<()> {
        self.tx
            .send(request)
            .map_err(|_| PlaybackError::Report("report worker has stopped".to_string()))
    }
}

impl PlaybackReporter for BackgroundReporter {
    fn record_listen(&self, track: &Track) -> riffle_playback::Result<()> {
        self.enqueue(ReportRequest::Listen {
            track_id: track.id.clone(),
            listened_at: Utc::now(),
        })
    }

    fn persist_playlist_order(
        &self,
        playlist_id: &PlaylistId,
        order: &[PlaylistPosition],
    ) -> riffle_playback::Result<()> {
        self.enqueue(ReportRequest::PlaylistOrder {
            playlist_id: playlist_id.clone(),
            order: order.to_vec(),
        })
    }
}

async fn run_worker<S: ReportSink>(sink: S, mut rx: mpsc::UnboundedReceiver<ReportRequest>) {
    debug!("Report worker started");

    while let Some(request) = rx.recv().await {
        match request {
            ReportRequest::Listen {
                track_id,
                listened_at,
            } => {
                if let Err(e) = sink.record_listen(&track_id, listened_at).await {
                    warn!(track_id = %track_id, error = %e, "Failed to record listen");
                }
            }
            ReportRequest::PlaylistOrder { playlist_id, order } => {
                if let Err(e) = sink.update_playlist_order(&playlist_id, &order).await {
                    warn!(playlist_id = %playlist_id, error = %e, "Failed to persist playlist order");
                }
            }
        }
    }

    debug!("Report worker stopped");
}
