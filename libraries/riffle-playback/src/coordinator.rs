//! Queue/playback coordinator - core orchestration
//!
//! Binds the active [`Queue`] to the single [`PlaybackEngine`] and is the
//! only writer of playback session state. UI views send intents (play,
//! seek, next, reorder) in and render from [`PlaybackSnapshot`] and
//! drained [`PlaybackEvent`]s.
//!
//! ```text
//!   UI intent ──> QueueCoordinator ──> PlaybackEngine (one real resource)
//!                  │        ▲                  │
//!                  │        └── EngineEvent ───┘
//!                  ├──> PlaybackReporter (listens, playlist order)
//!                  └──> PlaybackEvent queue ──> observers
//! ```
//!
//! States: `Idle` (no queue), `Paused`, `Playing`, and the transient
//! `Seeking` sub-state during which engine play/pause side effects of a
//! seek are ignored. When the seek settles the play state is re-read from
//! the engine and restored if the engine drifted, so seeking never changes
//! whether audio is playing.

use crate::{
    engine::{EngineError, EngineEvent, PlaybackEngine},
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    listen::{ListenPolicy, ListenTracker},
    queue::{index_after_move, Queue},
    reporter::PlaybackReporter,
    snapshot::{PlaybackSnapshot, TrackError},
    types::{LoadFailurePolicy, PlaybackConfig, PlaybackState, RepeatMode},
    volume::Volume,
};
use riffle_core::{Track, TrackId};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Open seek suppression window
#[derive(Debug, Clone, Copy)]
struct SeekWindow {
    /// Play state to keep once the seek settles
    was_playing: bool,
    started_at: Instant,
}

/// Central playback coordination
///
/// One per application session. Owns the engine handle, so no other
/// component can start audio.
pub struct QueueCoordinator {
    engine: Box<dyn PlaybackEngine>,
    reporter: Box<dyn PlaybackReporter>,
    config: PlaybackConfig,

    // Session state
    queue: Option<Queue>,
    is_playing: bool,
    current_time: Duration,
    duration: Duration,
    seek: Option<SeekWindow>,
    // Playback was asked for and not paused since (used when a load fails late)
    play_requested: bool,

    listen: ListenTracker,
    volume: Volume,

    // Failures
    track_error: Option<TrackError>,
    last_error: Option<String>,
    consecutive_failures: usize,

    // Observer plumbing
    pending_events: Vec<PlaybackEvent>,
    last_state: PlaybackState,
}

impl QueueCoordinator {
    /// Create an idle coordinator around `engine`
    pub fn new(
        mut engine: Box<dyn PlaybackEngine>,
        reporter: Box<dyn PlaybackReporter>,
        config: PlaybackConfig,
    ) -> Self {
        if let Err(e) = config.validate() {
            warn!(error = %e, "Playback config out of range, clamping");
        }

        let volume = Volume::new(config.volume);
        engine.set_volume(volume.gain());

        Self {
            engine,
            reporter,
            listen: ListenTracker::new(ListenPolicy::from_config(&config)),
            config,
            queue: None,
            is_playing: false,
            current_time: Duration::ZERO,
            duration: Duration::ZERO,
            seek: None,
            play_requested: false,
            volume,
            track_error: None,
            last_error: None,
            consecutive_failures: 0,
            pending_events: Vec::new(),
            last_state: PlaybackState::Idle,
        }
    }

    // ===== Queue binding =====

    /// Replace the active queue
    ///
    /// Loads the queue's current track paused at zero. The old queue is
    /// discarded; call [`play`](Self::play) to start. An empty queue
    /// unbinds like [`clear_queue`](Self::clear_queue).
    pub fn set_current_queue(&mut self, queue: Queue) -> Result<()> {
        if queue.is_empty() {
            debug!(queue_id = %queue.id(), "Empty queue, unbinding");
            self.clear_queue();
            return Ok(());
        }

        let previous = self.current_track_id();
        info!(
            queue_id = %queue.id(),
            tracks = queue.len(),
            origin = ?queue.origin(),
            "Binding new queue"
        );

        self.queue = Some(queue);
        self.consecutive_failures = 0;
        self.play_requested = false;
        self.emit_queue_changed();

        let result = self.activate_current(false, previous);
        self.emit_state_if_changed();
        result
    }

    /// Play `queue` from `start_index`, reusing the loaded queue if it
    /// comes from the same release or playlist
    ///
    /// Re-triggering play on the source that is already loaded jumps inside
    /// the existing queue (keeping reorders and additions) instead of
    /// rebuilding it. Pressing play on the track that is already current
    /// resumes it rather than restarting it.
    pub fn play_source(&mut self, queue: Queue, start_index: usize) -> Result<()> {
        let target = queue
            .get(start_index)
            .map(|t| t.id.clone())
            .ok_or(PlaybackError::IndexOutOfBounds {
                index: start_index,
                len: queue.len(),
            })?;

        let existing = self.queue.as_ref().and_then(|active| {
            let same = match (active.origin(), queue.origin()) {
                (Some(a), Some(b)) => a.is_same_source(b),
                _ => false,
            };
            if !same {
                return None;
            }
            // Prefer the current entry when the track appears more than once
            if active.current_track().map(|t| &t.id) == Some(&target) {
                return Some(active.current_index());
            }
            active.tracks().iter().position(|t| t.id == target)
        });

        match existing {
            Some(index) if Some(index) == self.current_index() => {
                debug!(index, "Source already loaded on this track");
                if self.is_playing {
                    Ok(())
                } else {
                    self.play()
                }
            }
            Some(index) => {
                debug!(index, "Source already loaded; jumping inside it");
                self.go_to_track(index)
            }
            None => {
                self.set_current_queue(queue.starting_at(start_index)?)?;
                self.play()
            }
        }
    }

    /// Unbind the queue and return to idle
    pub fn clear_queue(&mut self) {
        self.engine.pause();
        self.seek = None;
        self.queue = None;
        self.is_playing = false;
        self.play_requested = false;
        self.current_time = Duration::ZERO;
        self.duration = Duration::ZERO;
        self.track_error = None;
        self.listen.reset();
        self.emit_state_if_changed();
    }

    // ===== Transport =====

    /// Start or resume playback
    ///
    /// Retries the load first if the current track previously failed.
    pub fn play(&mut self) -> Result<()> {
        let index = self.current_index().ok_or(PlaybackError::NoActiveQueue)?;

        let result = if self.track_error.as_ref().is_some_and(|e| e.index == index) {
            debug!(index, "Retrying failed track");
            self.consecutive_failures = 0;
            let previous = self.current_track_id();
            self.activate_current(true, previous)
        } else {
            if let Some(window) = self.seek.as_mut() {
                window.was_playing = true;
            }
            self.start_engine()
        };

        self.emit_state_if_changed();
        result
    }

    /// Pause playback (no-op when idle)
    pub fn pause(&mut self) {
        if self.queue.is_none() {
            return;
        }

        self.play_requested = false;
        if let Some(window) = self.seek.as_mut() {
            window.was_playing = false;
        }
        self.engine.pause();
        self.is_playing = self.engine.is_playing();
        self.emit_state_if_changed();
    }

    /// Pause when playing, play when paused, nothing when idle
    pub fn toggle_play_pause(&mut self) -> Result<()> {
        if self.queue.is_none() {
            return Ok(());
        }

        if self.is_playing {
            self.pause();
            Ok(())
        } else {
            self.play()
        }
    }

    /// Pause and rewind the current track, keeping the queue
    pub fn stop(&mut self) {
        if self.queue.is_none() {
            return;
        }

        self.pause();
        self.seek = None;
        if let Err(e) = self.engine.rewind() {
            warn!(error = %e, "Failed to rewind on stop");
        }
        self.current_time = Duration::ZERO;
        self.listen.reset();
        self.emit_position();
        self.emit_state_if_changed();
    }

    /// Advance to the next track under the queue's repeat mode
    ///
    /// Keeps the current play/pause state. At the end of a non-repeating
    /// queue playback stops on the last track.
    pub fn next_track(&mut self) -> Result<()> {
        let queue = self.queue.as_ref().ok_or(PlaybackError::NoActiveQueue)?;
        let next = queue.compute_next(queue.repeat_mode());
        let was_playing = self.is_playing;

        let result = match next {
            Some(index) => {
                self.consecutive_failures = 0;
                self.jump_to(index, was_playing)
            }
            None => {
                debug!("No next track");
                self.finish_queue();
                Ok(())
            }
        };

        self.emit_state_if_changed();
        result
    }

    /// Go back to the previous track under the queue's repeat mode
    ///
    /// Keeps the current play/pause state. Before the first track of a
    /// non-repeating queue playback stops on the first track.
    pub fn prev_track(&mut self) -> Result<()> {
        let queue = self.queue.as_ref().ok_or(PlaybackError::NoActiveQueue)?;
        let previous = queue.compute_previous(queue.repeat_mode());
        let was_playing = self.is_playing;

        let result = match previous {
            Some(index) => {
                self.consecutive_failures = 0;
                self.jump_to(index, was_playing)
            }
            None => {
                debug!("No previous track");
                self.stop_engine();
                Ok(())
            }
        };

        self.emit_state_if_changed();
        result
    }

    /// Jump to `index` and start playing it
    ///
    /// Jumping to the current index restarts the track and counts as a new
    /// activation for listen tracking.
    pub fn go_to_track(&mut self, index: usize) -> Result<()> {
        if self.queue.is_none() {
            return Err(PlaybackError::NoActiveQueue);
        }

        self.consecutive_failures = 0;
        let result = self.jump_to(index, true);
        self.emit_state_if_changed();
        result
    }

    /// Seek within the current track
    ///
    /// `time` is clamped to the known duration. Seeking never changes
    /// whether audio is playing: engine play/pause events caused by the
    /// seek are ignored until it settles, then the play state is re-read
    /// from the engine and restored if needed.
    pub fn seek_to_time(&mut self, time: Duration) -> Result<()> {
        if self.queue.is_none() {
            return Err(PlaybackError::NoActiveQueue);
        }

        let target = if self.duration.is_zero() {
            time
        } else {
            time.min(self.duration)
        };

        // A seek during a seek keeps the original intent
        let was_playing = self
            .seek
            .map_or(self.is_playing, |window| window.was_playing);

        if let Err(e) = self.engine.seek(target) {
            warn!(error = %e, target_ms = target.as_millis() as u64, "Seek failed");
            self.report_error(e.to_string());
            return Err(e.into());
        }

        debug!(target_ms = target.as_millis() as u64, was_playing, "Seeking");
        self.current_time = target;
        self.seek = Some(SeekWindow {
            was_playing,
            started_at: Instant::now(),
        });
        self.emit_position();

        if self.config.seek_settle().is_zero() {
            self.finish_seek();
        }

        self.emit_state_if_changed();
        Ok(())
    }

    /// Seek to a fraction (`0.0..=1.0`) of the current track
    pub fn seek_to_fraction(&mut self, fraction: f64) -> Result<()> {
        if self.duration.is_zero() {
            return Err(EngineError::SeekFailed("duration unknown".to_string()).into());
        }

        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        self.seek_to_time(self.duration.mul_f64(fraction))
    }

    /// Close an expired seek window
    ///
    /// Hosts call this from a timer so the window closes even when the
    /// engine goes quiet after a seek.
    pub fn poll(&mut self) {
        self.expire_seek_window();
        self.emit_state_if_changed();
    }

    // ===== Queue editing =====

    /// Move a track within the queue
    ///
    /// The current track keeps playing even if it is the one moved. Queues
    /// built from an owned playlist persist the new order (best effort).
    pub fn move_track(&mut self, from: usize, to: usize) -> Result<()> {
        let queue = self.queue.as_mut().ok_or(PlaybackError::NoActiveQueue)?;
        queue.move_track(from, to)?;

        if from == to {
            return Ok(());
        }

        if let Some(error) = self.track_error.as_mut() {
            error.index = index_after_move(error.index, from, to);
        }

        let persist = if queue.is_shuffled() || !queue.mirrors_origin() {
            None
        } else {
            queue
                .origin()
                .and_then(|o| o.owned_playlist())
                .map(|id| (id.clone(), queue.positions()))
        };

        debug!(from, to, "Moved track");
        self.emit_queue_changed();

        if let Some((playlist_id, order)) = persist {
            if let Err(e) = self.reporter.persist_playlist_order(&playlist_id, &order) {
                warn!(playlist_id = %playlist_id, error = %e, "Failed to persist playlist order");
            }
        }

        Ok(())
    }

    /// Remove a track that is not the current one
    pub fn remove_track(&mut self, index: usize) -> Result<Track> {
        let queue = self.queue.as_mut().ok_or(PlaybackError::NoActiveQueue)?;
        let removed = queue.remove(index)?;

        // Keep a recorded failure pointing at the right row
        if let Some(error) = self.track_error.as_mut() {
            if index < error.index {
                error.index -= 1;
            }
        }

        debug!(index, track_id = %removed.id, "Removed track");
        self.emit_queue_changed();
        Ok(removed)
    }

    /// Append a track to the active queue
    pub fn add_track_to_end(&mut self, track: Track) -> Result<()> {
        self.add_tracks_to_end(vec![track])
    }

    /// Append several tracks to the active queue
    pub fn add_tracks_to_end(&mut self, tracks: Vec<Track>) -> Result<()> {
        let queue = self.queue.as_mut().ok_or(PlaybackError::NoActiveQueue)?;
        let count = tracks.len();
        queue.extend(tracks);

        debug!(added = count, "Appended tracks");
        self.emit_queue_changed();
        Ok(())
    }

    /// Set the repeat mode of the active queue
    pub fn set_repeat_mode(&mut self, mode: RepeatMode) -> Result<()> {
        let queue = self.queue.as_mut().ok_or(PlaybackError::NoActiveQueue)?;
        if queue.repeat_mode() != mode {
            queue.set_repeat_mode(mode);
            self.emit(PlaybackEvent::RepeatModeChanged { mode });
        }
        Ok(())
    }

    /// Advance the repeat mode (off -> queue -> track -> off)
    pub fn cycle_repeat_mode(&mut self) -> Result<RepeatMode> {
        let mode = self.repeat_mode().cycle();
        self.set_repeat_mode(mode)?;
        Ok(mode)
    }

    // ===== Volume =====

    /// Set volume (0-100)
    pub fn set_volume(&mut self, level: u8) {
        self.volume.set_level(level);
        self.apply_volume();
    }

    /// Raise volume by one step
    pub fn volume_up(&mut self) {
        self.volume.step_up();
        self.apply_volume();
    }

    /// Lower volume by one step
    pub fn volume_down(&mut self) {
        self.volume.step_down();
        self.apply_volume();
    }

    /// Mute audio
    pub fn mute(&mut self) {
        self.volume.mute();
        self.apply_volume();
    }

    /// Unmute audio
    pub fn unmute(&mut self) {
        self.volume.unmute();
        self.apply_volume();
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.apply_volume();
    }

    // ===== Engine events =====

    /// Apply an engine notification
    ///
    /// Events must be delivered in the order the engine produced them.
    pub fn handle_engine_event(&mut self, event: EngineEvent) {
        if self.queue.is_none() {
            debug!(?event, "Ignoring engine event while idle");
            return;
        }

        self.expire_seek_window();

        match event {
            EngineEvent::TimeUpdate(time) => self.on_time_update(time),
            EngineEvent::DurationChange(duration) => {
                self.duration = duration;
                self.consecutive_failures = 0;
                self.emit(PlaybackEvent::DurationChanged {
                    duration_ms: duration.as_millis() as u64,
                });
            }
            EngineEvent::Playing => {
                if self.seek.is_some() {
                    debug!("Ignoring playing event during seek");
                } else {
                    self.is_playing = true;
                    self.consecutive_failures = 0;
                }
            }
            EngineEvent::Paused => {
                if self.seek.is_some() {
                    debug!("Ignoring paused event during seek");
                } else {
                    self.is_playing = false;
                }
            }
            EngineEvent::Seeked => self.finish_seek(),
            EngineEvent::Ended => self.on_ended(),
            EngineEvent::PlayRejected(reason) => {
                warn!(reason = %reason, "Engine refused playback");
                self.is_playing = false;
                self.play_requested = false;
                if let Some(window) = self.seek.as_mut() {
                    window.was_playing = false;
                }
                self.report_error(EngineError::PlaybackRefused(reason).to_string());
            }
            EngineEvent::LoadFailed(reason) => {
                let url = self
                    .current_track()
                    .map(|t| t.file_url.clone())
                    .unwrap_or_default();
                let resume = self.play_requested;
                // Already logged and recorded on the track
                let _ = self.handle_load_failure(EngineError::LoadFailed { url, reason }, resume);
            }
        }

        self.emit_state_if_changed();
    }

    // ===== Observed state =====

    /// Current state
    pub fn state(&self) -> PlaybackState {
        if self.queue.is_none() {
            PlaybackState::Idle
        } else if self.seek.is_some() {
            PlaybackState::Seeking
        } else if self.is_playing {
            PlaybackState::Playing
        } else {
            PlaybackState::Paused
        }
    }

    /// Track at the queue's current index
    pub fn current_track(&self) -> Option<&Track> {
        self.queue.as_ref().and_then(Queue::current_track)
    }

    /// Current index, if a queue is loaded
    pub fn current_index(&self) -> Option<usize> {
        self.queue.as_ref().map(Queue::current_index)
    }

    /// Active queue
    pub fn current_queue(&self) -> Option<&Queue> {
        self.queue.as_ref()
    }

    /// Whether the engine is producing audio
    ///
    /// During a seek this reports the play state that will be kept.
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Playback position of the current track
    pub fn current_time(&self) -> Duration {
        self.current_time
    }

    /// Duration of the current track (zero while unknown)
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Repeat mode of the active queue (off when idle)
    pub fn repeat_mode(&self) -> RepeatMode {
        self.queue
            .as_ref()
            .map_or(RepeatMode::Off, Queue::repeat_mode)
    }

    /// Volume level (0-100)
    pub fn volume(&self) -> u8 {
        self.volume.level()
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    /// Load failure of the current track, if any
    pub fn track_error(&self) -> Option<&TrackError> {
        self.track_error.as_ref()
    }

    /// Last recoverable error message
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Whether the current activation was already counted as a listen
    pub fn listen_tracked(&self) -> bool {
        self.listen.is_tracked()
    }

    /// Active configuration
    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// Copy of the observable session state
    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            state: self.state(),
            current_track: self.current_track().cloned(),
            current_index: self.current_index(),
            queue: self.queue.clone(),
            is_playing: self.is_playing,
            current_time: self.current_time,
            duration: self.duration,
            repeat_mode: self.repeat_mode(),
            volume: self.volume.level(),
            muted: self.volume.is_muted(),
            track_error: self.track_error.clone(),
        }
    }

    /// Drain queued events for observers
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internal: activation =====

    /// Point the queue at `index` and activate it
    fn jump_to(&mut self, index: usize, autoplay: bool) -> Result<()> {
        let previous = self.current_track_id();
        let queue = self.queue.as_mut().ok_or(PlaybackError::NoActiveQueue)?;
        queue.go_to(index)?;
        self.activate_current(autoplay, previous)
    }

    /// Load the queue's current track into the engine
    ///
    /// Every activation resets position, duration, listen tracking and any
    /// in-flight seek of the previous track.
    fn activate_current(&mut self, autoplay: bool, previous: Option<TrackId>) -> Result<()> {
        let (index, track) = self
            .queue
            .as_ref()
            .and_then(|q| q.current_track().map(|t| (q.current_index(), t.clone())))
            .ok_or(PlaybackError::NoActiveQueue)?;

        // Silence the outgoing track before the media is swapped
        if self.engine.is_playing() {
            self.engine.pause();
        }

        self.seek = None;
        self.listen.reset();
        self.current_time = Duration::ZERO;
        self.duration = track.known_duration().unwrap_or_default();
        self.track_error = None;
        self.emit(PlaybackEvent::TrackChanged {
            track_id: track.id.clone(),
            index,
            previous_track_id: previous,
        });

        info!(track_id = %track.id, index, autoplay, "Activating track");

        if let Err(e) = self.engine.load(&track.file_url) {
            self.is_playing = self.engine.is_playing();
            return self.handle_load_failure(e, autoplay);
        }

        if self.duration.is_zero() {
            self.duration = self.engine.duration().unwrap_or_default();
        }
        self.is_playing = self.engine.is_playing();
        if autoplay {
            self.start_engine()?;
        }
        Ok(())
    }

    /// Ask the engine to play; a refusal leaves the session paused
    fn start_engine(&mut self) -> Result<()> {
        self.play_requested = true;

        match self.engine.play() {
            Ok(()) => {
                self.is_playing = self.engine.is_playing();
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Engine refused playback");
                self.play_requested = false;
                self.is_playing = self.engine.is_playing();
                self.report_error(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Pause the engine and mark playback stopped
    fn stop_engine(&mut self) {
        self.seek = None;
        self.play_requested = false;
        self.engine.pause();
        self.is_playing = self.engine.is_playing();
    }

    /// End of a non-repeating queue: stay on the last track, stopped
    fn finish_queue(&mut self) {
        self.stop_engine();
        self.emit(PlaybackEvent::QueueEnded);
    }

    /// Record a load failure and apply the configured policy
    fn handle_load_failure(&mut self, error: EngineError, resume: bool) -> Result<()> {
        let Some(queue) = self.queue.as_ref() else {
            return Err(PlaybackError::NoActiveQueue);
        };
        let Some(track) = queue.current_track() else {
            return Err(PlaybackError::NoActiveQueue);
        };

        let index = queue.current_index();
        let track_id = track.id.clone();
        let len = queue.len();
        // Skipping past a failed track never replays it
        let repeat = match queue.repeat_mode() {
            RepeatMode::Track => RepeatMode::Off,
            mode => mode,
        };
        let next = queue.compute_next(repeat);
        let message = error.to_string();

        warn!(track_id = %track_id, index, error = %message, "Track failed to load");

        self.stop_engine();
        self.track_error = Some(TrackError {
            index,
            track_id: track_id.clone(),
            message: message.clone(),
        });
        self.emit(PlaybackEvent::TrackFailed {
            track_id: track_id.clone(),
            index,
            message,
        });
        self.consecutive_failures += 1;

        if self.config.load_failure == LoadFailurePolicy::Stall {
            return Err(error.into());
        }

        if self.consecutive_failures >= len {
            warn!(failures = self.consecutive_failures, "Every track in the queue failed to load");
            self.report_error("Every track in the queue failed to load".to_string());
            return Err(error.into());
        }

        match next {
            Some(next) => {
                debug!(from = index, to = next, "Skipping failed track");
                self.jump_to(next, resume)
            }
            None => {
                self.emit(PlaybackEvent::QueueEnded);
                Err(error.into())
            }
        }
    }

    // ===== Internal: engine events =====

    fn on_time_update(&mut self, time: Duration) {
        self.current_time = time;
        self.emit_position();

        if self.state() == PlaybackState::Playing {
            self.check_listen();
        }
    }

    fn on_ended(&mut self) {
        let Some(queue) = self.queue.as_ref() else {
            return;
        };
        let repeat = queue.repeat_mode();
        let next = queue.compute_next(repeat);

        self.seek = None;
        self.consecutive_failures = 0;

        if repeat == RepeatMode::Track {
            self.replay_current();
            return;
        }

        match next {
            Some(index) => {
                // Failures are recorded on the track and already logged
                let _ = self.jump_to(index, true);
            }
            None => {
                debug!("Reached end of queue");
                self.finish_queue();
            }
        }
    }

    /// Restart the current track in place (repeat-track)
    fn replay_current(&mut self) {
        let Some(track_id) = self.current_track_id() else {
            return;
        };
        let index = self.current_index().unwrap_or_default();

        debug!(track_id = %track_id, "Replaying track");
        self.listen.reset();
        self.current_time = Duration::ZERO;
        self.emit(PlaybackEvent::TrackChanged {
            track_id: track_id.clone(),
            index,
            previous_track_id: Some(track_id),
        });
        self.emit_position();

        if let Err(e) = self.engine.rewind() {
            warn!(error = %e, "Failed to rewind for repeat");
            self.report_error(e.to_string());
            return;
        }
        // Refusal is logged and leaves the session paused
        let _ = self.start_engine();
    }

    fn check_listen(&mut self) {
        if !self.listen.update(self.current_time, self.duration) {
            return;
        }
        let Some(track) = self.current_track().cloned() else {
            return;
        };

        info!(track_id = %track.id, position_ms = self.current_time.as_millis() as u64, "Listen threshold reached");
        if let Err(e) = self.reporter.record_listen(&track) {
            warn!(track_id = %track.id, error = %e, "Failed to record listen");
        }
        self.emit(PlaybackEvent::ListenRecorded { track_id: track.id });
    }

    // ===== Internal: seeking =====

    fn expire_seek_window(&mut self) {
        if let Some(window) = self.seek {
            if window.started_at.elapsed() >= self.config.seek_settle() {
                debug!("Seek window expired");
                self.finish_seek();
            }
        }
    }

    /// Close the seek window and re-synchronize with the engine
    fn finish_seek(&mut self) {
        let Some(window) = self.seek.take() else {
            return;
        };

        let actual = self.engine.is_playing();
        if actual != window.was_playing {
            debug!(
                expected = window.was_playing,
                actual, "Engine play state drifted during seek; restoring"
            );
            if window.was_playing {
                if let Err(e) = self.engine.play() {
                    warn!(error = %e, "Engine refused to resume after seek");
                    self.report_error(e.to_string());
                }
            } else {
                self.engine.pause();
            }
        }

        self.is_playing = self.engine.is_playing();
        self.current_time = self.engine.current_time();
    }

    // ===== Internal: helpers =====

    fn current_track_id(&self) -> Option<TrackId> {
        self.current_track().map(|t| t.id.clone())
    }

    fn apply_volume(&mut self) {
        self.engine.set_volume(self.volume.gain());
        self.emit(PlaybackEvent::VolumeChanged {
            level: self.volume.level(),
            is_muted: self.volume.is_muted(),
        });
    }

    fn report_error(&mut self, message: String) {
        self.last_error = Some(message.clone());
        self.emit(PlaybackEvent::Error { message });
    }

    fn emit(&mut self, event: PlaybackEvent) {
        self.pending_events.push(event);
    }

    fn emit_position(&mut self) {
        self.emit(PlaybackEvent::PositionUpdate {
            position_ms: self.current_time.as_millis() as u64,
            duration_ms: self.duration.as_millis() as u64,
        });
    }

    fn emit_queue_changed(&mut self) {
        if let Some(queue) = self.queue.as_ref() {
            let event = PlaybackEvent::QueueChanged {
                queue_id: queue.id(),
                length: queue.len(),
                current_index: queue.current_index(),
            };
            self.emit(event);
        }
    }

    fn emit_state_if_changed(&mut self) {
        let state = self.state();
        if state != self.last_state {
            self.last_state = state;
            self.emit(PlaybackEvent::StateChanged { state });
        }
    }
}
