//! Shared fixtures for coordinator tests
#![allow(dead_code)]

use riffle_core::{ReleaseId, Track};
use riffle_playback::{
    generator, EngineError, EngineResult, NullReporter, PlaybackConfig, PlaybackEngine, Queue,
    QueueCoordinator,
};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, Once};
use std::time::Duration;

static INIT: Once = Once::new();

/// Initialize test logging once per test binary
pub fn init_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

/// Call recorded by [`ScriptedEngine`]
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    Load(String),
    Play,
    Pause,
    Seek(Duration),
    SetVolume(f32),
}

/// Inspectable state behind a [`ScriptedEngine`]
#[derive(Debug, Default)]
pub struct EngineState {
    pub calls: Vec<EngineCall>,
    pub loaded: Option<String>,
    pub playing: bool,
    pub position: Duration,
    pub gain: f32,
    /// Load calls for these URLs fail
    pub failing_urls: HashSet<String>,
    /// `play()` is refused while set
    pub refuse_play: bool,
    /// A seek flips the play state (like media elements that pause or
    /// resume as a side effect of seeking)
    pub seek_toggles_playback: bool,
    /// A `load` happened while audio was still playing
    pub loaded_while_playing: bool,
}

/// Engine double driven by test code
///
/// Cloning shares the state, so the test keeps a handle while the
/// coordinator owns the boxed engine.
#[derive(Debug, Clone, Default)]
pub struct ScriptedEngine {
    state: Arc<Mutex<EngineState>>,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock().unwrap()
    }

    pub fn fail_url(&self, url: &str) {
        self.state().failing_urls.insert(url.to_string());
    }

    pub fn heal_url(&self, url: &str) {
        self.state().failing_urls.remove(url);
    }

    pub fn set_refuse_play(&self, refuse: bool) {
        self.state().refuse_play = refuse;
    }

    pub fn set_seek_toggles_playback(&self, toggles: bool) {
        self.state().seek_toggles_playback = toggles;
    }

    /// Force the real play state without going through the coordinator
    pub fn force_playing(&self, playing: bool) {
        self.state().playing = playing;
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.state().calls.clone()
    }

    pub fn loaded(&self) -> Option<String> {
        self.state().loaded.clone()
    }

    pub fn is_playing(&self) -> bool {
        self.state().playing
    }

    pub fn clear_calls(&self) {
        self.state().calls.clear();
    }
}

impl PlaybackEngine for ScriptedEngine {
    fn load(&mut self, url: &str) -> EngineResult<()> {
        let mut state = self.state();
        state.calls.push(EngineCall::Load(url.to_string()));
        if state.playing {
            state.loaded_while_playing = true;
        }
        if state.failing_urls.contains(url) {
            state.loaded = None;
            return Err(EngineError::LoadFailed {
                url: url.to_string(),
                reason: "404 Not Found".to_string(),
            });
        }
        state.loaded = Some(url.to_string());
        state.position = Duration::ZERO;
        Ok(())
    }

    fn play(&mut self) -> EngineResult<()> {
        let mut state = self.state();
        state.calls.push(EngineCall::Play);
        if state.refuse_play {
            return Err(EngineError::PlaybackRefused(
                "user gesture required".to_string(),
            ));
        }
        state.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        let mut state = self.state();
        state.calls.push(EngineCall::Pause);
        state.playing = false;
    }

    fn seek(&mut self, position: Duration) -> EngineResult<()> {
        let mut state = self.state();
        state.calls.push(EngineCall::Seek(position));
        state.position = position;
        if state.seek_toggles_playback {
            state.playing = !state.playing;
        }
        Ok(())
    }

    fn set_volume(&mut self, gain: f32) {
        let mut state = self.state();
        state.calls.push(EngineCall::SetVolume(gain));
        state.gain = gain;
    }

    fn current_time(&self) -> Duration {
        self.state().position
    }

    fn duration(&self) -> Option<Duration> {
        None
    }

    fn is_playing(&self) -> bool {
        self.state().playing
    }
}

pub fn track(id: &str, secs: u64) -> Track {
    Track::new(id, format!("Track {id}"), format!("https://media.test/{id}.mp3"))
        .with_artist("Test Artist")
        .with_duration(Duration::from_secs(secs))
}

pub fn url(id: &str) -> String {
    format!("https://media.test/{id}.mp3")
}

pub fn tracks(ids: &[&str]) -> Vec<Track> {
    ids.iter().map(|id| track(id, 180)).collect()
}

pub fn release_queue(ids: &[&str]) -> Queue {
    generator::from_release(ReleaseId::new("rel-1"), "Test Release", tracks(ids))
}

/// Config with seek settling disabled, so seeks finish synchronously
pub fn instant_seek_config() -> PlaybackConfig {
    PlaybackConfig {
        seek_settle_ms: 0,
        ..PlaybackConfig::default()
    }
}

pub fn coordinator_with(config: PlaybackConfig) -> (QueueCoordinator, ScriptedEngine) {
    init_logging();
    let engine = ScriptedEngine::new();
    let coordinator =
        QueueCoordinator::new(Box::new(engine.clone()), Box::new(NullReporter), config);
    (coordinator, engine)
}

pub fn coordinator() -> (QueueCoordinator, ScriptedEngine) {
    coordinator_with(PlaybackConfig::default())
}

/// Coordinator with `ids` loaded as a release queue
pub fn loaded(ids: &[&str]) -> (QueueCoordinator, ScriptedEngine) {
    let (mut coordinator, engine) = coordinator();
    coordinator.set_current_queue(release_queue(ids)).unwrap();
    (coordinator, engine)
}

pub fn current_id(coordinator: &QueueCoordinator) -> String {
    coordinator
        .current_track()
        .map(|t| t.id.to_string())
        .unwrap_or_default()
}
