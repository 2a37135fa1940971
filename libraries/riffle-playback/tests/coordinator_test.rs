//! Coordinator integration tests
//!
//! Drives the coordinator against a scripted engine the way a UI would:
//! intents in, engine events fed back, observed state and events checked.

mod common;

use common::{
    coordinator, coordinator_with, current_id, instant_seek_config, loaded, release_queue, track,
    tracks, url, EngineCall,
};
use riffle_core::{PlaylistId, ReleaseId};
use riffle_playback::{
    generator, EngineError, EngineEvent, LoadFailurePolicy, PlaybackConfig, PlaybackError,
    PlaybackEvent, PlaybackState, RepeatMode,
};
use std::time::Duration;

fn secs(s: u64) -> Duration {
    Duration::from_secs(s)
}

// ===== Binding a queue =====

#[test]
fn test_new_coordinator_is_idle() {
    let (coordinator, _engine) = coordinator();

    assert_eq!(coordinator.state(), PlaybackState::Idle);
    assert!(coordinator.current_track().is_none());
    assert!(coordinator.current_queue().is_none());
    assert!(!coordinator.is_playing());
}

#[test]
fn test_set_current_queue_loads_without_playing() {
    let (mut coordinator, engine) = coordinator();

    coordinator
        .set_current_queue(release_queue(&["a", "b", "c"]))
        .unwrap();

    assert_eq!(coordinator.state(), PlaybackState::Paused);
    assert_eq!(engine.loaded(), Some(url("a")));
    assert!(!engine.is_playing());
    assert_eq!(coordinator.current_time(), Duration::ZERO);
    assert_eq!(coordinator.duration(), secs(180));
    assert!(!coordinator.listen_tracked());
}

#[test]
fn test_set_current_queue_with_empty_queue_is_idle() {
    let (mut coordinator, engine) = coordinator();

    coordinator
        .set_current_queue(generator::generate_from_tracks(vec![], "none"))
        .unwrap();

    assert_eq!(coordinator.state(), PlaybackState::Idle);
    assert!(engine.loaded().is_none());
}

#[test]
fn test_empty_queue_replaces_playing_queue() {
    let (mut coordinator, engine) = loaded(&["a", "b"]);
    coordinator.play().unwrap();

    coordinator
        .set_current_queue(generator::generate_from_tracks(vec![], "none"))
        .unwrap();

    assert_eq!(coordinator.state(), PlaybackState::Idle);
    assert!(coordinator.current_queue().is_none());
    assert!(!coordinator.is_playing());
    assert!(!engine.is_playing());
    assert_eq!(coordinator.play(), Err(PlaybackError::NoActiveQueue));
}

#[test]
fn test_replacing_queue_pauses_previous_audio_before_loading() {
    let (mut coordinator, engine) = loaded(&["a", "b"]);
    coordinator.play().unwrap();
    engine.clear_calls();

    coordinator
        .set_current_queue(release_queue(&["x", "y"]))
        .unwrap();

    let calls = engine.calls();
    assert_eq!(calls[0], EngineCall::Pause);
    assert_eq!(calls[1], EngineCall::Load(url("x")));
    assert!(!engine.state().loaded_while_playing);
    assert_eq!(coordinator.state(), PlaybackState::Paused);
}

#[test]
fn test_controls_without_queue() {
    let (mut coordinator, _engine) = coordinator();

    assert_eq!(coordinator.play(), Err(PlaybackError::NoActiveQueue));
    assert_eq!(coordinator.next_track(), Err(PlaybackError::NoActiveQueue));
    assert_eq!(coordinator.prev_track(), Err(PlaybackError::NoActiveQueue));
    assert_eq!(coordinator.go_to_track(0), Err(PlaybackError::NoActiveQueue));
    assert_eq!(
        coordinator.seek_to_time(secs(5)),
        Err(PlaybackError::NoActiveQueue)
    );
    assert_eq!(
        coordinator.add_track_to_end(track("z", 60)),
        Err(PlaybackError::NoActiveQueue)
    );

    // Toggle is a no-op while idle
    assert_eq!(coordinator.toggle_play_pause(), Ok(()));
    assert_eq!(coordinator.state(), PlaybackState::Idle);
}

// ===== Transport =====

#[test]
fn test_toggle_play_pause() {
    let (mut coordinator, engine) = loaded(&["a", "b"]);

    coordinator.toggle_play_pause().unwrap();
    assert_eq!(coordinator.state(), PlaybackState::Playing);
    assert!(engine.is_playing());

    coordinator.toggle_play_pause().unwrap();
    assert_eq!(coordinator.state(), PlaybackState::Paused);
    assert!(!engine.is_playing());
}

#[test]
fn test_stop_rewinds_and_keeps_queue() {
    let (mut coordinator, engine) = loaded(&["a", "b"]);
    coordinator.play().unwrap();
    coordinator.handle_engine_event(EngineEvent::TimeUpdate(secs(12)));

    coordinator.stop();

    assert_eq!(coordinator.state(), PlaybackState::Paused);
    assert_eq!(coordinator.current_time(), Duration::ZERO);
    assert_eq!(engine.state().position, Duration::ZERO);
    assert_eq!(coordinator.current_index(), Some(0));
}

#[test]
fn test_clear_queue_returns_to_idle() {
    let (mut coordinator, engine) = loaded(&["a", "b"]);
    coordinator.play().unwrap();

    coordinator.clear_queue();

    assert_eq!(coordinator.state(), PlaybackState::Idle);
    assert!(!engine.is_playing());
    // Late engine events are ignored
    coordinator.handle_engine_event(EngineEvent::Playing);
    assert!(!coordinator.is_playing());
}

#[test]
fn test_play_refused_stays_paused() {
    let (mut coordinator, engine) = loaded(&["a", "b"]);
    engine.set_refuse_play(true);
    coordinator.drain_events();

    let result = coordinator.play();

    assert!(matches!(
        result,
        Err(PlaybackError::Engine(EngineError::PlaybackRefused(_)))
    ));
    assert_eq!(coordinator.state(), PlaybackState::Paused);
    assert!(coordinator.last_error().is_some());
    assert!(coordinator
        .drain_events()
        .iter()
        .any(|e| matches!(e, PlaybackEvent::Error { .. })));

    // A later user gesture succeeds
    engine.set_refuse_play(false);
    coordinator.play().unwrap();
    assert_eq!(coordinator.state(), PlaybackState::Playing);
    assert!(coordinator.last_error().is_none());
}

#[test]
fn test_deferred_play_rejection_returns_to_paused() {
    let (mut coordinator, engine) = loaded(&["a"]);
    coordinator.play().unwrap();

    // The platform rejects the deferred play after the fact
    engine.force_playing(false);
    coordinator.handle_engine_event(EngineEvent::PlayRejected("NotAllowedError".into()));

    assert_eq!(coordinator.state(), PlaybackState::Paused);
    assert!(coordinator
        .last_error()
        .is_some_and(|e| e.contains("NotAllowedError")));
}

#[test]
fn test_engine_pause_event_updates_state() {
    let (mut coordinator, engine) = loaded(&["a"]);
    coordinator.play().unwrap();

    // e.g. headphones unplugged
    engine.force_playing(false);
    coordinator.handle_engine_event(EngineEvent::Paused);

    assert_eq!(coordinator.state(), PlaybackState::Paused);
    assert!(coordinator
        .drain_events()
        .contains(&PlaybackEvent::StateChanged {
            state: PlaybackState::Paused
        }));
}

// ===== Navigation =====

#[test]
fn test_next_to_end_of_queue_stops_on_last_track() {
    let (mut coordinator, engine) = loaded(&["a", "b", "c"]);
    coordinator.play().unwrap();

    coordinator.next_track().unwrap();
    coordinator.next_track().unwrap();
    assert_eq!(coordinator.current_index(), Some(2));
    assert_eq!(current_id(&coordinator), "c");
    assert!(coordinator.is_playing());

    coordinator.drain_events();
    coordinator.next_track().unwrap();

    assert_eq!(coordinator.current_index(), Some(2));
    assert!(!coordinator.is_playing());
    assert!(!engine.is_playing());
    assert!(coordinator.drain_events().contains(&PlaybackEvent::QueueEnded));
}

#[test]
fn test_navigation_preserves_paused_intent() {
    let (mut coordinator, engine) = loaded(&["a", "b", "c"]);

    coordinator.next_track().unwrap();

    assert_eq!(engine.loaded(), Some(url("b")));
    assert!(!engine.is_playing());
    assert_eq!(coordinator.state(), PlaybackState::Paused);
}

#[test]
fn test_prev_at_start_without_repeat() {
    let (mut coordinator, _engine) = loaded(&["a", "b"]);
    coordinator.play().unwrap();

    coordinator.prev_track().unwrap();

    assert_eq!(coordinator.current_index(), Some(0));
    assert!(!coordinator.is_playing());
}

#[test]
fn test_repeat_queue_wraps_both_directions() {
    let (mut coordinator, _engine) = loaded(&["a", "b", "c"]);
    coordinator.set_repeat_mode(RepeatMode::Queue).unwrap();
    coordinator.play().unwrap();

    coordinator.prev_track().unwrap();
    assert_eq!(coordinator.current_index(), Some(2));

    coordinator.next_track().unwrap();
    assert_eq!(coordinator.current_index(), Some(0));
    assert!(coordinator.is_playing());
}

#[test]
fn test_go_to_track_always_plays() {
    let (mut coordinator, engine) = loaded(&["a", "b", "c"]);

    coordinator.go_to_track(2).unwrap();

    assert_eq!(current_id(&coordinator), "c");
    assert!(engine.is_playing());
    assert_eq!(
        coordinator.go_to_track(7),
        Err(PlaybackError::IndexOutOfBounds { index: 7, len: 3 })
    );
    assert_eq!(current_id(&coordinator), "c");
}

#[test]
fn test_track_changed_event_carries_previous_track() {
    let (mut coordinator, _engine) = loaded(&["a", "b"]);
    coordinator.drain_events();

    coordinator.go_to_track(1).unwrap();

    let events = coordinator.drain_events();
    assert!(events.iter().any(|e| matches!(
        e,
        PlaybackEvent::TrackChanged { track_id, index: 1, previous_track_id: Some(prev) }
            if track_id.as_str() == "b" && prev.as_str() == "a"
    )));
}

#[test]
fn test_cycle_repeat_mode() {
    let (mut coordinator, _engine) = loaded(&["a"]);

    assert_eq!(coordinator.cycle_repeat_mode(), Ok(RepeatMode::Queue));
    assert_eq!(coordinator.cycle_repeat_mode(), Ok(RepeatMode::Track));
    assert_eq!(coordinator.cycle_repeat_mode(), Ok(RepeatMode::Off));
    assert_eq!(coordinator.repeat_mode(), RepeatMode::Off);
}

// ===== Ended =====

#[test]
fn test_ended_advances_and_plays() {
    let (mut coordinator, engine) = loaded(&["a", "b"]);
    coordinator.play().unwrap();

    engine.force_playing(false);
    coordinator.handle_engine_event(EngineEvent::Ended);

    assert_eq!(current_id(&coordinator), "b");
    assert!(engine.is_playing());
    assert_eq!(coordinator.state(), PlaybackState::Playing);
}

#[test]
fn test_ended_on_last_track_stops() {
    let (mut coordinator, engine) = loaded(&["a", "b"]);
    coordinator.go_to_track(1).unwrap();

    engine.force_playing(false);
    coordinator.handle_engine_event(EngineEvent::Ended);

    assert_eq!(coordinator.current_index(), Some(1));
    assert_eq!(coordinator.state(), PlaybackState::Paused);
}

#[test]
fn test_ended_with_repeat_track_replays_same_track() {
    let (mut coordinator, engine) = loaded(&["a", "b"]);
    coordinator.set_repeat_mode(RepeatMode::Track).unwrap();
    coordinator.play().unwrap();
    coordinator.handle_engine_event(EngineEvent::TimeUpdate(secs(179)));
    engine.clear_calls();

    engine.force_playing(false);
    coordinator.handle_engine_event(EngineEvent::Ended);

    assert_eq!(coordinator.current_index(), Some(0));
    assert_eq!(
        engine.calls(),
        vec![EngineCall::Seek(Duration::ZERO), EngineCall::Play]
    );
    assert!(coordinator.is_playing());
    assert_eq!(coordinator.current_time(), Duration::ZERO);
    assert!(!coordinator.listen_tracked());
}

// ===== Queue editing =====

#[test]
fn test_move_current_track_keeps_playing() {
    let (mut coordinator, engine) = loaded(&["a", "b", "c"]);
    coordinator.go_to_track(1).unwrap();
    engine.clear_calls();

    coordinator.move_track(0, 2).unwrap();

    let ids: Vec<_> = coordinator
        .current_queue()
        .unwrap()
        .tracks()
        .iter()
        .map(|t| t.id.to_string())
        .collect();
    assert_eq!(ids, vec!["b", "c", "a"]);
    assert_eq!(coordinator.current_index(), Some(0));
    assert_eq!(current_id(&coordinator), "b");
    // Engine untouched
    assert!(engine.calls().is_empty());
    assert!(engine.is_playing());
}

#[test]
fn test_remove_guards() {
    let (mut coordinator, _engine) = loaded(&["a", "b", "c"]);

    assert_eq!(
        coordinator.remove_track(0),
        Err(PlaybackError::CannotRemoveCurrent(0))
    );

    let removed = coordinator.remove_track(2).unwrap();
    assert_eq!(removed.id.as_str(), "c");
    assert_eq!(coordinator.current_queue().unwrap().len(), 2);

    let (mut single, _engine) = loaded(&["only"]);
    assert_eq!(
        single.remove_track(0),
        Err(PlaybackError::CannotRemoveLastTrack)
    );
    assert_eq!(single.current_queue().unwrap().len(), 1);
}

#[test]
fn test_remove_before_current_keeps_current_track() {
    let (mut coordinator, _engine) = loaded(&["a", "b", "c"]);
    coordinator.go_to_track(2).unwrap();

    coordinator.remove_track(0).unwrap();

    assert_eq!(coordinator.current_index(), Some(1));
    assert_eq!(current_id(&coordinator), "c");
}

#[test]
fn test_add_tracks_to_end_does_not_disturb_playback() {
    let (mut coordinator, engine) = loaded(&["a"]);
    coordinator.play().unwrap();
    engine.clear_calls();
    coordinator.drain_events();

    coordinator.add_track_to_end(track("b", 90)).unwrap();
    coordinator.add_tracks_to_end(tracks(&["c", "d"])).unwrap();

    assert_eq!(coordinator.current_queue().unwrap().len(), 4);
    assert_eq!(coordinator.current_index(), Some(0));
    assert!(engine.calls().is_empty());
    assert!(coordinator
        .drain_events()
        .iter()
        .all(|e| matches!(e, PlaybackEvent::QueueChanged { .. })));
}

// ===== Seeking =====

#[test]
fn test_seek_while_playing_stays_playing() {
    let config = PlaybackConfig {
        seek_settle_ms: 5_000,
        ..PlaybackConfig::default()
    };
    let (mut coordinator, engine) = coordinator_with(config);
    coordinator
        .set_current_queue(generator::from_release(
            ReleaseId::new("r"),
            "R",
            vec![track("a", 120)],
        ))
        .unwrap();
    coordinator.play().unwrap();
    // The engine pauses as a side effect of the seek
    engine.set_seek_toggles_playback(true);

    coordinator.seek_to_time(secs(50)).unwrap();
    assert_eq!(coordinator.state(), PlaybackState::Seeking);
    assert!(coordinator.is_playing());

    coordinator.handle_engine_event(EngineEvent::Paused);
    assert!(coordinator.is_playing(), "side-effect pause must be ignored");

    coordinator.handle_engine_event(EngineEvent::Seeked);

    assert_eq!(coordinator.state(), PlaybackState::Playing);
    assert!(engine.is_playing(), "engine resumed after drift");
    assert_eq!(coordinator.current_time(), secs(50));
}

#[test]
fn test_seek_while_paused_stays_paused() {
    let config = PlaybackConfig {
        seek_settle_ms: 5_000,
        ..PlaybackConfig::default()
    };
    let (mut coordinator, engine) = coordinator_with(config);
    coordinator
        .set_current_queue(release_queue(&["a"]))
        .unwrap();
    engine.set_seek_toggles_playback(true);

    coordinator.seek_to_time(secs(30)).unwrap();
    coordinator.handle_engine_event(EngineEvent::Playing);
    coordinator.handle_engine_event(EngineEvent::Seeked);

    assert_eq!(coordinator.state(), PlaybackState::Paused);
    assert!(!engine.is_playing());
}

#[test]
fn test_seek_window_expires_on_poll() {
    let config = PlaybackConfig {
        seek_settle_ms: 1,
        ..PlaybackConfig::default()
    };
    let (mut coordinator, engine) = coordinator_with(config);
    coordinator
        .set_current_queue(release_queue(&["a"]))
        .unwrap();
    coordinator.play().unwrap();
    engine.set_seek_toggles_playback(true);

    coordinator.seek_to_time(secs(10)).unwrap();
    std::thread::sleep(Duration::from_millis(10));
    coordinator.poll();

    assert_eq!(coordinator.state(), PlaybackState::Playing);
    assert!(engine.is_playing());
}

#[test]
fn test_seek_clamps_to_duration() {
    let (mut coordinator, engine) = coordinator_with(instant_seek_config());
    coordinator
        .set_current_queue(release_queue(&["a"]))
        .unwrap();

    coordinator.seek_to_time(secs(999)).unwrap();

    assert_eq!(engine.state().position, secs(180));
    assert_eq!(coordinator.current_time(), secs(180));
}

#[test]
fn test_seek_to_fraction() {
    let (mut coordinator, _engine) = coordinator_with(instant_seek_config());
    coordinator
        .set_current_queue(release_queue(&["a"]))
        .unwrap();

    coordinator.seek_to_fraction(0.5).unwrap();
    assert_eq!(coordinator.current_time(), secs(90));

    coordinator.seek_to_fraction(f64::NAN).unwrap();
    assert_eq!(coordinator.current_time(), Duration::ZERO);
}

#[test]
fn test_seek_to_fraction_without_duration_fails() {
    let (mut coordinator, _engine) = coordinator();
    let unknown = riffle_core::Track::new("a", "A", url("a"));
    coordinator
        .set_current_queue(generator::generate_from_tracks(vec![unknown], "t"))
        .unwrap();

    assert!(matches!(
        coordinator.seek_to_fraction(0.5),
        Err(PlaybackError::Engine(EngineError::SeekFailed(_)))
    ));
}

// ===== Load failures =====

#[test]
fn test_load_failure_stalls_on_track() {
    let (mut coordinator, engine) = loaded(&["a", "b", "c"]);
    engine.fail_url(&url("b"));
    coordinator.play().unwrap();

    let result = coordinator.next_track();

    assert!(matches!(
        result,
        Err(PlaybackError::Engine(EngineError::LoadFailed { .. }))
    ));
    assert_eq!(coordinator.current_index(), Some(1));
    assert_eq!(coordinator.current_queue().unwrap().len(), 3);
    assert!(!engine.is_playing());
    let error = coordinator.track_error().unwrap();
    assert_eq!(error.index, 1);
    assert_eq!(error.track_id.as_str(), "b");

    // The user can still move on
    coordinator.next_track().unwrap();
    assert_eq!(current_id(&coordinator), "c");
    assert!(coordinator.track_error().is_none());
}

#[test]
fn test_play_retries_failed_track() {
    let (mut coordinator, engine) = loaded(&["a", "b"]);
    engine.fail_url(&url("b"));
    assert!(coordinator.go_to_track(1).is_err());

    engine.heal_url(&url("b"));
    coordinator.play().unwrap();

    assert_eq!(engine.loaded(), Some(url("b")));
    assert!(coordinator.track_error().is_none());
    assert_eq!(coordinator.state(), PlaybackState::Playing);
}

#[test]
fn test_play_retries_failed_track_after_reorder() {
    let (mut coordinator, engine) = loaded(&["a", "b", "c"]);
    engine.fail_url(&url("b"));
    assert!(coordinator.go_to_track(1).is_err());
    engine.heal_url(&url("b"));

    // Moving "a" behind the failed track shifts it to row 0
    coordinator.move_track(0, 2).unwrap();

    assert_eq!(coordinator.current_index(), Some(0));
    let error = coordinator.track_error().unwrap();
    assert_eq!(error.index, 0);
    assert_eq!(error.track_id.as_str(), "b");

    coordinator.play().unwrap();

    assert_eq!(engine.loaded(), Some(url("b")));
    assert!(engine.is_playing());
    assert!(coordinator.track_error().is_none());
    assert_eq!(coordinator.state(), PlaybackState::Playing);
}

#[test]
fn test_late_load_failure_event() {
    let (mut coordinator, _engine) = loaded(&["a", "b"]);
    coordinator.play().unwrap();
    coordinator.drain_events();

    coordinator.handle_engine_event(EngineEvent::LoadFailed("decode error".into()));

    assert_eq!(coordinator.state(), PlaybackState::Paused);
    assert_eq!(coordinator.track_error().map(|e| e.index), Some(0));
    assert!(coordinator
        .drain_events()
        .iter()
        .any(|e| matches!(e, PlaybackEvent::TrackFailed { index: 0, .. })));
}

#[test]
fn test_skip_policy_advances_past_failed_track() {
    let config = PlaybackConfig {
        load_failure: LoadFailurePolicy::Skip,
        ..PlaybackConfig::default()
    };
    let (mut coordinator, engine) = coordinator_with(config);
    engine.fail_url(&url("b"));
    coordinator
        .set_current_queue(release_queue(&["a", "b", "c"]))
        .unwrap();
    coordinator.play().unwrap();

    coordinator.next_track().unwrap();

    assert_eq!(current_id(&coordinator), "c");
    assert!(engine.is_playing());
    assert_eq!(coordinator.current_queue().unwrap().len(), 3);
}

#[test]
fn test_skip_policy_gives_up_when_every_track_fails() {
    let config = PlaybackConfig {
        load_failure: LoadFailurePolicy::Skip,
        ..PlaybackConfig::default()
    };
    let (mut coordinator, engine) = coordinator_with(config);
    for id in ["a", "b", "c"] {
        engine.fail_url(&url(id));
    }

    let mut queue = release_queue(&["a", "b", "c"]);
    queue.set_repeat_mode(RepeatMode::Queue);
    let result = coordinator.set_current_queue(queue);

    assert!(result.is_err());
    assert!(!engine.is_playing());
    assert!(coordinator.track_error().is_some());
}

// ===== Volume =====

#[test]
fn test_volume_reaches_engine() {
    let (mut coordinator, engine) = loaded(&["a"]);
    coordinator.drain_events();

    coordinator.set_volume(100);
    assert!((engine.state().gain - 1.0).abs() < 1e-6);

    coordinator.mute();
    assert_eq!(engine.state().gain, 0.0);
    assert!(coordinator.is_muted());

    coordinator.toggle_mute();
    assert!(!coordinator.is_muted());
    assert!(coordinator
        .drain_events()
        .contains(&PlaybackEvent::VolumeChanged {
            level: 100,
            is_muted: true
        }));
}

// ===== Play source =====

#[test]
fn test_play_source_reuses_same_release_queue() {
    let (mut coordinator, engine) = loaded(&["a", "b", "c"]);
    coordinator.play().unwrap();
    coordinator.add_track_to_end(track("extra", 60)).unwrap();
    let queue_id = coordinator.current_queue().unwrap().id();

    coordinator
        .play_source(release_queue(&["a", "b", "c"]), 2)
        .unwrap();

    let queue = coordinator.current_queue().unwrap();
    assert_eq!(queue.id(), queue_id);
    assert_eq!(queue.len(), 4, "local additions survive");
    assert_eq!(current_id(&coordinator), "c");
    assert!(engine.is_playing());
}

#[test]
fn test_play_source_on_current_track_resumes() {
    let (mut coordinator, engine) = loaded(&["a", "b"]);
    coordinator.handle_engine_event(EngineEvent::TimeUpdate(secs(42)));
    engine.clear_calls();

    coordinator
        .play_source(release_queue(&["a", "b"]), 0)
        .unwrap();

    // Resumed in place, no reload
    assert_eq!(engine.calls(), vec![EngineCall::Play]);
    assert_eq!(coordinator.current_time(), secs(42));
}

#[test]
fn test_play_source_from_other_source_replaces_queue() {
    let (mut coordinator, engine) = loaded(&["a", "b"]);
    let old_id = coordinator.current_queue().unwrap().id();

    let playlist = generator::from_playlist(
        PlaylistId::new("pl-1"),
        "Mix",
        false,
        tracks(&["x", "y", "z"]),
    );
    coordinator.play_source(playlist, 1).unwrap();

    assert_ne!(coordinator.current_queue().unwrap().id(), old_id);
    assert_eq!(current_id(&coordinator), "y");
    assert!(engine.is_playing());
}

#[test]
fn test_snapshot_reflects_session() {
    let (mut coordinator, _engine) = loaded(&["a", "b"]);
    coordinator.play().unwrap();
    coordinator.handle_engine_event(EngineEvent::TimeUpdate(secs(45)));

    let snapshot = coordinator.snapshot();

    assert_eq!(snapshot.state, PlaybackState::Playing);
    assert_eq!(snapshot.current_index, Some(0));
    assert_eq!(snapshot.current_time, secs(45));
    assert!((snapshot.progress() - 0.25).abs() < 1e-9);
    assert_eq!(snapshot.queue.map(|q| q.len()), Some(2));
}
