//! Integration tests for controller commands and session events


use aria_core::{RepeatMode, TrackId};
use aria_playback::SessionEvent;
use test_helpers::{make_track, settle, start_controller, FakeSession, SessionCall};

#[tokio::test]
async fn test_play_track_sets_queue_and_starts_playback() {
    let session = FakeSession::new();
    let (controller, _reader) = start_controller(&session).await;

    let one = make_track(1, "One");
    let two = make_track(2, "Two");
    let three = make_track(3, "Three");
    controller.play_track(two.clone(), vec![one.clone(), two.clone(), three.clone()]);
    settle().await;

    assert_eq!(
        session.calls(),
        vec![
            SessionCall::SetQueue {
                ids: vec![one.id, two.id, three.id],
                start_index: 1,
                position_ms: 0,
            },
            SessionCall::Play,
        ]
    );

    let state = controller.state();
    assert_eq!(state.current_track(), Some(two));
    assert!(state.is_playing());
    assert_eq!(state.position_ms(), 0);
}

#[tokio::test]
async fn test_play_track_with_an_empty_queue_plays_it_alone() {
    let session = FakeSession::new();
    let (controller, _reader) = start_controller(&session).await;

    let one = make_track(1, "One");
    controller.play_track(one.clone(), Vec::new());
    settle().await;

    assert_eq!(
        session.calls(),
        vec![
            SessionCall::SetQueue {
                ids: vec![one.id],
                start_index: 0,
                position_ms: 0,
            },
            SessionCall::Play,
        ]
    );
    assert_eq!(controller.state().current_track(), Some(one));
}

#[tokio::test]
async fn test_play_track_missing_from_the_queue_starts_at_the_front() {
    let session = FakeSession::echoing();
    let (controller, _reader) = start_controller(&session).await;

    let one = make_track(1, "One");
    let two = make_track(2, "Two");
    let stray = make_track(9, "Stray");
    controller.play_track(stray, vec![one.clone(), two.clone()]);
    settle().await;

    assert_eq!(
        session.calls().first(),
        Some(&SessionCall::SetQueue {
            ids: vec![one.id, two.id],
            start_index: 0,
            position_ms: 0,
        })
    );
    // The stray prediction is corrected once the session reports what loaded
    assert_eq!(controller.state().current_track(), Some(one));
}

#[tokio::test]
async fn test_toggle_play_pause_is_optimistic_until_the_session_reports() {
    let session = FakeSession::new();
    let (controller, _reader) = start_controller(&session).await;

    let track = make_track(1, "One");
    controller.play_track(track.clone(), vec![track]);
    settle().await;
    assert!(controller.state().is_playing());

    controller.toggle_play_pause();
    settle().await;
    assert!(!controller.state().is_playing());
    assert!(session.calls().contains(&SessionCall::Pause));

    // The session disagrees, and its report wins
    session.emit(SessionEvent::PlayingChanged { is_playing: true });
    settle().await;
    assert!(controller.state().is_playing());
}

#[tokio::test]
async fn test_rapid_toggles_land_on_the_final_state() {
    let session = FakeSession::echoing();
    let (controller, _reader) = start_controller(&session).await;

    let track = make_track(1, "One");
    controller.play_track(track.clone(), vec![track]);
    settle().await;
    session.clear_calls();

    controller.toggle_play_pause();
    controller.toggle_play_pause();
    controller.toggle_play_pause();
    settle().await;

    assert!(!controller.state().is_playing());
    assert_eq!(
        session.calls(),
        vec![SessionCall::Pause, SessionCall::Play, SessionCall::Pause]
    );
}

#[tokio::test]
async fn test_shuffle_toggle_flips_state_and_persists() {
    let session = FakeSession::echoing();
    let (controller, reader) = start_controller(&session).await;

    controller.toggle_shuffle();
    settle().await;
    assert!(controller.state().shuffle_enabled());
    assert_eq!(
        session.calls(),
        vec![SessionCall::SetShuffle { enabled: true }]
    );
    assert!(reader.read().await.unwrap().shuffle_enabled);

    controller.toggle_shuffle();
    settle().await;
    assert!(!controller.state().shuffle_enabled());
    assert!(!reader.read().await.unwrap().shuffle_enabled);
}

#[tokio::test]
async fn test_repeat_mode_cycles_off_all_one() {
    let session = FakeSession::echoing();
    let (controller, reader) = start_controller(&session).await;

    controller.toggle_repeat_mode();
    settle().await;
    assert_eq!(controller.state().repeat_mode(), RepeatMode::All);
    assert_eq!(reader.read().await.unwrap().repeat_mode, RepeatMode::All);

    controller.toggle_repeat_mode();
    settle().await;
    assert_eq!(controller.state().repeat_mode(), RepeatMode::One);

    controller.toggle_repeat_mode();
    settle().await;
    assert_eq!(controller.state().repeat_mode(), RepeatMode::Off);

    assert_eq!(
        session.calls(),
        vec![
            SessionCall::SetRepeat {
                mode: RepeatMode::All
            },
            SessionCall::SetRepeat {
                mode: RepeatMode::One
            },
            SessionCall::SetRepeat {
                mode: RepeatMode::Off
            },
        ]
    );
}

#[tokio::test]
async fn test_stop_clears_the_track_but_keeps_the_queue() {
    let session = FakeSession::echoing();
    let (controller, reader) = start_controller(&session).await;

    let one = make_track(1, "One");
    let two = make_track(2, "Two");
    controller.play_track(one.clone(), vec![one.clone(), two.clone()]);
    settle().await;

    controller.stop();
    settle().await;

    let state = controller.state();
    assert!(!state.is_playing());
    assert_eq!(state.current_track(), None);
    assert_eq!(state.position_ms(), 0);
    assert_eq!(state.duration_ms(), 0);
    assert!(session.calls().contains(&SessionCall::Stop));

    let snapshot = reader.read().await.unwrap();
    assert_eq!(snapshot.track_id, None);
    assert_eq!(snapshot.queue, vec![one.id, two.id]);
    assert_eq!(snapshot.position_ms, 0);
}

#[tokio::test]
async fn test_session_initiated_track_change_is_resolved_from_the_queue() {
    let session = FakeSession::new();
    let (controller, _reader) = start_controller(&session).await;

    let one = make_track(1, "One");
    let two = make_track(2, "Two");
    controller.play_track(one.clone(), vec![one, two.clone()]);
    settle().await;

    // The session advanced to the next track on its own
    session.emit(SessionEvent::TrackChanged {
        track_id: Some(two.id),
    });
    session.emit(SessionEvent::Ready {
        duration_ms: 200_000,
    });
    settle().await;

    assert_eq!(controller.state().current_track(), Some(two));
    assert_eq!(controller.state().duration_ms(), 200_000);

    // A track the controller never queued cannot be resolved
    session.emit(SessionEvent::TrackChanged {
        track_id: Some(TrackId::new(99)),
    });
    settle().await;
    assert_eq!(controller.state().current_track(), None);
}

#[tokio::test]
async fn test_session_error_event_does_not_kill_the_driver() {
    let session = FakeSession::new();
    let (controller, _reader) = start_controller(&session).await;

    session.emit(SessionEvent::Error {
        message: "decoder died".into(),
    });
    settle().await;

    controller.toggle_shuffle();
    settle().await;
    assert!(session
        .calls()
        .contains(&SessionCall::SetShuffle { enabled: true }));
}

#[tokio::test]
async fn test_release_persists_state_and_stops_accepting_commands() {
    let session = FakeSession::new();
    let (controller, reader) = start_controller(&session).await;

    let track = make_track(1, "One");
    controller.play_track(track.clone(), vec![track.clone()]);
    settle().await;

    session.set_position(4_500);
    controller.release().await;

    assert!(session.calls().contains(&SessionCall::Release));
    let snapshot = reader.read().await.unwrap();
    assert_eq!(snapshot.track_id, Some(track.id));
    assert_eq!(snapshot.queue, vec![track.id]);
    assert_eq!(snapshot.position_ms, 4_500);

    // Commands after release are dropped and the timers are gone
    session.clear_calls();
    let queries = session.position_queries();
    controller.toggle_play_pause();
    settle().await;
    assert!(session.calls().is_empty());
    assert_eq!(session.position_queries(), queries);
}

#[tokio::test]
async fn test_seek_updates_the_position_optimistically() {
    let session = FakeSession::new();
    let (controller, _reader) = start_controller(&session).await;

    let track = make_track(1, "One");
    controller.play_track(track.clone(), vec![track]);
    settle().await;

    controller.seek_to(42_000);
    settle().await;

    assert!(session.calls().contains(&SessionCall::SeekTo {
        position_ms: 42_000
    }));
    assert_eq!(controller.state().position_ms(), 42_000);
}

#[tokio::test]
async fn test_next_and_previous_are_forwarded_to_the_session() {
    let session = FakeSession::new();
    let (controller, _reader) = start_controller(&session).await;

    let track = make_track(1, "One");
    controller.play_track(track.clone(), vec![track]);
    settle().await;
    session.clear_calls();

    controller.play_next();
    controller.play_previous();
    settle().await;

    assert_eq!(
        session.calls(),
        vec![SessionCall::Next, SessionCall::Previous]
    );
}

#[tokio::test]
async fn test_dropping_every_handle_releases_the_session() {
    let session = FakeSession::new();
    let (controller, reader) = start_controller(&session).await;

    let track = make_track(1, "One");
    controller.play_track(track.clone(), vec![track]);
    settle().await;

    session.set_position(2_500);
    drop(controller);
    settle().await;

    assert!(session.calls().contains(&SessionCall::Release));
    assert_eq!(reader.read().await.unwrap().position_ms, 2_500);
}

#[tokio::test]
async fn test_failed_connect_leaves_the_controller_inert() {
    let session = FakeSession::failing_connect();
    let (controller, _reader) = start_controller(&session).await;

    let track = make_track(1, "One");
    controller.play_track(track.clone(), vec![track]);
    settle().await;

    assert!(session.calls().is_empty());
    assert!(!controller.state().is_playing());
}
