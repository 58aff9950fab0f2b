//! Integration tests for the playback state store
//!
//! Covers default reads on a fresh database, durability across reopen,
//! partial updates, track clearing, and degraded reads of corrupt rows.


use aria_core::{PlaybackSnapshot, RepeatMode, SnapshotUpdate, TrackId};
use aria_storage::PlaybackStateStore;
use test_helpers::TestDb;

fn ids(raw: &[i64]) -> Vec<TrackId> {
    raw.iter().copied().map(TrackId::new).collect()
}

fn sample_snapshot() -> PlaybackSnapshot {
    PlaybackSnapshot {
        track_id: Some(TrackId::new(42)),
        position_ms: 93_500,
        queue: ids(&[42, 7, 13]),
        shuffle_enabled: true,
        repeat_mode: RepeatMode::All,
    }
}

#[tokio::test]
async fn test_fresh_database_reads_defaults() {
    let test_db = TestDb::new().await;
    let store = PlaybackStateStore::new(&test_db.db);

    let snapshot = store.read().await.unwrap();

    assert_eq!(snapshot, PlaybackSnapshot::default());
}

#[tokio::test]
async fn test_snapshot_survives_reopen() {
    let test_db = TestDb::new().await;

    let store = PlaybackStateStore::new(&test_db.db);
    store.write(&sample_snapshot()).await.unwrap();

    let reopened = test_db.reopen().await;
    let store = PlaybackStateStore::new(&reopened);

    assert_eq!(store.read().await.unwrap(), sample_snapshot());
}

#[tokio::test]
async fn test_partial_update_keeps_other_fields() {
    let test_db = TestDb::new().await;
    let store = PlaybackStateStore::new(&test_db.db);

    store.write(&sample_snapshot()).await.unwrap();

    store
        .update(&SnapshotUpdate {
            position_ms: Some(120_000),
            ..SnapshotUpdate::default()
        })
        .await
        .unwrap();

    let snapshot = store.read().await.unwrap();
    assert_eq!(snapshot.position_ms, 120_000);
    assert_eq!(snapshot.track_id, Some(TrackId::new(42)));
    assert_eq!(snapshot.queue, ids(&[42, 7, 13]));
    assert!(snapshot.shuffle_enabled);
    assert_eq!(snapshot.repeat_mode, RepeatMode::All);
}

#[tokio::test]
async fn test_update_can_replace_queue_and_track() {
    let test_db = TestDb::new().await;
    let store = PlaybackStateStore::new(&test_db.db);

    store.write(&sample_snapshot()).await.unwrap();

    store
        .update(&SnapshotUpdate {
            track_id: Some(TrackId::new(7)),
            queue: Some(ids(&[7, 13])),
            ..SnapshotUpdate::default()
        })
        .await
        .unwrap();

    let snapshot = store.read().await.unwrap();
    assert_eq!(snapshot.track_id, Some(TrackId::new(7)));
    assert_eq!(snapshot.queue, ids(&[7, 13]));
    // Untouched fields survive
    assert_eq!(snapshot.position_ms, 93_500);
}

#[tokio::test]
async fn test_writing_without_track_clears_it_but_keeps_queue() {
    let test_db = TestDb::new().await;
    let store = PlaybackStateStore::new(&test_db.db);

    store.write(&sample_snapshot()).await.unwrap();

    let stopped = PlaybackSnapshot {
        track_id: None,
        position_ms: 0,
        ..sample_snapshot()
    };
    store.write(&stopped).await.unwrap();

    let snapshot = store.read().await.unwrap();
    assert_eq!(snapshot.track_id, None);
    assert_eq!(snapshot.position_ms, 0);
    assert_eq!(snapshot.queue, ids(&[42, 7, 13]));
}

#[tokio::test]
async fn test_empty_queue_round_trips() {
    let test_db = TestDb::new().await;
    let store = PlaybackStateStore::new(&test_db.db);

    let snapshot = PlaybackSnapshot {
        queue: Vec::new(),
        ..sample_snapshot()
    };
    store.write(&snapshot).await.unwrap();

    assert!(store.read().await.unwrap().queue.is_empty());
}

#[tokio::test]
async fn test_corrupt_values_fall_back_to_defaults() {
    let test_db = TestDb::new().await;
    let store = PlaybackStateStore::new(&test_db.db);

    for (key, value) in [
        ("last_track_id", "not-a-number"),
        ("last_position", "garbage"),
        ("shuffle_mode_enabled", "maybe"),
        ("repeat_mode", "forever"),
    ] {
        sqlx::query("INSERT INTO playback_state (key, value, updated_at) VALUES (?, ?, 0)")
            .bind(key)
            .bind(value)
            .execute(test_db.db.pool())
            .await
            .unwrap();
    }

    let snapshot = store.read().await.unwrap();
    assert_eq!(snapshot.track_id, None);
    assert_eq!(snapshot.position_ms, 0);
    assert!(!snapshot.shuffle_enabled);
    assert_eq!(snapshot.repeat_mode, RepeatMode::Off);
}

#[tokio::test]
async fn test_queue_with_unparseable_entries_drops_them() {
    let test_db = TestDb::new().await;
    let store = PlaybackStateStore::new(&test_db.db);

    sqlx::query("INSERT INTO playback_state (key, value, updated_at) VALUES ('last_queue', '1,x,3', 0)")
        .execute(test_db.db.pool())
        .await
        .unwrap();

    assert_eq!(store.read().await.unwrap().queue, ids(&[1, 3]));
}
