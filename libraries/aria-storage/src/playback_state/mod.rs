//! Durable snapshot of the last observed playback state
//!
//! Written by the playback controller on transport changes and on a periodic
//! position tick, and read back once at startup to restore the prior session.

use crate::database::Database;
use crate::error::Result;
use crate::kv;
use aria_core::{decode_queue, encode_queue, PlaybackSnapshot, RepeatMode, SnapshotUpdate};
use sqlx::SqlitePool;

const TABLE: &str = "playback_state";

const KEY_TRACK_ID: &str = "last_track_id";
const KEY_POSITION_MS: &str = "last_position";
const KEY_QUEUE: &str = "last_queue";
const KEY_SHUFFLE: &str = "shuffle_mode_enabled";
const KEY_REPEAT: &str = "repeat_mode";

/// Store for the persisted playback snapshot
pub struct PlaybackStateStore {
    pool: SqlitePool,
}

impl PlaybackStateStore {
    /// Create a store backed by the given database
    #[must_use]
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.pool().clone(),
        }
    }

    /// Read the stored snapshot
    ///
    /// Missing or unparseable fields fall back to their defaults, so a fresh
    /// or partially corrupt database still yields a usable snapshot.
    ///
    /// # Errors
    /// Returns an error if a query fails
    pub async fn read(&self) -> Result<PlaybackSnapshot> {
        let track_id = kv::get(&self.pool, TABLE, KEY_TRACK_ID).await?;
        let position_ms = kv::get(&self.pool, TABLE, KEY_POSITION_MS).await?;
        let queue = kv::get(&self.pool, TABLE, KEY_QUEUE).await?;
        let shuffle = kv::get(&self.pool, TABLE, KEY_SHUFFLE).await?;
        let repeat = kv::get(&self.pool, TABLE, KEY_REPEAT).await?;

        Ok(PlaybackSnapshot {
            track_id: track_id.and_then(|v| v.parse().ok()),
            position_ms: kv::parse_or(position_ms, 0),
            queue: queue.map(|v| decode_queue(&v)).unwrap_or_default(),
            shuffle_enabled: kv::parse_or(shuffle, false),
            repeat_mode: RepeatMode::from_code(kv::parse_or(repeat, 0)),
        })
    }

    /// Replace the stored snapshot
    ///
    /// A `None` track id deletes the stored key, so the next read reports no
    /// active track. The queue is kept whatever the track id is.
    ///
    /// # Errors
    /// Returns an error if the transaction fails
    pub async fn write(&self, snapshot: &PlaybackSnapshot) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        match snapshot.track_id {
            Some(id) => kv::put(&mut *tx, TABLE, KEY_TRACK_ID, &id.to_string()).await?,
            None => kv::delete(&mut *tx, TABLE, KEY_TRACK_ID).await?,
        }
        kv::put(
            &mut *tx,
            TABLE,
            KEY_POSITION_MS,
            &snapshot.position_ms.to_string(),
        )
        .await?;
        kv::put(&mut *tx, TABLE, KEY_QUEUE, &encode_queue(&snapshot.queue)).await?;
        kv::put(
            &mut *tx,
            TABLE,
            KEY_SHUFFLE,
            &snapshot.shuffle_enabled.to_string(),
        )
        .await?;
        kv::put(
            &mut *tx,
            TABLE,
            KEY_REPEAT,
            &snapshot.repeat_mode.code().to_string(),
        )
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Apply a partial update, leaving absent fields untouched
    ///
    /// Clearing the stored track is only possible through [`Self::write`].
    ///
    /// # Errors
    /// Returns an error if the transaction fails
    pub async fn update(&self, update: &SnapshotUpdate) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        if let Some(id) = update.track_id {
            kv::put(&mut *tx, TABLE, KEY_TRACK_ID, &id.to_string()).await?;
        }
        if let Some(position_ms) = update.position_ms {
            kv::put(&mut *tx, TABLE, KEY_POSITION_MS, &position_ms.to_string()).await?;
        }
        if let Some(ref queue) = update.queue {
            kv::put(&mut *tx, TABLE, KEY_QUEUE, &encode_queue(queue)).await?;
        }
        if let Some(shuffle) = update.shuffle_enabled {
            kv::put(&mut *tx, TABLE, KEY_SHUFFLE, &shuffle.to_string()).await?;
        }
        if let Some(repeat) = update.repeat_mode {
            kv::put(&mut *tx, TABLE, KEY_REPEAT, &repeat.code().to_string()).await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
