//! User settings with change notification
//!
//! The store reads its values once when opened and publishes changes over a
//! watch channel, so consumers can react without polling the database.

use crate::database::Database;
use crate::error::Result;
use crate::kv;
use sqlx::SqlitePool;
use tokio::sync::watch;

const TABLE: &str = "settings";

const KEY_AUDIO_FOCUS: &str = "audio_focus_enabled";

/// Current values of all user settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingsSnapshot {
    /// Whether playback yields to other applications taking audio focus
    pub audio_focus_enabled: bool,
}

impl Default for SettingsSnapshot {
    fn default() -> Self {
        Self {
            audio_focus_enabled: true,
        }
    }
}

/// Store for user settings
pub struct SettingsStore {
    pool: SqlitePool,
    tx: watch::Sender<SettingsSnapshot>,
}

impl SettingsStore {
    /// Open the store, reading current values from the database
    ///
    /// Missing or unparseable values fall back to their defaults.
    ///
    /// # Errors
    /// Returns an error if a query fails
    pub async fn open(db: &Database) -> Result<Self> {
        let pool = db.pool().clone();

        let audio_focus = kv::get(&pool, TABLE, KEY_AUDIO_FOCUS).await?;
        let snapshot = SettingsSnapshot {
            audio_focus_enabled: kv::parse_or(audio_focus, true),
        };

        let (tx, _rx) = watch::channel(snapshot);
        Ok(Self { pool, tx })
    }

    /// Current settings
    #[must_use]
    pub fn current(&self) -> SettingsSnapshot {
        *self.tx.borrow()
    }

    /// Whether audio focus management is enabled, from the cache
    #[must_use]
    pub fn audio_focus_enabled(&self) -> bool {
        self.tx.borrow().audio_focus_enabled
    }

    /// Subscribe to settings changes
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<SettingsSnapshot> {
        self.tx.subscribe()
    }

    /// Enable or disable pausing when audio focus is lost
    ///
    /// The new value is durable before observers see it.
    ///
    /// # Errors
    /// Returns an error if the write fails
    pub async fn set_audio_focus_enabled(&self, enabled: bool) -> Result<()> {
        kv::put(&self.pool, TABLE, KEY_AUDIO_FOCUS, &enabled.to_string()).await?;
        self.tx.send_modify(|s| s.audio_focus_enabled = enabled);
        Ok(())
    }
}
