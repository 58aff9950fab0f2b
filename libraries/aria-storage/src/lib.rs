//! Aria Player Storage
//!
//! `SQLite`-backed persistence for playback state and user settings.
//!
//! Both stores are narrow key/value tables. Playback state is rewritten on
//! every observed transport change plus a periodic position tick, so keeping
//! one row per field makes those writes cheap and lets partial updates touch
//! only what changed.
//!
//! # Example
//!
//! ```rust,no_run
//! use aria_storage::{Database, PlaybackStateStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::new("sqlite://aria.db").await?;
//!
//! let store = PlaybackStateStore::new(&db);
//! let snapshot = store.read().await?;
//! println!("last track: {:?} at {} ms", snapshot.track_id, snapshot.position_ms);
//! # Ok(())
//! # }
//! ```

mod database;
mod error;
mod kv;

pub mod playback_state;
pub mod settings;

pub use database::Database;
pub use error::StorageError;
pub use playback_state::PlaybackStateStore;
pub use settings::{SettingsSnapshot, SettingsStore};
