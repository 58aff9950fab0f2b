/// Track domain type
use crate::types::TrackId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Placeholder title for files without a title tag
pub const UNKNOWN_TITLE: &str = "Unknown";

/// Placeholder artist for files without an artist tag
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Audio track as reported by the device catalog
///
/// Immutable once constructed; the app never writes back to the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Track title (`"Unknown"` when the file carries no title tag)
    pub title: String,

    /// Artist name (`"Unknown Artist"` when untagged)
    pub artist: String,

    /// Track duration in milliseconds
    pub duration_ms: u64,

    /// Source audio file
    pub path: PathBuf,

    /// Artwork locator; points at the audio file itself when it embeds a
    /// picture
    pub artwork: Option<PathBuf>,

    /// When the track appeared on the device
    pub added_at: DateTime<Utc>,
}

impl Track {
    /// Create a new track with minimal metadata
    pub fn new(id: TrackId, title: impl Into<String>, path: PathBuf) -> Self {
        Self {
            id,
            title: title.into(),
            artist: UNKNOWN_ARTIST.to_string(),
            duration_ms: 0,
            path,
            artwork: None,
            added_at: Utc::now(),
        }
    }

    /// Get the track duration as a Duration
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}
