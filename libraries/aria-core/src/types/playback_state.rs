/// Persisted playback state types
use crate::types::TrackId;
use serde::{Deserialize, Serialize};

/// Repeat mode for playback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Play through the queue once
    #[default]
    Off,
    /// Loop the whole queue
    All,
    /// Loop the active track
    One,
}

impl RepeatMode {
    /// Next mode in the user-facing toggle cycle: off → all → one → off
    #[must_use]
    pub fn cycle(self) -> Self {
        match self {
            Self::Off => Self::All,
            Self::All => Self::One,
            Self::One => Self::Off,
        }
    }

    /// Integer code used in durable storage (0 = off, 1 = one, 2 = all)
    #[must_use]
    pub fn code(self) -> i64 {
        match self {
            Self::Off => 0,
            Self::One => 1,
            Self::All => 2,
        }
    }

    /// Parse a storage code; unknown codes fall back to `Off`
    #[must_use]
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Self::One,
            2 => Self::All,
            _ => Self::Off,
        }
    }

    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::All => "all",
            Self::One => "one",
        }
    }
}

impl std::fmt::Display for RepeatMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Last-known playback state, durable across process restarts
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlaybackSnapshot {
    /// Track that was active (`None` when playback was stopped)
    pub track_id: Option<TrackId>,

    /// Position within the active track, in milliseconds
    pub position_ms: u64,

    /// Queue as ordered track ids
    pub queue: Vec<TrackId>,

    /// Whether shuffle was enabled
    pub shuffle_enabled: bool,

    /// Repeat mode
    pub repeat_mode: RepeatMode,
}

/// Partial update to the persisted snapshot
///
/// Fields left as `None` retain their stored values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotUpdate {
    /// Set the active track
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_id: Option<TrackId>,

    /// Set the position in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_ms: Option<u64>,

    /// Set the queue
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue: Option<Vec<TrackId>>,

    /// Set the shuffle flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shuffle_enabled: Option<bool>,

    /// Set the repeat mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat_mode: Option<RepeatMode>,
}

/// Encode a queue as the comma-joined id string used in durable storage
#[must_use]
pub fn encode_queue(queue: &[TrackId]) -> String {
    queue
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Decode a comma-joined id string
///
/// The empty string decodes to an empty queue; non-numeric fragments are
/// dropped.
#[must_use]
pub fn decode_queue(encoded: &str) -> Vec<TrackId> {
    encoded
        .split(',')
        .filter_map(|fragment| fragment.parse().ok())
        .collect()
}
