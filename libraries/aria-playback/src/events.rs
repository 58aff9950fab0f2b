//! Session events
//!
//! Events reported by a media session backend. They arrive on a broadcast
//! channel, so the controller and any diagnostic listeners observe the same
//! ordered stream.

use aria_core::{RepeatMode, TrackId};
use serde::{Deserialize, Serialize};

/// Events emitted by a media session backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// Play/pause state changed
    PlayingChanged {
        /// Whether the session is now playing
        is_playing: bool,
    },

    /// The active track changed
    TrackChanged {
        /// Id of the new track, or `None` when nothing is loaded
        track_id: Option<TrackId>,
    },

    /// The session finished preparing the active track
    Ready {
        /// Total duration of the active track
        duration_ms: u64,
    },

    /// Shuffle was toggled
    ShuffleChanged {
        /// Whether shuffle is now enabled
        enabled: bool,
    },

    /// Repeat mode changed
    RepeatChanged {
        /// The new repeat mode
        mode: RepeatMode,
    },

    /// Error occurred during playback
    Error {
        /// Error message
        message: String,
    },
}
