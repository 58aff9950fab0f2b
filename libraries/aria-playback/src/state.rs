//! Observable playback state
//!
//! Each field lives in its own watch channel so the UI can subscribe to just
//! what it renders. Command-side fields are published twice: once as a
//! prediction when the user acts, and again when the session confirms, so
//! controls respond instantly while the session stays authoritative.

use aria_core::{RepeatMode, Track};
use tokio::sync::watch;
use tracing::debug;

/// One observable value with optimistic prediction
///
/// `predict` publishes a value ahead of session confirmation; `confirm`
/// overwrites it with whatever the session actually reports.
#[derive(Debug)]
pub(crate) struct Tracked<T> {
    tx: watch::Sender<T>,
    predicted: bool,
    name: &'static str,
}

impl<T: Clone + PartialEq + std::fmt::Debug> Tracked<T> {
    pub(crate) fn new(name: &'static str, initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self {
            tx,
            predicted: false,
            name,
        }
    }

    /// Current value, predicted or confirmed
    pub(crate) fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    /// Publish a predicted value ahead of session confirmation
    pub(crate) fn predict(&mut self, value: T) {
        self.predicted = true;
        self.publish(value);
    }

    /// Publish the session-confirmed value, superseding any prediction
    pub(crate) fn confirm(&mut self, value: T) {
        if self.predicted && *self.tx.borrow() != value {
            debug!(field = self.name, ?value, "Session corrected predicted value");
        }
        self.predicted = false;
        self.publish(value);
    }

    // Watchers only wake when the value actually changes
    fn publish(&self, value: T) {
        self.tx.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        });
    }
}

/// Write side of the observable state, owned by the controller driver
pub(crate) struct StatePublisher {
    pub(crate) current_track: Tracked<Option<Track>>,
    pub(crate) is_playing: Tracked<bool>,
    pub(crate) position_ms: Tracked<u64>,
    pub(crate) duration_ms: Tracked<u64>,
    pub(crate) shuffle_enabled: Tracked<bool>,
    pub(crate) repeat_mode: Tracked<RepeatMode>,
}

impl StatePublisher {
    pub(crate) fn new() -> Self {
        Self {
            current_track: Tracked::new("current_track", None),
            is_playing: Tracked::new("is_playing", false),
            position_ms: Tracked::new("position_ms", 0),
            duration_ms: Tracked::new("duration_ms", 0),
            shuffle_enabled: Tracked::new("shuffle_enabled", false),
            repeat_mode: Tracked::new("repeat_mode", RepeatMode::Off),
        }
    }

    pub(crate) fn watch(&self) -> StateWatch {
        StateWatch {
            current_track: self.current_track.subscribe(),
            is_playing: self.is_playing.subscribe(),
            position_ms: self.position_ms.subscribe(),
            duration_ms: self.duration_ms.subscribe(),
            shuffle_enabled: self.shuffle_enabled.subscribe(),
            repeat_mode: self.repeat_mode.subscribe(),
        }
    }
}

/// Read side of the observable playback state
///
/// Cheap to clone; every clone observes the same underlying channels. The
/// snapshot getters return the latest value, the `watch_*` methods hand out
/// receivers to await changes on.
#[derive(Debug, Clone)]
pub struct StateWatch {
    current_track: watch::Receiver<Option<Track>>,
    is_playing: watch::Receiver<bool>,
    position_ms: watch::Receiver<u64>,
    duration_ms: watch::Receiver<u64>,
    shuffle_enabled: watch::Receiver<bool>,
    repeat_mode: watch::Receiver<RepeatMode>,
}

impl StateWatch {
    /// Currently active track
    #[must_use]
    pub fn current_track(&self) -> Option<Track> {
        self.current_track.borrow().clone()
    }

    /// Whether the session is playing
    #[must_use]
    pub fn is_playing(&self) -> bool {
        *self.is_playing.borrow()
    }

    /// Playback position in milliseconds
    #[must_use]
    pub fn position_ms(&self) -> u64 {
        *self.position_ms.borrow()
    }

    /// Duration of the active track in milliseconds
    #[must_use]
    pub fn duration_ms(&self) -> u64 {
        *self.duration_ms.borrow()
    }

    /// Whether shuffle is enabled
    #[must_use]
    pub fn shuffle_enabled(&self) -> bool {
        *self.shuffle_enabled.borrow()
    }

    /// Current repeat mode
    #[must_use]
    pub fn repeat_mode(&self) -> RepeatMode {
        *self.repeat_mode.borrow()
    }

    /// Subscribe to track changes
    #[must_use]
    pub fn watch_current_track(&self) -> watch::Receiver<Option<Track>> {
        self.current_track.clone()
    }

    /// Subscribe to play/pause changes
    #[must_use]
    pub fn watch_is_playing(&self) -> watch::Receiver<bool> {
        self.is_playing.clone()
    }

    /// Subscribe to position updates
    #[must_use]
    pub fn watch_position_ms(&self) -> watch::Receiver<u64> {
        self.position_ms.clone()
    }

    /// Subscribe to duration changes
    #[must_use]
    pub fn watch_duration_ms(&self) -> watch::Receiver<u64> {
        self.duration_ms.clone()
    }

    /// Subscribe to shuffle changes
    #[must_use]
    pub fn watch_shuffle_enabled(&self) -> watch::Receiver<bool> {
        self.shuffle_enabled.clone()
    }

    /// Subscribe to repeat mode changes
    #[must_use]
    pub fn watch_repeat_mode(&self) -> watch::Receiver<RepeatMode> {
        self.repeat_mode.clone()
    }
}
