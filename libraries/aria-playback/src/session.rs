//! Media session bridge trait

use crate::error::Result;
use crate::events::SessionEvent;
use aria_core::{RepeatMode, Track};
use async_trait::async_trait;
use tokio::sync::broadcast;

/// Platform media session driven by the playback controller
///
/// Implemented by whatever owns the actual player: a native media session, a
/// remote renderer, or a test fake. Command methods request a change; the
/// session reports what actually happened through the event stream returned
/// by [`Self::connect`], and that report is authoritative.
#[async_trait]
pub trait MediaSession: Send + Sync {
    /// Connect to the session and start receiving events
    async fn connect(&self) -> Result<broadcast::Receiver<SessionEvent>>;

    /// Replace the playback queue, activating the track at `start_index`
    /// positioned at `position_ms`
    async fn set_queue(&self, tracks: &[Track], start_index: usize, position_ms: u64)
        -> Result<()>;

    /// Begin or resume playback
    async fn play(&self) -> Result<()>;

    /// Pause playback, keeping the position
    async fn pause(&self) -> Result<()>;

    /// Stop playback and unload the active track
    async fn stop(&self) -> Result<()>;

    /// Prepare the active track without starting playback
    async fn prepare(&self) -> Result<()>;

    /// Seek within the active track
    async fn seek_to(&self, position_ms: u64) -> Result<()>;

    /// Skip to the next track in the queue
    async fn next(&self) -> Result<()>;

    /// Return to the previous track or restart the current one
    async fn previous(&self) -> Result<()>;

    /// Enable or disable shuffle
    async fn set_shuffle(&self, enabled: bool) -> Result<()>;

    /// Set the repeat mode
    async fn set_repeat(&self, mode: RepeatMode) -> Result<()>;

    /// Current playback position
    async fn position_ms(&self) -> Result<u64>;

    /// Release the session and its resources
    async fn release(&self) -> Result<()>;
}
