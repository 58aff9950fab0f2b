/// Core traits for Aria Player
use crate::error::Result;
use crate::types::{Track, TrackId};
use async_trait::async_trait;

/// Read access to the device's audio catalog.
///
/// Implementations enumerate every audio file visible to the device and
/// resolve individual identifiers. The playback controller only ever reads
/// from the catalog; nothing in the system writes to it.
#[async_trait]
pub trait TrackCatalog: Send + Sync {
    /// List every audio track in the catalog.
    ///
    /// Ordering is unspecified; callers that care sort the result themselves.
    async fn all_tracks(&self) -> Result<Vec<Track>>;

    /// Look up a single track by id.
    ///
    /// Returns `Ok(None)` when the id does not resolve against the current
    /// catalog contents.
    async fn track_by_id(&self, id: TrackId) -> Result<Option<Track>>;
}
