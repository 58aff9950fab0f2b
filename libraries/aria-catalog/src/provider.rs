/// Filesystem-backed track catalog
use crate::scanner;
use crate::sort::{sort_tracks, SortOrder};
use aria_core::{AriaError, Result, Track, TrackCatalog, TrackId, UNKNOWN_TITLE};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lofty::{Accessor, AudioFile, TaggedFileExt};
use sha2::{Digest, Sha256};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Track catalog backed by audio files under configured music roots
///
/// The first query scans the filesystem and caches the result; call
/// [`Self::refresh`] to pick up changes on disk.
pub struct FileSystemCatalog {
    roots: Vec<PathBuf>,
    cache: RwLock<Option<Arc<Vec<Track>>>>,
}

impl FileSystemCatalog {
    /// Create a catalog over the given music roots
    #[must_use]
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self {
            roots,
            cache: RwLock::new(None),
        }
    }

    /// Rescan the music roots, replacing the cached track list
    ///
    /// # Errors
    /// Returns an error if the scan task fails
    pub async fn refresh(&self) -> Result<()> {
        let tracks = Arc::new(self.scan().await?);
        *self.cache.write().await = Some(tracks);
        Ok(())
    }

    /// Tracks in the given order
    ///
    /// # Errors
    /// Returns an error if the scan task fails
    pub async fn tracks_sorted(&self, order: SortOrder) -> Result<Vec<Track>> {
        let mut tracks = (*self.tracks().await?).clone();
        sort_tracks(&mut tracks, order);
        Ok(tracks)
    }

    async fn tracks(&self) -> Result<Arc<Vec<Track>>> {
        if let Some(tracks) = self.cache.read().await.as_ref() {
            return Ok(Arc::clone(tracks));
        }

        let tracks = Arc::new(self.scan().await?);
        *self.cache.write().await = Some(Arc::clone(&tracks));
        Ok(tracks)
    }

    async fn scan(&self) -> Result<Vec<Track>> {
        let roots = self.roots.clone();

        let tracks = tokio::task::spawn_blocking(move || {
            scanner::scan_roots(&roots)
                .into_iter()
                .map(|path| read_track(&path))
                .collect::<Vec<_>>()
        })
        .await
        .map_err(|e| AriaError::catalog(format!("Scan task failed: {e}")))?;

        debug!(count = tracks.len(), "Scanned music roots");
        Ok(tracks)
    }
}

#[async_trait]
impl TrackCatalog for FileSystemCatalog {
    async fn all_tracks(&self) -> Result<Vec<Track>> {
        self.tracks_sorted(SortOrder::Title).await
    }

    async fn track_by_id(&self, id: TrackId) -> Result<Option<Track>> {
        Ok(self.tracks().await?.iter().find(|t| t.id == id).cloned())
    }
}

/// Build a track from a file on disk
///
/// Files lofty cannot parse still yield an entry with placeholder metadata,
/// so one broken file never hides the rest of the library.
fn read_track(path: &Path) -> Track {
    let mut track = Track::new(track_id_for(path), UNKNOWN_TITLE, path.to_path_buf());
    track.added_at = added_at(path);

    let tagged_file = match lofty::read_from_path(path) {
        Ok(file) => file,
        Err(e) => {
            debug!("Failed to read tags from {}: {e}", path.display());
            return track;
        }
    };

    track.duration_ms = tagged_file.properties().duration().as_millis() as u64;

    // Get primary tag (prefer ID3v2 for MP3, Vorbis for OGG/FLAC)
    if let Some(tag) = tagged_file
        .primary_tag()
        .or_else(|| tagged_file.first_tag())
    {
        if let Some(title) = text(tag.title()) {
            track.title = title;
        }
        if let Some(artist) = text(tag.artist()) {
            track.artist = artist;
        }
        if !tag.pictures().is_empty() {
            track.artwork = Some(path.to_path_buf());
        }
    }

    track
}

/// Normalize a tag value, treating whitespace-only text as absent
fn text(value: Option<Cow<'_, str>>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Stable id derived from the file path
///
/// Top 63 bits of a SHA-256 digest of the path, so ids are non-negative and
/// identical across rescans of the same tree.
fn track_id_for(path: &Path) -> TrackId {
    let digest = Sha256::digest(path.to_string_lossy().as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    TrackId::new((u64::from_be_bytes(bytes) >> 1) as i64)
}

fn added_at(path: &Path) -> DateTime<Utc> {
    std::fs::metadata(path)
        .and_then(|m| m.modified())
        .map(DateTime::<Utc>::from)
        .unwrap_or_else(|_| Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_stable_and_non_negative() {
        let a = track_id_for(Path::new("/music/song.mp3"));
        let b = track_id_for(Path::new("/music/song.mp3"));
        let c = track_id_for(Path::new("/music/other.mp3"));

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.as_i64() >= 0);
        assert!(c.as_i64() >= 0);
    }

    #[test]
    fn tag_text_is_trimmed_and_emptiness_is_absence() {
        assert_eq!(text(Some(Cow::from("  Aria  "))), Some("Aria".to_string()));
        assert_eq!(text(Some(Cow::from("   "))), None);
        assert_eq!(text(None), None);
    }
}
