//! File scanning for audio files

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Supported audio file extensions
const SUPPORTED_EXTENSIONS: &[&str] = &["mp3", "flac", "ogg", "wav", "aac", "m4a", "opus"];

/// Collect audio files under the given roots
///
/// Unreadable entries are skipped, and a root that is missing or not a
/// directory is logged and skipped rather than failing the whole scan.
/// Results are sorted so rescans of an unchanged tree are deterministic.
pub(crate) fn scan_roots(roots: &[PathBuf]) -> Vec<PathBuf> {
    let mut audio_files = Vec::new();

    for root in roots {
        if !root.is_dir() {
            tracing::warn!("Skipping music root {}: not a directory", root.display());
            continue;
        }

        for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
            let path = entry.path();

            // Skip directories
            if path.is_dir() {
                continue;
            }

            // Check if file has supported extension
            if is_audio_file(path) {
                audio_files.push(path.to_path_buf());
            }
        }
    }

    audio_files.sort();
    audio_files
}

/// Check if a file is a supported audio file
#[must_use]
pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
