//! Error types for the playback controller

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Session backend rejected or failed an operation
    #[error("Session error: {0}")]
    Session(String),

    /// Failure from the track catalog
    #[error("Catalog error: {0}")]
    Catalog(#[from] aria_core::AriaError),

    /// Failure from the state store
    #[error("Storage error: {0}")]
    Storage(#[from] aria_storage::StorageError),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
