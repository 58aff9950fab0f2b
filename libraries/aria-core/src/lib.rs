//! Aria Player Core
//!
//! Shared types, traits, and error handling for Aria Player.
//!
//! This crate provides the foundational building blocks used by the catalog,
//! storage, and playback crates.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `TrackId`, `PlaybackSnapshot`, `RepeatMode`
//! - **Core Traits**: `TrackCatalog`
//! - **Error Handling**: Unified `AriaError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use aria_core::types::{PlaybackSnapshot, Track, TrackId};
//! use std::path::PathBuf;
//!
//! // A track as the catalog would report it
//! let track = Track::new(TrackId::new(42), "My Favorite Song", PathBuf::from("/music/song.mp3"));
//!
//! // The state persisted between runs
//! let snapshot = PlaybackSnapshot {
//!     track_id: Some(track.id),
//!     position_ms: 30_000,
//!     queue: vec![track.id],
//!     ..Default::default()
//! };
//! assert_eq!(snapshot.queue.len(), 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{AriaError, Result};
pub use traits::TrackCatalog;
pub use types::{
    decode_queue, encode_queue, PlaybackSnapshot, RepeatMode, SnapshotUpdate, Track, TrackId,
    UNKNOWN_ARTIST, UNKNOWN_TITLE,
};
