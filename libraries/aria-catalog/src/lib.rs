//! Aria Player Track Catalog
//!
//! Read-only view of the audio files on the device. The catalog scans
//! configured music roots, reads tags with lofty, and hands out [`Track`]
//! values with stable path-derived ids.
//!
//! Files whose tags cannot be read still show up with placeholder metadata,
//! so one broken file never hides the rest of the library.
//!
//! [`Track`]: aria_core::Track

mod provider;
mod scanner;
mod sort;

pub use provider::FileSystemCatalog;
pub use scanner::is_audio_file;
pub use sort::{sort_tracks, SortOrder};
