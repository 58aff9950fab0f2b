//! Sort orders for track listings

use aria_core::Track;
use std::cmp::Reverse;

/// Sort order for track listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// By title, case-insensitive
    #[default]
    Title,
    /// Most recently added first
    DateAdded,
    /// Longest first
    Duration,
}

/// Sort tracks in place
pub fn sort_tracks(tracks: &mut [Track], order: SortOrder) {
    match order {
        SortOrder::Title => tracks.sort_by_cached_key(|t| t.title.to_lowercase()),
        SortOrder::DateAdded => tracks.sort_by_key(|t| Reverse(t.added_at)),
        SortOrder::Duration => tracks.sort_by_key(|t| Reverse(t.duration_ms)),
    }
}
