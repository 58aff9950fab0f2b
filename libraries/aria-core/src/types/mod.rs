mod ids;
mod playback_state;
mod track;

pub use ids::TrackId;
pub use playback_state::{
    decode_queue, encode_queue, PlaybackSnapshot, RepeatMode, SnapshotUpdate,
};
pub use track::{Track, UNKNOWN_ARTIST, UNKNOWN_TITLE};
