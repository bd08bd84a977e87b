//! CSPF data model
//!
//! Typed `Track` and `Playlist` documents plus the untyped value universe
//! they are validated against and projected into.

mod fields;
mod playlist;
mod track;
mod value;

pub use fields::{FieldKind, PlaylistField, TrackField};
pub use playlist::{is_playlist_instance, Playlist, PlaylistDate, PlaylistInit, LOAD_SUCCESS_MESSAGE};
pub use track::{is_track_instance, Track, TrackEntry, TrackInit};
pub use value::{record, Record, Value};
