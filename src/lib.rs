//! CSPF - validated playlist model with a canonical binary form
//!
//! This library models a CSPF playlist document and its tracks, guards
//! every mutation, and round-trips documents through deterministic CBOR.

pub mod codec;
pub mod error;
pub mod model;
pub mod validation;

pub use codec::CodecConfig;
pub use error::{CspfError, DecodeError, EncodeError, Result};
pub use model::{Playlist, PlaylistDate, PlaylistInit, Record, Track, TrackEntry, TrackInit, Value};
