//! Error types for the CSPF model and codec

use thiserror::Error;

/// Result type alias using [`CspfError`]
pub type Result<T> = std::result::Result<T, CspfError>;

/// Errors raised at the model's trust boundaries
///
/// Guarded setters never produce these; they report rejection with `false`.
#[derive(Debug, Error)]
pub enum CspfError {
    /// A raw track shape failed strict validation
    #[error("Track payload is not parsable")]
    TrackNotParsable,

    /// Decoded bytes are well-formed CBOR but not a playlist shape
    #[error("Object stored in payload is not a CSPF playlist")]
    NotAPlaylist,

    /// An initializer carried a value the field cannot hold
    #[error("invalid value for field `{field}`")]
    InvalidField { field: &'static str },

    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),

    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
}

/// Failures while writing canonical bytes
#[derive(Debug, Error, PartialEq)]
pub enum EncodeError {
    #[error("non-finite number {0} cannot be encoded")]
    NonFiniteNumber(f64),

    #[error("nesting deeper than {limit} levels")]
    TooDeep { limit: usize },

    #[error("collection of {len} items exceeds limit of {limit}")]
    TooLarge { len: usize, limit: usize },

    #[error("CBOR serialization failed: {0}")]
    Cbor(String),
}

/// Failures while reading bytes
#[derive(Debug, Error, PartialEq)]
pub enum DecodeError {
    /// Not a single well-formed DAG-CBOR value
    #[error("malformed CBOR: {0}")]
    Cbor(String),

    #[error("non-finite number {0} in payload")]
    NonFiniteNumber(f64),

    #[error("nesting deeper than {limit} levels")]
    TooDeep { limit: usize },

    #[error("collection of {len} items exceeds limit of {limit}")]
    TooLarge { len: usize, limit: usize },
}
