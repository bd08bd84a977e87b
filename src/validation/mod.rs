//! Validation utilities
//!
//! Shape predicates gate every conversion from untyped data into the
//! model; the equality engine backs track comparison.

mod equality;
mod shape;

pub use equality::{equal_arrays, equal_record_lists, equal_records, equal_values};
pub use shape::{
    is_date_like, is_field_value, is_finite_number, is_plain_record, is_playlist_shape,
    is_record_array, is_string, is_track_shape, ShapePolicy,
};
