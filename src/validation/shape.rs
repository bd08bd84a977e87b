//! Shape predicates for untyped track and playlist records
//!
//! All predicates are pure and never panic: anything that does not match
//! yields `false`.

use crate::model::{FieldKind, PlaylistField, TrackField, Value};
use chrono::{DateTime, NaiveDate};

/// How missing fields are treated when checking a shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapePolicy {
    /// Every field must be present and well-typed
    Strict,
    /// Fields may be absent; present ones must be well-typed
    Partial,
}

pub fn is_string(value: &Value) -> bool {
    matches!(value, Value::String(_))
}

/// Numbers excluding `NaN` and the infinities
pub fn is_finite_number(value: &Value) -> bool {
    matches!(value, Value::Number(n) if n.is_finite())
}

pub fn is_plain_record(value: &Value) -> bool {
    matches!(value, Value::Record(_))
}

/// Array whose every element is a plain record
pub fn is_record_array(value: &Value) -> bool {
    matches!(value, Value::Array(items) if items.iter().all(is_plain_record))
}

/// A string holding an ISO-8601 calendar date or an RFC 3339 timestamp
pub fn is_date_like(value: &Value) -> bool {
    match value {
        Value::String(s) => {
            NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
                || DateTime::parse_from_rfc3339(s).is_ok()
        }
        _ => false,
    }
}

/// Check one field value against its expected kind
pub fn is_field_value(kind: FieldKind, value: &Value, policy: ShapePolicy) -> bool {
    match kind {
        FieldKind::Text => is_string(value),
        FieldKind::Number => is_finite_number(value),
        FieldKind::RecordArray => is_record_array(value),
        FieldKind::Record => is_plain_record(value),
        // free text; `is_date_like` is a standalone check, not a constraint
        FieldKind::Date => is_string(value),
        FieldKind::Tracks => matches!(
            value,
            Value::Array(items) if items.iter().all(|item| is_track_shape(item, policy))
        ),
    }
}

fn check_fields<I>(value: &Value, fields: I, policy: ShapePolicy) -> bool
where
    I: IntoIterator<Item = (&'static str, FieldKind)>,
{
    let Value::Record(record) = value else {
        return false;
    };

    fields
        .into_iter()
        .all(|(name, kind)| match record.get(name) {
            Some(field) => is_field_value(kind, field, policy),
            None => policy == ShapePolicy::Partial,
        })
}

/// Does `value` look like a track record?
pub fn is_track_shape(value: &Value, policy: ShapePolicy) -> bool {
    check_fields(
        value,
        TrackField::ALL.iter().map(|f| (f.name(), f.kind())),
        policy,
    )
}

/// Does `value` look like a playlist record, tracks included?
pub fn is_playlist_shape(value: &Value, policy: ShapePolicy) -> bool {
    check_fields(
        value,
        PlaylistField::ALL.iter().map(|f| (f.name(), f.kind())),
        policy,
    )
}
