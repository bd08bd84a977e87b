//! Structural deep equality over the value universe

use crate::model::{Record, Value};

/// Order-sensitive element-wise equality
pub fn equal_arrays(left: &[Value], right: &[Value]) -> bool {
    left.len() == right.len()
        && left
            .iter()
            .zip(right)
            .all(|(a, b)| equal_values(a, b))
}

/// Same key set and pairwise-equal values; key order is irrelevant
pub fn equal_records(left: &Record, right: &Record) -> bool {
    left.len() == right.len()
        && left.iter().all(|(key, value)| {
            right
                .get(key)
                .is_some_and(|other| equal_values(value, other))
        })
}

/// Deep equality for any two values
///
/// Numbers use IEEE comparison, so `NaN` never equals itself. Values of
/// different kinds are never equal.
pub fn equal_values(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Array(a), Value::Array(b)) => equal_arrays(a, b),
        (Value::Record(a), Value::Record(b)) => equal_records(a, b),
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Bytes(a), Value::Bytes(b)) => a == b,
        _ => false,
    }
}

/// Element-wise [`equal_records`] over two record lists
pub fn equal_record_lists(left: &[Record], right: &[Record]) -> bool {
    left.len() == right.len()
        && left
            .iter()
            .zip(right)
            .all(|(a, b)| equal_records(a, b))
}
