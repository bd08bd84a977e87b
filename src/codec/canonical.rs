//! Canonical serialization order for [`Value`]

use crate::model::Value;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// Exclusive upper bound of the CBOR unsigned integer range
const U64_LIMIT: f64 = 18_446_744_073_709_551_616.0;

/// Serializes a value with DAG-CBOR's number and key-order rules
///
/// Numbers must already be finite.
pub(super) struct Canonical<'a>(pub &'a Value);

impl Serialize for Canonical<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Value::Number(n) => serialize_number(*n, serializer),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(&Canonical(item))?;
                }
                seq.end()
            }
            Value::Record(record) => {
                // BTreeMap iterates bytewise; a stable sort by length gives length-first order
                let mut entries: Vec<_> = record.iter().collect();
                entries.sort_by_key(|(key, _)| key.len());

                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, &Canonical(value))?;
                }
                map.end()
            }
            other => other.serialize(serializer),
        }
    }
}

fn serialize_number<S: Serializer>(n: f64, serializer: S) -> Result<S::Ok, S::Error> {
    if n.fract() == 0.0 {
        if (0.0..U64_LIMIT).contains(&n) {
            return serializer.serialize_u64(n as u64);
        }
        if (i64::MIN as f64..0.0).contains(&n) {
            return serializer.serialize_i64(n as i64);
        }
    }
    serializer.serialize_f64(n)
}
