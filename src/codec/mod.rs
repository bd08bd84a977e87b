//! Canonical binary codec
//!
//! DAG-CBOR through `serde_ipld_dagcbor`, so equal playlists always
//! produce identical bytes. The same [`CodecConfig`] limits are checked
//! on both sides: anything [`encode_with`] accepts, [`decode_with`]
//! accepts back under the same configuration.

mod canonical;
mod config;
mod limits;

pub use config::CodecConfig;

use crate::error::{DecodeError, EncodeError};
use crate::model::Value;
use canonical::Canonical;

/// Encode a value under the default limits
pub fn encode(value: &Value) -> Result<Vec<u8>, EncodeError> {
    encode_with(value, &CodecConfig::default())
}

/// Encode a value into canonical bytes
///
/// Integral numbers become integers, other numbers become 64-bit floats
/// and map keys are ordered by length, then bytewise. Non-finite numbers
/// and values past the configured limits are rejected before any bytes
/// are written.
pub fn encode_with(value: &Value, config: &CodecConfig) -> Result<Vec<u8>, EncodeError> {
    limits::check(value, config)?;
    serde_ipld_dagcbor::to_vec(&Canonical(value)).map_err(|e| EncodeError::Cbor(e.to_string()))
}

/// Decode bytes under the default limits
pub fn decode(bytes: &[u8]) -> Result<Value, DecodeError> {
    decode_with(bytes, &CodecConfig::default())
}

/// Decode exactly one value from `bytes`
///
/// Trailing bytes, duplicate map keys and non-finite numbers are errors.
pub fn decode_with(bytes: &[u8], config: &CodecConfig) -> Result<Value, DecodeError> {
    let value: Value =
        serde_ipld_dagcbor::from_slice(bytes).map_err(|e| DecodeError::Cbor(e.to_string()))?;
    limits::check(&value, config)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record;

    fn nested_arrays(depth: usize) -> Value {
        (0..depth).fold(Value::Null, |inner, _| Value::Array(vec![inner]))
    }

    #[test]
    fn test_small_integers_inline() {
        assert_eq!(encode(&Value::Number(0.0)).unwrap(), vec![0x00]);
        assert_eq!(encode(&Value::Number(23.0)).unwrap(), vec![0x17]);
        assert_eq!(encode(&Value::Number(24.0)).unwrap(), vec![0x18, 0x18]);
        assert_eq!(encode(&Value::Number(-1.0)).unwrap(), vec![0x20]);
        assert_eq!(encode(&Value::Number(1000.0)).unwrap(), vec![0x19, 0x03, 0xe8]);
        assert_eq!(encode(&Value::Number(-0.0)).unwrap(), vec![0x00]);
    }

    #[test]
    fn test_fractional_numbers_use_float64() {
        let encoded = encode(&Value::Number(1.5)).unwrap();
        assert_eq!(encoded[0], 0xfb);
        assert_eq!(&encoded[1..], &1.5f64.to_be_bytes());
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(matches!(
            encode(&Value::Number(f64::NAN)),
            Err(EncodeError::NonFiniteNumber(_))
        ));
        assert!(encode(&Value::Array(vec![Value::Number(f64::INFINITY)])).is_err());
    }

    #[test]
    fn test_map_keys_length_first() {
        // BTreeMap order would put "aa" before "b"; canonical order is "b" first
        let value = Value::Record(record([("aa", Value::Null), ("b", Value::Null)]));
        let encoded = encode(&value).unwrap();
        assert_eq!(encoded, vec![0xa2, 0x61, b'b', 0xf6, 0x62, b'a', b'a', 0xf6]);
    }

    #[test]
    fn test_round_trip_mixed_value() {
        let value = Value::Record(record([
            ("title", Value::from("Hello")),
            ("n", Value::Number(-42.0)),
            ("f", Value::Number(0.25)),
            ("raw", Value::Bytes(vec![0, 1, 2, 255])),
            ("list", Value::Array(vec![Value::Bool(true), Value::Null])),
            ("nested", Value::Record(record([("k", Value::from("v"))]))),
        ]));

        let decoded = decode(&encode(&value).unwrap()).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn test_truncated_input() {
        // text of length 5 with only two bytes present
        assert!(matches!(decode(&[0x65, b'a', b'b']), Err(DecodeError::Cbor(_))));
        assert!(decode(&[]).is_err());
    }

    #[test]
    fn test_json_text_is_not_cbor() {
        assert!(decode(br#"{"track":null}"#).is_err());
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        assert!(decode(&[0x01, 0x02]).is_err());
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let bytes = [0xa2, 0x61, b'a', 0x01, 0x61, b'a', 0x02];
        assert!(decode(&bytes).is_err());
    }

    #[test]
    fn test_long_strings_are_not_item_limited() {
        let config = CodecConfig::default().with_max_items(4);
        let value = Value::from("x".repeat(64));

        let bytes = encode_with(&value, &config).unwrap();
        assert_eq!(decode_with(&bytes, &config).unwrap(), value);
    }

    #[test]
    fn test_depth_limit_applies_to_both_sides() {
        let config = CodecConfig::default().with_max_depth(2);

        assert!(encode_with(&nested_arrays(2), &config).is_ok());
        assert_eq!(
            encode_with(&nested_arrays(3), &config),
            Err(EncodeError::TooDeep { limit: 2 })
        );

        let bytes = encode(&nested_arrays(3)).unwrap();
        assert_eq!(decode_with(&bytes, &config), Err(DecodeError::TooDeep { limit: 2 }));
    }

    #[test]
    fn test_item_limit_applies_to_both_sides() {
        let config = CodecConfig::default().with_max_items(2);
        let value = Value::Array(vec![Value::Null; 3]);

        assert_eq!(
            encode_with(&value, &config),
            Err(EncodeError::TooLarge { len: 3, limit: 2 })
        );

        let bytes = encode(&value).unwrap();
        assert_eq!(
            decode_with(&bytes, &config),
            Err(DecodeError::TooLarge { len: 3, limit: 2 })
        );
    }
}
