//! Structural limits shared by the encoder and the decoder

use super::CodecConfig;
use crate::error::{DecodeError, EncodeError};
use crate::model::Value;

/// Why a value cannot cross the codec
#[derive(Debug)]
pub(super) enum Violation {
    NonFinite(f64),
    TooDeep { limit: usize },
    TooLarge { len: usize, limit: usize },
}

impl From<Violation> for EncodeError {
    fn from(violation: Violation) -> Self {
        match violation {
            Violation::NonFinite(n) => EncodeError::NonFiniteNumber(n),
            Violation::TooDeep { limit } => EncodeError::TooDeep { limit },
            Violation::TooLarge { len, limit } => EncodeError::TooLarge { len, limit },
        }
    }
}

impl From<Violation> for DecodeError {
    fn from(violation: Violation) -> Self {
        match violation {
            Violation::NonFinite(n) => DecodeError::NonFiniteNumber(n),
            Violation::TooDeep { limit } => DecodeError::TooDeep { limit },
            Violation::TooLarge { len, limit } => DecodeError::TooLarge { len, limit },
        }
    }
}

/// Walk `value` and check numbers, nesting and collection sizes
pub(super) fn check(value: &Value, config: &CodecConfig) -> Result<(), Violation> {
    check_at(value, config, 0)
}

fn check_at(value: &Value, config: &CodecConfig, depth: usize) -> Result<(), Violation> {
    match value {
        Value::Number(n) if !n.is_finite() => Err(Violation::NonFinite(*n)),
        Value::Array(items) => {
            enter(depth, items.len(), config)?;
            items
                .iter()
                .try_for_each(|item| check_at(item, config, depth + 1))
        }
        Value::Record(record) => {
            enter(depth, record.len(), config)?;
            record
                .values()
                .try_for_each(|item| check_at(item, config, depth + 1))
        }
        _ => Ok(()),
    }
}

fn enter(depth: usize, len: usize, config: &CodecConfig) -> Result<(), Violation> {
    if depth >= config.max_depth {
        return Err(Violation::TooDeep {
            limit: config.max_depth,
        });
    }
    if len > config.max_items {
        return Err(Violation::TooLarge {
            len,
            limit: config.max_items,
        });
    }
    Ok(())
}
