//! Raw string → typed [`Value`] conversion, one rule per [`FieldKind`].

use std::num::{IntErrorKind, ParseIntError};

use thiserror::Error;

use crate::duration::{self, DurationError};
use crate::types::{FieldKind, Value};

/// Why a raw value could not be converted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoerceError {
    #[error("{value:?} is not a valid integer: {source}")]
    InvalidInt {
        value: String,
        source: ParseIntError,
    },

    #[error("{value:?} does not fit in {bits} bits")]
    OutOfRange { value: String, bits: u32 },

    #[error("{0:?} is not a valid boolean")]
    InvalidBool(String),

    #[error("{value:?}: {source}")]
    InvalidDuration {
        value: String,
        source: DurationError,
    },

    #[error("value is not valid unicode")]
    NotUnicode,

    #[error("unsupported field kind: {0}")]
    UnsupportedKind(FieldKind),
}

/// Convert `raw` according to `kind`.
pub fn coerce(raw: &str, kind: &FieldKind) -> Result<Value, CoerceError> {
    if kind.check().is_err() {
        return Err(CoerceError::UnsupportedKind(kind.clone()));
    }
    match kind {
        FieldKind::String => Ok(Value::String(raw.to_string())),
        FieldKind::Int { bits } => parse_int(raw, *bits).map(Value::Int),
        FieldKind::Bool => parse_bool(raw).map(Value::Bool),
        FieldKind::Duration => duration::parse_duration(raw)
            .map(Value::Duration)
            .map_err(|source| CoerceError::InvalidDuration {
                value: raw.to_string(),
                source,
            }),
        FieldKind::StringList => Ok(Value::StringList(split_list(raw))),
        FieldKind::Optional(inner) => coerce(raw, inner).map(|v| Value::Some(Box::new(v))),
    }
}

/// Base-10 signed integer that fits in `bits` bits.
fn parse_int(raw: &str, bits: u32) -> Result<i64, CoerceError> {
    let n: i64 = raw.parse().map_err(|source: ParseIntError| match source.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => CoerceError::OutOfRange {
            value: raw.to_string(),
            bits,
        },
        _ => CoerceError::InvalidInt {
            value: raw.to_string(),
            source,
        },
    })?;
    let max = i64::MAX >> (64 - bits);
    let min = -max - 1;
    if n < min || n > max {
        return Err(CoerceError::OutOfRange {
            value: raw.to_string(),
            bits,
        });
    }
    Ok(n)
}

/// Accepts the conventional literals only; `yes`/`on` and mixed case such as
/// `tRUE` are rejected.
fn parse_bool(raw: &str) -> Result<bool, CoerceError> {
    match raw {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
        _ => Err(CoerceError::InvalidBool(raw.to_string())),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',').map(|s| s.trim().to_string()).collect()
}
