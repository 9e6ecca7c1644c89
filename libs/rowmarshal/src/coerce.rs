//! Cell → base type conversion.
//!
//! | from \ to | int64          | string        | float64       | bool        | bytes    |
//! |-----------|----------------|---------------|---------------|-------------|----------|
//! | int64     | identity       | decimal text  | exact widen   | nonzero     | -        |
//! | text      | parse          | identity      | parse         | -           | -        |
//! | float64   | integral only  | formatted     | identity      | -           | -        |
//! | bool      | 0 / 1          | "true"/"false"| 0.0 / 1.0     | identity    | -        |
//! | bytes     | -              | UTF-8 decode  | -             | -           | identity |
//!
//! NULL is not handled here: it never reaches a base type (see `slot`).

use crate::error::ConversionError;
use crate::schema::BaseType;
use crate::value::{Value, ValueKind};

/// A base type that cells can be converted into.
pub trait Coerce: Sized {
    const BASE: BaseType;

    fn coerce(value: Value<'_>) -> Result<Self, ConversionError>;
}

// 2^63 as f64; every f64 in [-2^63, 2^63) fits an i64.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

impl Coerce for i64 {
    const BASE: BaseType = BaseType::Int64;

    fn coerce(value: Value<'_>) -> Result<Self, ConversionError> {
        match value {
            Value::Int64(v) => Ok(v),
            Value::Text(s) => s
                .parse::<i64>()
                .map_err(|_| ConversionError::malformed(Self::BASE, &s)),
            Value::Float64(f) => {
                if f.is_finite() && f.fract() == 0.0 && (-I64_BOUND..I64_BOUND).contains(&f) {
                    Ok(f as i64)
                } else {
                    Err(ConversionError::precision_loss(ValueKind::Float64, Self::BASE))
                }
            }
            Value::Bool(b) => Ok(i64::from(b)),
            other => Err(ConversionError::unsupported(other.kind(), Self::BASE)),
        }
    }
}

impl Coerce for String {
    const BASE: BaseType = BaseType::String;

    fn coerce(value: Value<'_>) -> Result<Self, ConversionError> {
        match value {
            Value::Int64(v) => Ok(v.to_string()),
            Value::Text(s) => Ok(s.into_owned()),
            Value::Float64(f) => Ok(f.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            Value::Bytes(b) => String::from_utf8(b.into_owned())
                .map_err(|_| ConversionError::invalid_utf8(Self::BASE)),
            Value::Null => Err(ConversionError::unsupported(ValueKind::Null, Self::BASE)),
        }
    }
}

impl Coerce for f64 {
    const BASE: BaseType = BaseType::Float64;

    fn coerce(value: Value<'_>) -> Result<Self, ConversionError> {
        match value {
            Value::Int64(v) => {
                let f = v as f64;
                // i128 holds every integral f64 below 2^64 exactly.
                if f as i128 == i128::from(v) {
                    Ok(f)
                } else {
                    Err(ConversionError::precision_loss(ValueKind::Int64, Self::BASE))
                }
            }
            Value::Text(s) => s
                .parse::<f64>()
                .map_err(|_| ConversionError::malformed(Self::BASE, &s)),
            Value::Float64(f) => Ok(f),
            Value::Bool(b) => Ok(if b { 1.0 } else { 0.0 }),
            other => Err(ConversionError::unsupported(other.kind(), Self::BASE)),
        }
    }
}

impl Coerce for bool {
    const BASE: BaseType = BaseType::Bool;

    fn coerce(value: Value<'_>) -> Result<Self, ConversionError> {
        match value {
            Value::Int64(v) => Ok(v != 0),
            Value::Bool(b) => Ok(b),
            other => Err(ConversionError::unsupported(other.kind(), Self::BASE)),
        }
    }
}

impl Coerce for Vec<u8> {
    const BASE: BaseType = BaseType::Bytes;

    fn coerce(value: Value<'_>) -> Result<Self, ConversionError> {
        match value {
            Value::Bytes(b) => Ok(b.into_owned()),
            other => Err(ConversionError::unsupported(other.kind(), Self::BASE)),
        }
    }
}

/// Convert `value` into base type `T`.
pub fn coerce<T: Coerce>(value: Value<'_>) -> Result<T, ConversionError> {
    T::coerce(value)
}
