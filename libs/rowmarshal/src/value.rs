use std::borrow::Cow;
use std::fmt;

/// Runtime value of one cell, as delivered by a row source.
///
/// - Scalars (Int64, Float64, Bool): copied out of the driver, cost ~0
/// - Text, Bytes: `Cow` (zero-copy when the row source can lend its buffer)
/// - Null: SQL NULL, distinct from every zero value
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    Int64(i64),
    Text(Cow<'a, str>),
    Float64(f64),
    Bool(bool),
    /// Opaque binary data, not necessarily UTF-8.
    Bytes(Cow<'a, [u8]>),
    Null,
}

impl<'a> Value<'a> {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Int64(_) => ValueKind::Int64,
            Value::Text(_) => ValueKind::Text,
            Value::Float64(_) => ValueKind::Float64,
            Value::Bool(_) => ValueKind::Bool,
            Value::Bytes(_) => ValueKind::Bytes,
            Value::Null => ValueKind::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Borrow this value without copying text or bytes.
    pub fn reborrow(&self) -> Value<'_> {
        match self {
            Value::Int64(v) => Value::Int64(*v),
            Value::Text(v) => Value::Text(Cow::Borrowed(v.as_ref())),
            Value::Float64(v) => Value::Float64(*v),
            Value::Bool(v) => Value::Bool(*v),
            Value::Bytes(v) => Value::Bytes(Cow::Borrowed(v.as_ref())),
            Value::Null => Value::Null,
        }
    }

    /// Detach from the row source buffer.
    pub fn into_owned(self) -> Value<'static> {
        match self {
            Value::Int64(v) => Value::Int64(v),
            Value::Text(v) => Value::Text(Cow::Owned(v.into_owned())),
            Value::Float64(v) => Value::Float64(v),
            Value::Bool(v) => Value::Bool(v),
            Value::Bytes(v) => Value::Bytes(Cow::Owned(v.into_owned())),
            Value::Null => Value::Null,
        }
    }
}

impl From<i64> for Value<'_> {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<f64> for Value<'_> {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<bool> for Value<'_> {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(v: &'a str) -> Self {
        Value::Text(Cow::Borrowed(v))
    }
}

impl From<String> for Value<'_> {
    fn from(v: String) -> Self {
        Value::Text(Cow::Owned(v))
    }
}

impl<'a> From<&'a [u8]> for Value<'a> {
    fn from(v: &'a [u8]) -> Self {
        Value::Bytes(Cow::Borrowed(v))
    }
}

impl From<Vec<u8>> for Value<'_> {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(Cow::Owned(v))
    }
}

impl<'a, T: Into<Value<'a>>> From<Option<T>> for Value<'a> {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Tag of a [`Value`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Int64,
    Text,
    Float64,
    Bool,
    Bytes,
    Null,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Int64 => write!(f, "int64"),
            ValueKind::Text => write!(f, "text"),
            ValueKind::Float64 => write!(f, "float64"),
            ValueKind::Bool => write!(f, "bool"),
            ValueKind::Bytes => write!(f, "bytes"),
            ValueKind::Null => write!(f, "null"),
        }
    }
}

/// Positional array of values for one row. Order matches the row source columns.
///
/// Values only, no names or types: all metadata lives in the `BindingPlan`.
#[derive(Debug, Clone, PartialEq)]
pub struct Row<'a>(pub Vec<Value<'a>>);
