use crate::{row::Row, types::Timestamp};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error as ThisError;

///
/// Value
///
/// The untyped cell of a [`Row`]: a null marker, a whitelisted scalar, or a
/// nested structure. Only scalars participate in statement synthesis; nested
/// values exist for backends that store structured documents.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Text(String),
    Timestamp(Timestamp),
    List(Vec<Value>),
    Document(Row),
}

impl Value {
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Uint(_) => ValueKind::Uint,
            Self::Float(_) => ValueKind::Float,
            Self::Text(_) => ValueKind::Text,
            Self::Timestamp(_) => ValueKind::Timestamp,
            Self::List(_) => ValueKind::List,
            Self::Document(_) => ValueKind::Document,
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Whitelisted for relational statement synthesis: numeric primitives,
    /// date/time, and text.
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(
            self,
            Self::Bool(_)
                | Self::Int(_)
                | Self::Uint(_)
                | Self::Float(_)
                | Self::Text(_)
                | Self::Timestamp(_)
        )
    }

    #[must_use]
    pub const fn is_complex(&self) -> bool {
        matches!(self, Self::List(_) | Self::Document(_))
    }

    /// Text length used for variable-length parameter sizing, if textual.
    #[must_use]
    pub fn text_len(&self) -> Option<usize> {
        match self {
            Self::Text(text) => Some(text.len()),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Uint(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
            Self::Timestamp(v) => write!(f, "{v}"),
            Self::List(_) => f.write_str("<list>"),
            Self::Document(_) => f.write_str("<document>"),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::Uint(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Timestamp> for Value {
    fn from(v: Timestamp) -> Self {
        Self::Timestamp(v)
    }
}

///
/// ValueKind
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum ValueKind {
    #[display("null")]
    Null,
    #[display("bool")]
    Bool,
    #[display("int")]
    Int,
    #[display("uint")]
    Uint,
    #[display("float")]
    Float,
    #[display("text")]
    Text,
    #[display("timestamp")]
    Timestamp,
    #[display("list")]
    List,
    #[display("document")]
    Document,
}

impl ValueKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Uint => "uint",
            Self::Float => "float",
            Self::Text => "text",
            Self::Timestamp => "timestamp",
            Self::List => "list",
            Self::Document => "document",
        }
    }
}

///
/// ValueTypeError
///
/// A value could not be coerced into the shape a field requires.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("expected {expected}, found {found}")]
pub struct ValueTypeError {
    pub expected: &'static str,
    pub found: &'static str,
}

impl ValueTypeError {
    #[must_use]
    pub const fn new(expected: &'static str, found: ValueKind) -> Self {
        Self {
            expected,
            found: found.as_str(),
        }
    }
}

///
/// FieldValue
///
/// Bidirectional conversion between a typed field and its [`Value`] cell.
/// `from_value` accepts only lossless numeric coercions; a null marker
/// assigns the field's default representation.
///

pub trait FieldValue: Sized {
    fn to_value(&self) -> Value;

    fn from_value(value: Value) -> Result<Self, ValueTypeError>;
}

macro_rules! impl_signed_field_value {
    ($($ty:ty),*) => {$(
        impl FieldValue for $ty {
            fn to_value(&self) -> Value {
                Value::Int(i64::from(*self))
            }

            fn from_value(value: Value) -> Result<Self, ValueTypeError> {
                match value {
                    Value::Null => Ok(0),
                    Value::Int(v) => {
                        Self::try_from(v).map_err(|_| ValueTypeError::new(stringify!($ty), ValueKind::Int))
                    }
                    Value::Uint(v) => {
                        Self::try_from(v).map_err(|_| ValueTypeError::new(stringify!($ty), ValueKind::Uint))
                    }
                    other => Err(ValueTypeError::new(stringify!($ty), other.kind())),
                }
            }
        }
    )*};
}

macro_rules! impl_unsigned_field_value {
    ($($ty:ty),*) => {$(
        impl FieldValue for $ty {
            fn to_value(&self) -> Value {
                Value::Uint(u64::from(*self))
            }

            fn from_value(value: Value) -> Result<Self, ValueTypeError> {
                match value {
                    Value::Null => Ok(0),
                    Value::Uint(v) => {
                        Self::try_from(v).map_err(|_| ValueTypeError::new(stringify!($ty), ValueKind::Uint))
                    }
                    Value::Int(v) => {
                        Self::try_from(v).map_err(|_| ValueTypeError::new(stringify!($ty), ValueKind::Int))
                    }
                    other => Err(ValueTypeError::new(stringify!($ty), other.kind())),
                }
            }
        }
    )*};
}

impl_signed_field_value!(i8, i16, i32, i64);
impl_unsigned_field_value!(u8, u16, u32, u64);

impl FieldValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_value(value: Value) -> Result<Self, ValueTypeError> {
        match value {
            Value::Null => Ok(false),
            Value::Bool(v) => Ok(v),
            other => Err(ValueTypeError::new("bool", other.kind())),
        }
    }
}

impl FieldValue for f32 {
    fn to_value(&self) -> Value {
        Value::Float(f64::from(*self))
    }

    fn from_value(value: Value) -> Result<Self, ValueTypeError> {
        match value {
            Value::Null => Ok(0.0),
            #[allow(clippy::cast_possible_truncation)]
            Value::Float(v) => Ok(v as Self),
            other => Err(ValueTypeError::new("f32", other.kind())),
        }
    }
}

impl FieldValue for f64 {
    fn to_value(&self) -> Value {
        Value::Float(*self)
    }

    fn from_value(value: Value) -> Result<Self, ValueTypeError> {
        match value {
            Value::Null => Ok(0.0),
            Value::Float(v) => Ok(v),
            other => Err(ValueTypeError::new("f64", other.kind())),
        }
    }
}

impl FieldValue for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }

    fn from_value(value: Value) -> Result<Self, ValueTypeError> {
        match value {
            Value::Null => Ok(Self::new()),
            Value::Text(v) => Ok(v),
            other => Err(ValueTypeError::new("text", other.kind())),
        }
    }
}

impl FieldValue for Timestamp {
    fn to_value(&self) -> Value {
        Value::Timestamp(*self)
    }

    fn from_value(value: Value) -> Result<Self, ValueTypeError> {
        match value {
            Value::Null => Ok(Self::UNIX_EPOCH),
            Value::Timestamp(v) => Ok(v),
            // relational backends commonly surface timestamps as raw nanos
            Value::Int(v) => Ok(Self::from_unix_nanos(v)),
            other => Err(ValueTypeError::new("timestamp", other.kind())),
        }
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(inner) => inner.to_value(),
            None => Value::Null,
        }
    }

    fn from_value(value: Value) -> Result<Self, ValueTypeError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(FieldValue::to_value).collect())
    }

    fn from_value(value: Value) -> Result<Self, ValueTypeError> {
        match value {
            Value::Null => Ok(Self::new()),
            Value::List(items) => items.into_iter().map(T::from_value).collect(),
            other => Err(ValueTypeError::new("list", other.kind())),
        }
    }
}

///
/// TESTS
///
