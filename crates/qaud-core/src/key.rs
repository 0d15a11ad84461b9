use crate::{
    descriptor::TypeDescriptor,
    error::StoreError,
    row::Row,
    traits::Record,
    value::Value,
};
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// Key
///
/// A record's identity: an ordered tuple of values, one per key field, in
/// the type descriptor's key order. Arity must match the descriptor's
/// key-field count — a mismatch is a contract violation, never a silent
/// truncation. Composite keys are legal; tuple order tracks field order so
/// positional parameter binding stays deterministic.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Key(Vec<Value>);

impl Key {
    #[must_use]
    pub fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    #[must_use]
    pub fn single(value: impl Into<Value>) -> Self {
        Self(vec![value.into()])
    }

    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.0
    }

    #[must_use]
    pub fn arity(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render the tuple as one delimited string (keyed-map addressing,
    /// document-session ids).
    #[must_use]
    pub fn joined(&self, delimiter: &str) -> String {
        self.0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(delimiter)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.joined(", "))
    }
}

impl From<Vec<Value>> for Key {
    fn from(values: Vec<Value>) -> Self {
        Self(values)
    }
}

impl FromIterator<Value> for Key {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Extract a record's key, in descriptor key order.
///
/// A type with zero key fields cannot be addressed; that is `MissingKey`.
pub fn key_of<T: Record>(record: &T) -> Result<Key, StoreError> {
    let descriptor = TypeDescriptor::resolve::<T>();

    if !descriptor.has_key() {
        return Err(StoreError::missing_key(descriptor.type_name()));
    }

    let values = descriptor
        .key_fields()
        .iter()
        .map(|field| record.field_value(field.name).unwrap_or(Value::Null))
        .collect();

    Ok(Key(values))
}

/// Extract a key from a row (typically a partial-change set), which must
/// carry every key field of the descriptor.
pub fn key_of_row(descriptor: &TypeDescriptor, row: &Row) -> Result<Key, StoreError> {
    if !descriptor.has_key() {
        return Err(StoreError::missing_key(descriptor.type_name()));
    }

    let mut values = Vec::with_capacity(descriptor.key_arity());
    for field in descriptor.key_fields() {
        match row.get(field.name) {
            Some(value) => values.push(value.clone()),
            None => return Err(StoreError::missing_key(descriptor.type_name())),
        }
    }

    Ok(Key(values))
}

/// Key-field count for `T`.
#[must_use]
pub fn arity_of<T: Record>() -> usize {
    TypeDescriptor::resolve::<T>().key_arity()
}

/// Reject a key whose arity disagrees with the descriptor.
pub fn ensure_arity(descriptor: &TypeDescriptor, key: &Key) -> Result<(), StoreError> {
    if !descriptor.has_key() {
        return Err(StoreError::missing_key(descriptor.type_name()));
    }

    if key.arity() != descriptor.key_arity() {
        return Err(StoreError::KeyArityMismatch {
            type_name: descriptor.type_name(),
            expected: descriptor.key_arity(),
            found: key.arity(),
        });
    }

    Ok(())
}

///
/// TESTS
///
