use crate::{
    model::RecordModel,
    value::{Value, ValueTypeError},
};
use std::fmt::Debug;
use thiserror::Error as ThisError;

///
/// FieldWriteError
///
/// A named-value assignment onto a record failed: either the name matches
/// no field, or the value cannot coerce into the field's type. Both are
/// data-integrity failures and are surfaced, never swallowed.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum FieldWriteError {
    #[error("no field named '{field}'")]
    UnknownField { field: String },

    #[error("field '{field}': {source}")]
    Mismatch {
        field: String,
        #[source]
        source: ValueTypeError,
    },
}

impl FieldWriteError {
    #[must_use]
    pub fn unknown(field: impl Into<String>) -> Self {
        Self::UnknownField {
            field: field.into(),
        }
    }

    #[must_use]
    pub fn mismatch(field: impl Into<String>, source: ValueTypeError) -> Self {
        Self::Mismatch {
            field: field.into(),
            source,
        }
    }
}

///
/// Fields
///
/// A record-shaped value: named fields readable as [`Value`] cells. This is
/// the minimum contract a partial-change type needs; full records layer
/// [`Record`] on top.
///

pub trait Fields {
    /// Field names in declaration order.
    fn field_names(&self) -> &'static [&'static str];

    /// Read one field by name; `None` when the name matches no field.
    fn field_value(&self, field: &str) -> Option<Value>;
}

///
/// Record
///
/// A fully mapped record type: a static [`RecordModel`] plus read/write
/// field access by name. Implemented via `#[derive(Record)]`; the derive
/// also consumes the `#[record(key)]`, `#[record(generated)]`, and
/// `#[record(store = "...")]` markers.
///
/// Field-name matching on writes is ASCII case-insensitive, since names
/// arrive from backend column metadata.
///

pub trait Record: Fields + Clone + Debug + Default + PartialEq + Sized + 'static {
    const MODEL: &'static RecordModel;

    fn set_field_value(&mut self, field: &str, value: Value) -> Result<(), FieldWriteError>;
}
