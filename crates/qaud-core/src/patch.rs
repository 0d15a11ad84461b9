use crate::{row::Row, traits::Fields, value::Value};

///
/// ChangeSet
///
/// A sparse set of named changes for one record, normalized to a [`Row`].
/// Built either from a raw row or from any record-shaped partial type; both
/// forms share the internal representation, so adapters handle one shape.
/// A change set is expected to carry the key fields of its target — key
/// extraction fails at the point of use otherwise.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChangeSet(Row);

impl ChangeSet {
    #[must_use]
    pub fn from_row(row: Row) -> Self {
        Self(row)
    }

    /// Coerce a typed partial (any [`Fields`] value) into a change set.
    /// Every field the partial declares is included.
    #[must_use]
    pub fn from_partial<F: Fields>(partial: &F) -> Self {
        let mut row = Row::new();

        for name in partial.field_names() {
            if let Some(value) = partial.field_value(name) {
                row.set(*name, value);
            }
        }

        Self(row)
    }

    /// Builder-style single-change entry.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: Value) -> Self {
        self.0.set(name, value);
        self
    }

    #[must_use]
    pub const fn row(&self) -> &Row {
        &self.0
    }

    #[must_use]
    pub fn into_row(self) -> Row {
        self.0
    }
}

impl From<Row> for ChangeSet {
    fn from(row: Row) -> Self {
        Self(row)
    }
}

///
/// TESTS
///
