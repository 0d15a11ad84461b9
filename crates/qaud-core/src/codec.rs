//! Row codec: the bidirectional mapping between typed records and untyped
//! rows, plus partial application of sparse change sets.

use crate::{
    descriptor::TypeDescriptor, error::StoreError, patch::ChangeSet, row::Row, traits::Record,
};

/// Read every descriptor-named field of `record` into a row.
///
/// Fields the record cannot produce are omitted, not nulled.
#[must_use]
pub fn to_row<T: Record>(record: &T) -> Row {
    let descriptor = TypeDescriptor::resolve::<T>();
    let mut row = Row::new();

    for field in descriptor.all_fields() {
        if let Some(value) = record.field_value(field.name) {
            row.set(field.name, value);
        }
    }

    row
}

/// Assign every named value in `row` onto `record`, in place.
///
/// A name with no matching field is `UnknownRowField` — silently ignoring
/// it would hide typos in backend-returned column names. A null marker
/// assigns the field's default representation.
pub fn hydrate<T: Record>(record: &mut T, row: &Row) -> Result<(), StoreError> {
    for (name, value) in row.entries() {
        record
            .set_field_value(name, value.clone())
            .map_err(|err| StoreError::from_field_write(T::MODEL.type_name, err))?;
    }

    Ok(())
}

/// Merge a sparse change set onto a fully loaded record, leaving fields the
/// set does not name untouched.
pub fn apply_partial<T: Record>(record: &mut T, changes: &ChangeSet) -> Result<(), StoreError> {
    hydrate(record, changes.row())
}

///
/// TESTS
///
