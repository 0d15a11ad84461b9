use crate::{
    codec::{hydrate, to_row},
    descriptor::TypeDescriptor,
    error::StoreError,
    key::{Key, ensure_arity, key_of},
    model::FieldKind,
    row::Row,
    store::{Capabilities, DataStore, Query},
    traits::Record,
    value::Value,
};
use std::marker::PhantomData;

///
/// TableDataStore
///
/// In-process tabular adapter: one row per record, whole rows stored, so
/// nested values survive round trips. A generated integer identity field is
/// assigned from a per-store counter during `add`.
///

pub struct TableDataStore<T: Record> {
    rows: Vec<Row>,
    descriptor: &'static TypeDescriptor,
    next_identity: i64,
    _marker: PhantomData<T>,
}

impl<T: Record> TableDataStore<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            descriptor: TypeDescriptor::resolve::<T>(),
            next_identity: 1,
            _marker: PhantomData,
        }
    }

    /// Direct view of the backing rows (escape hatch for seeding and
    /// inspection).
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    fn position(&self, key: &Key) -> Option<usize> {
        self.rows.iter().position(|row| {
            self.descriptor
                .key_fields()
                .iter()
                .zip(key.values())
                .all(|(field, value)| row.get(field.name) == Some(value))
        })
    }

    /// Assign the auto-increment identity when the declared generated key
    /// is unset (absent, null, or zero); an explicit value advances the
    /// counter past itself instead.
    fn assign_identity(&mut self, row: &mut Row, item: &mut T) -> Result<(), StoreError> {
        let Some(field) = self.descriptor.generated_key_field() else {
            return Ok(());
        };

        if !field.kind.is_integer() {
            return Ok(());
        }

        let unset = match row.get(field.name) {
            None | Some(Value::Null) => true,
            Some(Value::Int(0) | Value::Uint(0)) => true,
            _ => false,
        };

        if unset {
            let assigned = match field.kind {
                FieldKind::Uint => Value::Uint(self.next_identity.unsigned_abs()),
                _ => Value::Int(self.next_identity),
            };
            self.next_identity += 1;

            row.set(field.name, assigned.clone());
            item.set_field_value(field.name, assigned)
                .map_err(|err| StoreError::from_field_write(T::MODEL.type_name, err))?;
        } else if let Some(Value::Int(explicit)) = row.get(field.name) {
            self.next_identity = self.next_identity.max(explicit + 1);
        } else if let Some(Value::Uint(explicit)) = row.get(field.name) {
            self.next_identity = self
                .next_identity
                .max(i64::try_from(*explicit).unwrap_or(i64::MAX).saturating_add(1));
        }

        Ok(())
    }
}

impl<T: Record> Default for TableDataStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> DataStore<T> for TableDataStore<T> {
    fn capabilities(&self) -> Capabilities {
        Capabilities {
            nested_relationships: false,
            complex_structures: true,
            generated_keys: true,
            transaction_scope: false,
            queue_changes: false,
        }
    }

    fn store_name(&self) -> &str {
        self.descriptor.store_name()
    }

    fn add(&mut self, mut item: T) -> Result<T, StoreError> {
        let mut row = to_row(&item);
        self.assign_identity(&mut row, &mut item)?;

        if self.descriptor.has_key() {
            let key = key_of(&item)?;
            if self.position(&key).is_some() {
                return Err(StoreError::duplicate_key(self.store_name(), &key));
            }
        }

        self.rows.push(row);

        Ok(item)
    }

    fn get(&mut self, key: &Key) -> Result<Option<T>, StoreError> {
        ensure_arity(self.descriptor, key)?;

        match self.position(key) {
            Some(index) => {
                let mut item = T::default();
                hydrate(&mut item, &self.rows[index])?;
                Ok(Some(item))
            }
            None => Ok(None),
        }
    }

    fn update(&mut self, item: &T) -> Result<(), StoreError> {
        let key = key_of(item)?;

        match self.position(&key) {
            Some(index) => {
                self.rows[index] = to_row(item);
                Ok(())
            }
            None => Err(StoreError::not_found(self.store_name(), &key)),
        }
    }

    fn delete(&mut self, key: &Key) -> Result<(), StoreError> {
        ensure_arity(self.descriptor, key)?;

        match self.position(key) {
            Some(index) => {
                self.rows.remove(index);
                Ok(())
            }
            None => Err(StoreError::not_found(self.store_name(), key)),
        }
    }

    fn query(&mut self) -> Result<Query<T>, StoreError> {
        let mut items = Vec::with_capacity(self.rows.len());

        for row in &self.rows {
            let mut item = T::default();
            hydrate(&mut item, row)?;
            items.push(item);
        }

        Ok(Query::new(items))
    }
}

///
/// TESTS
///
