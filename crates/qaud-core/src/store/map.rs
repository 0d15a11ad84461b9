use crate::{
    descriptor::TypeDescriptor,
    error::StoreError,
    key::{Key, ensure_arity, key_of},
    store::{Capabilities, DataStore, Query},
    traits::Record,
};
use std::collections::BTreeMap;

const DEFAULT_DELIMITER: &str = "|";

///
/// MapDataStore
///
/// In-process keyed adapter: records stored whole under their rendered key.
/// Composite keys join their values with a configurable delimiter, so a
/// backend without composite support still addresses by a single string.
///

pub struct MapDataStore<T: Record> {
    items: BTreeMap<String, T>,
    delimiter: String,
    descriptor: &'static TypeDescriptor,
}

impl<T: Record> MapDataStore<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: BTreeMap::new(),
            delimiter: DEFAULT_DELIMITER.to_string(),
            descriptor: TypeDescriptor::resolve::<T>(),
        }
    }

    #[must_use]
    pub fn with_delimiter(delimiter: impl Into<String>) -> Self {
        let mut store = Self::new();
        store.delimiter = delimiter.into();
        store
    }

    /// Seed from an existing collection.
    pub fn with_items(items: impl IntoIterator<Item = T>) -> Result<Self, StoreError> {
        let mut store = Self::new();
        store.add_range(items)?;

        Ok(store)
    }

    #[must_use]
    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Direct view of the backing map.
    #[must_use]
    pub const fn items(&self) -> &BTreeMap<String, T> {
        &self.items
    }

    fn render_key(&self, key: &Key) -> Result<String, StoreError> {
        ensure_arity(self.descriptor, key)?;

        let rendered = key.joined(&self.delimiter);
        if rendered.is_empty() {
            return Err(StoreError::missing_key(self.descriptor.type_name()));
        }

        Ok(rendered)
    }

    fn item_key(&self, item: &T) -> Result<String, StoreError> {
        self.render_key(&key_of(item)?)
    }
}

impl<T: Record> Default for MapDataStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> DataStore<T> for MapDataStore<T> {
    fn capabilities(&self) -> Capabilities {
        Capabilities {
            nested_relationships: false,
            complex_structures: true,
            generated_keys: false,
            transaction_scope: false,
            queue_changes: false,
        }
    }

    fn store_name(&self) -> &str {
        self.descriptor.store_name()
    }

    fn add(&mut self, item: T) -> Result<T, StoreError> {
        let rendered = self.item_key(&item)?;

        if self.items.contains_key(&rendered) {
            return Err(StoreError::duplicate_key(
                self.descriptor.store_name(),
                &key_of(&item)?,
            ));
        }

        self.items.insert(rendered, item.clone());

        Ok(item)
    }

    fn get(&mut self, key: &Key) -> Result<Option<T>, StoreError> {
        let rendered = self.render_key(key)?;

        Ok(self.items.get(&rendered).cloned())
    }

    fn update(&mut self, item: &T) -> Result<(), StoreError> {
        let rendered = self.item_key(item)?;

        match self.items.get_mut(&rendered) {
            Some(stored) => {
                *stored = item.clone();
                Ok(())
            }
            None => Err(StoreError::not_found(
                self.descriptor.store_name(),
                &key_of(item)?,
            )),
        }
    }

    fn delete(&mut self, key: &Key) -> Result<(), StoreError> {
        let rendered = self.render_key(key)?;

        if self.items.remove(&rendered).is_none() {
            return Err(StoreError::not_found(self.descriptor.store_name(), key));
        }

        Ok(())
    }

    fn query(&mut self) -> Result<Query<T>, StoreError> {
        Ok(Query::new(self.items.values().cloned().collect()))
    }
}

///
/// TESTS
///
