//! The capability-augmented CRUD contract every adapter implements, plus
//! one adapter per backend. Behavior, not state, is shared: the uniform
//! algorithms live here as provided methods, composed over the descriptor,
//! codec, and key modules.

mod context;
mod document;
mod map;
mod session;
mod sql;
mod table;

pub use context::ContextDataStore;
pub use document::DocumentDataStore;
pub use map::MapDataStore;
pub use session::SessionDataStore;
pub use sql::SqlDataStore;
pub use table::TableDataStore;

use crate::{
    codec::apply_partial,
    descriptor::TypeDescriptor,
    error::StoreError,
    key::{Key, key_of, key_of_row},
    patch::ChangeSet,
    traits::Record,
};

///
/// Capabilities
///
/// Fixed capability flags reported by each adapter instance: static per
/// adapter type, set once, read-only to callers. Calling code checks these
/// before relying on optional behavior instead of downcasting adapters.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Capabilities {
    /// Add/update may propagate related data (navigation-style).
    pub nested_relationships: bool,
    /// A field can round-trip as a complete nested structure.
    pub complex_structures: bool,
    /// The store can assign identity values during insertion.
    pub generated_keys: bool,
    /// Operations enlist in an ambient transaction scope.
    pub transaction_scope: bool,
    /// Mutations can be queued and applied on `save_changes`.
    pub queue_changes: bool,
}

///
/// Query
///
/// A client-filtered scan: the adapter loads everything and the caller
/// filters in process. For substrates without native server-side filtering
/// this is a deliberate, documented trade-off, not an oversight.
///

#[derive(Debug)]
pub struct Query<T>(std::vec::IntoIter<T>);

impl<T> Query<T> {
    #[must_use]
    pub fn new(items: Vec<T>) -> Self {
        Self(items.into_iter())
    }
}

impl<T> Iterator for Query<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.0.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

///
/// DataStore
///
/// The QAUD contract: Query, Add, Update, Delete — uniformly over every
/// substrate. All operations are synchronous, blocking calls; an adapter
/// instance holds one physical connection/session and must not be shared
/// across unsynchronized callers (`&mut self` encodes that rule).
///

pub trait DataStore<T: Record> {
    /// Capability flags for this adapter type.
    fn capabilities(&self) -> Capabilities;

    /// Physical table/collection name this adapter addresses.
    fn store_name(&self) -> &str;

    /// A fresh, default-initialized record.
    fn create(&self) -> T {
        T::default()
    }

    /// Insert one record, or queue the insertion. Returns the record with
    /// any mutations applied during insertion (generated keys included).
    fn add(&mut self, item: T) -> Result<T, StoreError>;

    /// Insert a batch; fail-fast and non-atomic — partial successes remain.
    fn add_range(&mut self, items: impl IntoIterator<Item = T>) -> Result<(), StoreError> {
        for item in items {
            self.add(item)?;
        }

        Ok(())
    }

    /// Look up one record by key. `None` when absent.
    fn get(&mut self, key: &Key) -> Result<Option<T>, StoreError>;

    /// Look up using the key extracted from a sample record.
    fn get_match(&mut self, lookup: &T) -> Result<Option<T>, StoreError> {
        let key = key_of(lookup)?;

        self.get(&key)
    }

    /// Apply every field of `item` to the stored record with the same key.
    fn update(&mut self, item: &T) -> Result<(), StoreError>;

    fn update_range(&mut self, items: impl IntoIterator<Item = T>) -> Result<(), StoreError> {
        for item in items {
            self.update(&item)?;
        }

        Ok(())
    }

    /// Merge a sparse change set onto the stored record it addresses:
    /// derive the key, load the current record, apply the changes, save,
    /// and return the merged result. Uniform across adapters.
    fn update_partial(&mut self, changes: &ChangeSet) -> Result<T, StoreError> {
        let descriptor = TypeDescriptor::resolve::<T>();
        let key = key_of_row(descriptor, changes.row())?;

        let mut current = self
            .get(&key)?
            .ok_or_else(|| StoreError::not_found(descriptor.store_name(), &key))?;

        apply_partial(&mut current, changes)?;
        self.update(&current)?;

        Ok(current)
    }

    /// Delete the record addressed by `key`; `NotFound` when the store
    /// held nothing under it.
    fn delete(&mut self, key: &Key) -> Result<(), StoreError>;

    /// Delete using the key extracted from the record itself.
    fn delete_item(&mut self, item: &T) -> Result<(), StoreError> {
        let key = key_of(item)?;

        self.delete(&key)
    }

    fn delete_range(&mut self, items: impl IntoIterator<Item = T>) -> Result<(), StoreError> {
        for item in items {
            self.delete_item(&item)?;
        }

        Ok(())
    }

    /// Full scan for client-side filtering.
    fn query(&mut self) -> Result<Query<T>, StoreError>;

    /// Apply queued mutations. A no-op on adapters without a deferred-write
    /// mode.
    fn save_changes(&mut self) -> Result<(), StoreError> {
        Ok(())
    }

    /// Whether mutations apply immediately (default) or queue until
    /// [`save_changes`](Self::save_changes).
    fn auto_save(&self) -> bool {
        true
    }

    /// Turning auto-save off requires the queue-changes capability.
    fn set_auto_save(&mut self, auto_save: bool) -> Result<(), StoreError> {
        if auto_save {
            Ok(())
        } else {
            Err(StoreError::UnsupportedCapability {
                capability: "queue_changes",
            })
        }
    }
}
