use crate::{
    descriptor::TypeDescriptor,
    error::StoreError,
    key::{Key, ensure_arity, key_of},
    orm::{DataContext, RecordSet},
    store::{Capabilities, DataStore, Query},
    traits::Record,
};

///
/// ContextDataStore
///
/// ORM unit-of-work adapter: the context's typed collection view does the
/// change tracking, so reads observe locally cached (pending) state and
/// `save_changes` delegates to the context's own flush semantics.
///

pub struct ContextDataStore<T, C>
where
    T: Record,
    C: DataContext<T>,
{
    context: C,
    auto_save: bool,
    descriptor: &'static TypeDescriptor,
    _marker: std::marker::PhantomData<T>,
}

impl<T, C> ContextDataStore<T, C>
where
    T: Record,
    C: DataContext<T>,
{
    #[must_use]
    pub fn new(context: C) -> Self {
        Self {
            context,
            auto_save: true,
            descriptor: TypeDescriptor::resolve::<T>(),
            _marker: std::marker::PhantomData,
        }
    }

    /// Direct access to the wrapped unit-of-work.
    #[must_use]
    pub const fn context(&self) -> &C {
        &self.context
    }

    pub const fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    fn find_by_key(&mut self, key: &Key) -> Result<Option<T>, StoreError> {
        ensure_arity(self.descriptor, key)?;

        let found = self
            .context
            .records()
            .snapshot()
            .into_iter()
            .find(|item| key_of(item).is_ok_and(|candidate| candidate == *key));

        Ok(found)
    }

    fn flush_if_auto_save(&mut self) -> Result<(), StoreError> {
        if self.auto_save {
            self.context.flush()?;
        }

        Ok(())
    }
}

impl<T, C> DataStore<T> for ContextDataStore<T, C>
where
    T: Record,
    C: DataContext<T>,
{
    fn capabilities(&self) -> Capabilities {
        Capabilities {
            nested_relationships: true,
            complex_structures: true,
            generated_keys: true,
            transaction_scope: true,
            queue_changes: true,
        }
    }

    fn store_name(&self) -> &str {
        self.descriptor.store_name()
    }

    fn add(&mut self, item: T) -> Result<T, StoreError> {
        let key = key_of(&item)?;
        if self.find_by_key(&key)?.is_some() {
            return Err(StoreError::duplicate_key(
                self.descriptor.store_name(),
                &key,
            ));
        }

        self.context.records().add(item.clone());
        self.flush_if_auto_save()?;

        Ok(item)
    }

    fn get(&mut self, key: &Key) -> Result<Option<T>, StoreError> {
        self.find_by_key(key)
    }

    fn update(&mut self, item: &T) -> Result<(), StoreError> {
        let key = key_of(item)?;

        let removed = self
            .context
            .records()
            .remove_where(&|candidate: &T| {
                key_of(candidate).is_ok_and(|candidate_key| candidate_key == key)
            });
        if removed == 0 {
            return Err(StoreError::not_found(self.descriptor.store_name(), &key));
        }

        self.context.records().add(item.clone());
        self.flush_if_auto_save()
    }

    fn delete(&mut self, key: &Key) -> Result<(), StoreError> {
        ensure_arity(self.descriptor, key)?;

        let removed = self.context.records().remove_where(&|candidate: &T| {
            key_of(candidate).is_ok_and(|candidate_key| candidate_key == *key)
        });
        if removed == 0 {
            return Err(StoreError::not_found(self.descriptor.store_name(), key));
        }

        self.flush_if_auto_save()
    }

    fn query(&mut self) -> Result<Query<T>, StoreError> {
        Ok(Query::new(self.context.records().snapshot()))
    }

    fn save_changes(&mut self) -> Result<(), StoreError> {
        self.context.flush()?;

        Ok(())
    }

    fn auto_save(&self) -> bool {
        self.auto_save
    }

    fn set_auto_save(&mut self, auto_save: bool) -> Result<(), StoreError> {
        self.auto_save = auto_save;

        Ok(())
    }
}

///
/// TESTS
///
