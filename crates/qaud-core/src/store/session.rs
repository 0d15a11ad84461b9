use crate::{
    codec::{hydrate, to_row},
    descriptor::TypeDescriptor,
    document::{DocumentSession, DocumentSessionFactory},
    error::StoreError,
    key::{Key, ensure_arity, key_of},
    store::{Capabilities, DataStore, Query},
    traits::Record,
};
use std::marker::PhantomData;
use tracing::debug;

const ID_DELIMITER: &str = "|";

///
/// SessionDataStore
///
/// Schema-less document-store adapter: one lazily opened session buffers
/// mutations; `save_changes` flushes and then discards it, and the next
/// operation opens a fresh one. With auto-save on (the default) every
/// mutation flushes immediately.
///

pub struct SessionDataStore<T, F>
where
    T: Record,
    F: DocumentSessionFactory,
{
    factory: F,
    session: Option<F::Session>,
    auto_save: bool,
    descriptor: &'static TypeDescriptor,
    _marker: PhantomData<T>,
}

impl<T, F> SessionDataStore<T, F>
where
    T: Record,
    F: DocumentSessionFactory,
{
    #[must_use]
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            session: None,
            auto_save: true,
            descriptor: TypeDescriptor::resolve::<T>(),
            _marker: PhantomData,
        }
    }

    /// The pending session, if one is open.
    #[must_use]
    pub const fn session(&self) -> Option<&F::Session> {
        self.session.as_ref()
    }

    fn open_session(&mut self) -> &mut F::Session {
        self.session
            .get_or_insert_with(|| self.factory.open_session())
    }

    fn render_id(&self, key: &Key) -> Result<String, StoreError> {
        ensure_arity(self.descriptor, key)?;

        let rendered = key.joined(ID_DELIMITER);
        if rendered.is_empty() {
            return Err(StoreError::missing_key(self.descriptor.type_name()));
        }

        Ok(rendered)
    }

    fn item_id(&self, item: &T) -> Result<String, StoreError> {
        self.render_id(&key_of(item)?)
    }

    fn flush_if_auto_save(&mut self) -> Result<(), StoreError> {
        if self.auto_save {
            self.save_changes()?;
        }

        Ok(())
    }
}

impl<T, F> DataStore<T> for SessionDataStore<T, F>
where
    T: Record,
    F: DocumentSessionFactory,
{
    fn capabilities(&self) -> Capabilities {
        Capabilities {
            nested_relationships: false,
            complex_structures: true,
            generated_keys: false,
            transaction_scope: true,
            queue_changes: true,
        }
    }

    fn store_name(&self) -> &str {
        self.descriptor.store_name()
    }

    fn add(&mut self, item: T) -> Result<T, StoreError> {
        let id = self.item_id(&item)?;
        let document = to_row(&item);

        let session = self.open_session();
        if session.load(&id)?.is_some() {
            return Err(StoreError::duplicate_key(
                self.descriptor.store_name(),
                &key_of(&item)?,
            ));
        }
        session.store(&id, document)?;

        self.flush_if_auto_save()?;

        Ok(item)
    }

    fn get(&mut self, key: &Key) -> Result<Option<T>, StoreError> {
        let id = self.render_id(key)?;

        match self.open_session().load(&id)? {
            Some(document) => {
                let mut item = T::default();
                hydrate(&mut item, &document)?;
                Ok(Some(item))
            }
            None => Ok(None),
        }
    }

    /// Load the current document and apply the record's full row onto it,
    /// preserving any extra cells the schema-less store may carry.
    fn update(&mut self, item: &T) -> Result<(), StoreError> {
        let id = self.item_id(item)?;
        let changes = to_row(item);

        let session = self.open_session();
        let Some(mut document) = session.load(&id)? else {
            return Err(StoreError::not_found(
                self.descriptor.store_name(),
                &key_of(item)?,
            ));
        };

        for (name, value) in changes.entries() {
            document.set(name, value.clone());
        }
        session.store(&id, document)?;

        self.flush_if_auto_save()
    }

    fn delete(&mut self, key: &Key) -> Result<(), StoreError> {
        let id = self.render_id(key)?;

        let session = self.open_session();
        if session.load(&id)?.is_none() {
            return Err(StoreError::not_found(self.descriptor.store_name(), key));
        }
        session.delete(&id)?;

        self.flush_if_auto_save()
    }

    fn query(&mut self) -> Result<Query<T>, StoreError> {
        let documents = self.open_session().scan()?;

        let mut items = Vec::with_capacity(documents.len());
        for document in &documents {
            let mut item = T::default();
            hydrate(&mut item, document)?;
            items.push(item);
        }

        Ok(Query::new(items))
    }

    /// Flush and discard the pending session; a fresh session opens lazily
    /// on the next operation.
    fn save_changes(&mut self) -> Result<(), StoreError> {
        if let Some(mut session) = self.session.take() {
            debug!(store = self.descriptor.store_name(), "flushing session");
            session.save_changes()?;
        }

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
