use crate::{
    codec::{hydrate, to_row},
    descriptor::TypeDescriptor,
    document::{DocumentClient, IdStrategy},
    error::StoreError,
    key::{Key, ensure_arity, key_of},
    model::FieldKind,
    row::Row,
    store::{Capabilities, DataStore, Query},
    traits::Record,
    value::Value,
};
use convert_case::{Case, Casing};
use std::marker::PhantomData;
use tracing::debug;

///
/// DocumentDataStore
///
/// Document-database adapter: records round-trip as whole documents, lookup
/// and deletion go through the client's filter primitive, and a generated
/// key is filled from the client's id strategy for the key field's type.
///

pub struct DocumentDataStore<T, C>
where
    T: Record,
    C: DocumentClient,
{
    client: C,
    collection: String,
    descriptor: &'static TypeDescriptor,
    _marker: PhantomData<T>,
}

impl<T, C> DocumentDataStore<T, C>
where
    T: Record,
    C: DocumentClient,
{
    /// Collection name: the explicit store-name marker when declared, else
    /// the camelCase rendering of the type name.
    #[must_use]
    pub fn new(client: C) -> Self {
        let descriptor = TypeDescriptor::resolve::<T>();
        let collection = if T::MODEL.store_name.is_some() {
            descriptor.store_name().to_string()
        } else {
            descriptor.store_name().to_case(Case::Camel)
        };

        Self {
            client,
            collection,
            descriptor,
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub fn with_collection(client: C, collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            ..Self::new(client)
        }
    }

    /// Direct access to the underlying client.
    #[must_use]
    pub const fn client(&self) -> &C {
        &self.client
    }

    pub const fn client_mut(&mut self) -> &mut C {
        &mut self.client
    }

    fn key_filter(&self, key: &Key) -> Result<Row, StoreError> {
        ensure_arity(self.descriptor, key)?;

        let mut filter = Row::new();
        for (field, value) in self.descriptor.key_fields().iter().zip(key.values()) {
            filter.set(field.name, value.clone());
        }

        Ok(filter)
    }

    const fn id_strategy(kind: FieldKind) -> IdStrategy {
        match kind {
            FieldKind::Text => IdStrategy::Uuid,
            _ => IdStrategy::Surrogate,
        }
    }

    /// Fill a declared generated key that arrived unset.
    fn assign_generated_id(&mut self, row: &mut Row, item: &mut T) -> Result<(), StoreError> {
        let Some(field) = self.descriptor.generated_key_field() else {
            return Ok(());
        };

        let unset = match row.get(field.name) {
            None | Some(Value::Null) => true,
            Some(Value::Text(text)) => text.is_empty(),
            Some(Value::Int(0) | Value::Uint(0)) => true,
            _ => false,
        };

        if unset {
            let id = self.client.generate_id(Self::id_strategy(field.kind))?;
            debug!(collection = %self.collection, field = field.name, "generated document id");

            row.set(field.name, id.clone());
            item.set_field_value(field.name, id)
                .map_err(|err| StoreError::from_field_write(T::MODEL.type_name, err))?;
        }

        Ok(())
    }
}

impl<T, C> DataStore<T> for DocumentDataStore<T, C>
where
    T: Record,
    C: DocumentClient,
{
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
        &self.collection
    }

    fn add(&mut self, mut item: T) -> Result<T, StoreError> {
        let mut document = to_row(&item);
        self.assign_generated_id(&mut document, &mut item)?;

        self.client.insert(&self.collection, document)?;

        Ok(item)
    }

    fn get(&mut self, key: &Key) -> Result<Option<T>, StoreError> {
        let filter = self.key_filter(key)?;

        match self
            .client
            .find_matching(&self.collection, &filter)?
            .into_iter()
            .next()
        {
            Some(document) => {
                let mut item = T::default();
                hydrate(&mut item, &document)?;
                Ok(Some(item))
            }
            None => Ok(None),
        }
    }

    fn update(&mut self, item: &T) -> Result<(), StoreError> {
        let key = key_of(item)?;
        let filter = self.key_filter(&key)?;

        if self.client.delete_matching(&self.collection, &filter)? == 0 {
            return Err(StoreError::not_found(&self.collection, &key));
        }
        self.client.insert(&self.collection, to_row(item))?;

        Ok(())
    }

    fn delete(&mut self, key: &Key) -> Result<(), StoreError> {
        let filter = self.key_filter(key)?;

        if self.client.delete_matching(&self.collection, &filter)? == 0 {
            return Err(StoreError::not_found(&self.collection, key));
        }

        Ok(())
    }

    fn query(&mut self) -> Result<Query<T>, StoreError> {
        let documents = self.client.find_matching(&self.collection, &Row::new())?;

        let mut items = Vec::with_capacity(documents.len());
        for document in &documents {
            let mut item = T::default();
            hydrate(&mut item, document)?;
            items.push(item);
        }

        Ok(Query::new(items))
    }
}

///
/// TESTS
///
