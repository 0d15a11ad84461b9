use crate::{
    codec::{hydrate, to_row},
    descriptor::TypeDescriptor,
    error::StoreError,
    key::Key,
    provider::{Command, ConnectionState, DbConnection, DbProviderFactory, RowCursor},
    sql::{StatementSet, bind_key, bind_row, synthesize},
    store::{Capabilities, DataStore, Query},
    traits::Record,
};
use std::marker::PhantomData;
use tracing::{debug, warn};

///
/// SqlDataStore
///
/// The relational adapter: statements are synthesized once per instance
/// from the type descriptor and re-bound per call. Holds one connection
/// handle, lazily opened and replaced on breakage — a single transient
/// connection failure must not permanently wedge the adapter.
///

pub struct SqlDataStore<T, F>
where
    T: Record,
    F: DbProviderFactory,
{
    factory: F,
    connection_string: String,
    connection: Option<F::Connection>,
    descriptor: &'static TypeDescriptor,
    statements: StatementSet,
    _marker: PhantomData<T>,
}

impl<T, F> SqlDataStore<T, F>
where
    T: Record,
    F: DbProviderFactory,
{
    #[must_use]
    pub fn new(factory: F, connection_string: impl Into<String>) -> Self {
        let descriptor = TypeDescriptor::resolve::<T>();

        Self {
            factory,
            connection_string: connection_string.into(),
            connection: None,
            descriptor,
            statements: synthesize(descriptor),
            _marker: PhantomData,
        }
    }

    /// The synthesized template set (shape is invariant per type).
    #[must_use]
    pub const fn statements(&self) -> &StatementSet {
        &self.statements
    }

    #[must_use]
    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }

    /// Hand out an open connection, recovering from `Closed` and `Broken`
    /// states first. The broken path discards the dead handle and builds a
    /// fresh one with the same connection string — attempted exactly once
    /// per call; failure surfaces as `ConnectionFailure`.
    fn connection(&mut self) -> Result<&mut F::Connection, StoreError> {
        let replace = match &self.connection {
            None => true,
            Some(conn) => conn.state() == ConnectionState::Broken,
        };

        if replace {
            if let Some(mut dead) = self.connection.take() {
                warn!(store = self.descriptor.store_name(), "connection broken, reconnecting");
                dead.close();
            }

            let fresh = self
                .factory
                .create_connection(&self.connection_string)
                .map_err(|err| StoreError::connection_failure(&err))?;
            self.connection = Some(fresh);
        }

        let Some(conn) = self.connection.as_mut() else {
            return Err(StoreError::ConnectionFailure {
                message: "provider returned no connection".to_string(),
            });
        };

        if conn.state() == ConnectionState::Closed {
            conn.open()
                .map_err(|err| StoreError::connection_failure(&err))?;
        }

        Ok(conn)
    }

    fn execute(&mut self, command: &Command) -> Result<u64, StoreError> {
        debug!(statement = %command.text, "executing");

        let conn = self.connection()?;
        conn.prepare(command)?;

        Ok(conn.execute(command)?)
    }

    fn read_all(&mut self, command: &Command) -> Result<Vec<T>, StoreError> {
        debug!(statement = %command.text, "querying");

        let conn = self.connection()?;
        conn.prepare(command)?;
        let mut cursor = conn.execute_reader(command)?;

        let mut items = Vec::new();
        while let Some(row) = cursor.next_row()? {
            let mut item = T::default();
            hydrate(&mut item, &row)?;
            items.push(item);
        }

        Ok(items)
    }
}

impl<T, F> DataStore<T> for SqlDataStore<T, F>
where
    T: Record,
    F: DbProviderFactory,
{
    fn capabilities(&self) -> Capabilities {
        Capabilities {
            nested_relationships: false,
            complex_structures: false,
            generated_keys: false,
            transaction_scope: true,
            queue_changes: false,
        }
    }

    fn store_name(&self) -> &str {
        self.descriptor.store_name()
    }

    fn add(&mut self, item: T) -> Result<T, StoreError> {
        let params = bind_row(&self.statements.insert, &to_row(&item));
        let command = Command::new(self.statements.insert.text.clone(), params);

        self.execute(&command)?;

        Ok(item)
    }

    fn get(&mut self, key: &Key) -> Result<Option<T>, StoreError> {
        let params = bind_key(&self.statements.select, self.descriptor, key)?;
        let command = Command::new(self.statements.select.text.clone(), params);

        Ok(self.read_all(&command)?.into_iter().next())
    }

    fn update(&mut self, item: &T) -> Result<(), StoreError> {
        let params = bind_row(&self.statements.update, &to_row(item));
        let command = Command::new(self.statements.update.text.clone(), params);

        if self.execute(&command)? == 0 {
            let key = crate::key::key_of(item)?;
            return Err(StoreError::not_found(self.descriptor.store_name(), &key));
        }

        Ok(())
    }

    fn delete(&mut self, key: &Key) -> Result<(), StoreError> {
        let params = bind_key(&self.statements.delete, self.descriptor, key)?;
        let command = Command::new(self.statements.delete.text.clone(), params);

        if self.execute(&command)? == 0 {
            return Err(StoreError::not_found(self.descriptor.store_name(), key));
        }

        Ok(())
    }

    fn query(&mut self) -> Result<Query<T>, StoreError> {
        let command = Command::new(self.statements.select_all.text.clone(), Vec::new());

        Ok(Query::new(self.read_all(&command)?))
    }
}

///
/// TESTS
///
