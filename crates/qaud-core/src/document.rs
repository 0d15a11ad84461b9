//! Document collaborator boundaries: a filter-driven document database
//! client (collection-oriented) and a schema-less, session-based document
//! store addressed by string ids. Rows double as documents on both.

use crate::{row::Row, value::Value};
use thiserror::Error as ThisError;

///
/// DocumentError
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct DocumentError {
    message: String,
}

impl DocumentError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

///
/// IdStrategy
/// Supported id shapes for store-generated document identity.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IdStrategy {
    /// Opaque text id.
    Text,
    /// GUID-style id.
    Uuid,
    /// Backend-assigned surrogate id (numeric or object id).
    Surrogate,
}

///
/// DocumentClient
///
/// Collection-oriented document database. Filters are rows: a document
/// matches when every named cell of the filter equals the corresponding
/// cell of the document; the empty filter matches everything.
///

pub trait DocumentClient {
    fn insert(&mut self, collection: &str, document: Row) -> Result<(), DocumentError>;

    /// Remove matching documents; returns the removed count.
    fn delete_matching(&mut self, collection: &str, filter: &Row) -> Result<u64, DocumentError>;

    fn find_matching(&mut self, collection: &str, filter: &Row) -> Result<Vec<Row>, DocumentError>;

    /// Generate an id for the given strategy. Text and GUID ids have a
    /// uuid-backed default; surrogate ids need backend support.
    fn generate_id(&mut self, strategy: IdStrategy) -> Result<Value, DocumentError> {
        match strategy {
            IdStrategy::Text => Ok(Value::Text(uuid::Uuid::new_v4().simple().to_string())),
            IdStrategy::Uuid => Ok(Value::Text(uuid::Uuid::new_v4().to_string())),
            IdStrategy::Surrogate => Err(DocumentError::new(
                "surrogate id generation requires client support",
            )),
        }
    }
}

///
/// DocumentSessionFactory
/// Opens sessions against a schema-less document store.
///

pub trait DocumentSessionFactory {
    type Session: DocumentSession;

    fn open_session(&self) -> Self::Session;
}

///
/// DocumentSession
///
/// One buffered unit of work against the schema-less store. Reads observe
/// this session's pending writes; `save_changes` applies them with whatever
/// semantics the store natively provides.
///

pub trait DocumentSession {
    fn store(&mut self, id: &str, document: Row) -> Result<(), DocumentError>;

    fn load(&mut self, id: &str) -> Result<Option<Row>, DocumentError>;

    fn delete(&mut self, id: &str) -> Result<(), DocumentError>;

    /// Every stored document (pending state included).
    fn scan(&mut self) -> Result<Vec<Row>, DocumentError>;

    fn save_changes(&mut self) -> Result<(), DocumentError>;
}

///
/// TESTS
///
