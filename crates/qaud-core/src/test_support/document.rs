//! In-memory document database client with a surrogate-id counter.

use crate::{
    document::{DocumentClient, DocumentError, IdStrategy},
    row::Row,
    value::Value,
};
use std::collections::HashMap;

///
/// MemoryDocumentClient
///

#[derive(Default)]
pub(crate) struct MemoryDocumentClient {
    collections: HashMap<String, Vec<Row>>,
    next_surrogate: i64,
}

impl MemoryDocumentClient {
    pub fn new() -> Self {
        Self {
            collections: HashMap::new(),
            next_surrogate: 1,
        }
    }

    pub fn documents(&self, collection: &str) -> &[Row] {
        self.collections
            .get(collection)
            .map_or(&[], Vec::as_slice)
    }
}

fn document_matches(document: &Row, filter: &Row) -> bool {
    filter
        .entries()
        .all(|(name, value)| document.get(name) == Some(value))
}

impl DocumentClient for MemoryDocumentClient {
    fn insert(&mut self, collection: &str, document: Row) -> Result<(), DocumentError> {
        self.collections
            .entry(collection.to_string())
            .or_default()
            .push(document);

        Ok(())
    }

    fn delete_matching(&mut self, collection: &str, filter: &Row) -> Result<u64, DocumentError> {
        let Some(documents) = self.collections.get_mut(collection) else {
            return Ok(0);
        };

        let before = documents.len();
        documents.retain(|document| !document_matches(document, filter));

        Ok((before - documents.len()) as u64)
    }

    fn find_matching(&mut self, collection: &str, filter: &Row) -> Result<Vec<Row>, DocumentError> {
        let found = self
            .collections
            .get(collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|document| document_matches(document, filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        Ok(found)
    }

    fn generate_id(&mut self, strategy: IdStrategy) -> Result<Value, DocumentError> {
        match strategy {
            IdStrategy::Surrogate => {
                let id = self.next_surrogate;
                self.next_surrogate += 1;
                Ok(Value::Int(id))
            }
            IdStrategy::Text => Ok(Value::Text(uuid::Uuid::new_v4().simple().to_string())),
            IdStrategy::Uuid => Ok(Value::Text(uuid::Uuid::new_v4().to_string())),
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_matches_every_document() {
        let mut client = MemoryDocumentClient::new();
        client
            .insert("c", Row::new().with("id", Value::Int(1)))
            .expect("insert should succeed");
        client
            .insert("c", Row::new().with("id", Value::Int(2)))
            .expect("insert should succeed");

        let all = client
            .find_matching("c", &Row::new())
            .expect("find should succeed");
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn filters_require_every_named_cell_to_match() {
        let mut client = MemoryDocumentClient::new();
        client
            .insert(
                "c",
                Row::new()
                    .with("id", Value::Int(1))
                    .with("tag", Value::Text("a".into())),
            )
            .expect("insert should succeed");

        let filter = Row::new()
            .with("id", Value::Int(1))
            .with("tag", Value::Text("b".into()));
        let found = client.find_matching("c", &filter).expect("find should succeed");

        assert!(found.is_empty());
    }

    #[test]
    fn surrogate_ids_count_upward() {
        let mut client = MemoryDocumentClient::new();

        assert_eq!(
            client.generate_id(IdStrategy::Surrogate).expect("id"),
            Value::Int(1)
        );
        assert_eq!(
            client.generate_id(IdStrategy::Surrogate).expect("id"),
            Value::Int(2)
        );
    }
}
