//! In-memory schema-less document store with buffering sessions: writes
//! stay session-local until `save_changes` applies them to the shared
//! backend map.

use crate::{
    document::{DocumentError, DocumentSession, DocumentSessionFactory},
    row::Row,
    value::Value,
};
use std::{
    cell::{Cell, RefCell},
    collections::BTreeMap,
    rc::Rc,
};

type Backend = Rc<RefCell<BTreeMap<String, Row>>>;

///
/// MemorySessionFactory
///

#[derive(Clone, Default)]
pub(crate) struct MemorySessionFactory {
    backend: Backend,
    opened: Rc<Cell<usize>>,
}

impl MemorySessionFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the committed (flushed) store state.
    pub fn committed(&self) -> BTreeMap<String, Row> {
        self.backend.borrow().clone()
    }

    pub fn committed_document(&self, id: &str) -> Option<Row> {
        self.backend.borrow().get(id).cloned()
    }

    pub fn sessions_opened(&self) -> usize {
        self.opened.get()
    }

    /// Plant an extra cell on a committed document, simulating schema
    /// drift in the schema-less store.
    pub fn set_extra_cell(&self, id: &str, name: &str, value: &str) {
        if let Some(document) = self.backend.borrow_mut().get_mut(id) {
            document.set(name, Value::Text(value.to_string()));
        }
    }
}

impl DocumentSessionFactory for MemorySessionFactory {
    type Session = MemorySession;

    fn open_session(&self) -> Self::Session {
        self.opened.set(self.opened.get() + 1);

        MemorySession {
            backend: Rc::clone(&self.backend),
            pending: Vec::new(),
        }
    }
}

enum PendingOp {
    Store(String, Row),
    Delete(String),
}

///
/// MemorySession
///

pub(crate) struct MemorySession {
    backend: Backend,
    pending: Vec<PendingOp>,
}

impl DocumentSession for MemorySession {
    fn store(&mut self, id: &str, document: Row) -> Result<(), DocumentError> {
        self.pending.push(PendingOp::Store(id.to_string(), document));

        Ok(())
    }

    fn load(&mut self, id: &str) -> Result<Option<Row>, DocumentError> {
        for op in self.pending.iter().rev() {
            match op {
                PendingOp::Store(pending_id, document) if pending_id == id => {
                    return Ok(Some(document.clone()));
                }
                PendingOp::Delete(pending_id) if pending_id == id => return Ok(None),
                _ => {}
            }
        }

        Ok(self.backend.borrow().get(id).cloned())
    }

    fn delete(&mut self, id: &str) -> Result<(), DocumentError> {
        self.pending.push(PendingOp::Delete(id.to_string()));

        Ok(())
    }

    fn scan(&mut self) -> Result<Vec<Row>, DocumentError> {
        let mut state = self.backend.borrow().clone();
        for op in &self.pending {
            match op {
                PendingOp::Store(id, document) => {
                    state.insert(id.clone(), document.clone());
                }
                PendingOp::Delete(id) => {
                    state.remove(id);
                }
            }
        }

        Ok(state.into_values().collect())
    }

    fn save_changes(&mut self) -> Result<(), DocumentError> {
        let mut backend = self.backend.borrow_mut();
        for op in self.pending.drain(..) {
            match op {
                PendingOp::Store(id, document) => {
                    backend.insert(id, document);
                }
                PendingOp::Delete(id) => {
                    backend.remove(&id);
                }
            }
        }

        Ok(())
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_writes_are_invisible_to_other_sessions_until_flushed() {
        let factory = MemorySessionFactory::new();

        let mut writer = factory.open_session();
        writer
            .store("1", Row::new().with("id", Value::Int(1)))
            .expect("store should queue");

        let mut reader = factory.open_session();
        assert!(
            reader.load("1").expect("load should succeed").is_none(),
            "unflushed writes stay session-local"
        );

        writer.save_changes().expect("flush should succeed");
        assert!(reader.load("1").expect("load should succeed").is_some());
    }

    #[test]
    fn a_session_reads_its_own_pending_state() {
        let factory = MemorySessionFactory::new();
        let mut session = factory.open_session();

        session
            .store("9", Row::new().with("id", Value::Int(9)))
            .expect("store should queue");
        session.delete("9").expect("delete should queue");

        assert!(session.load("9").expect("load should succeed").is_none());
    }
}
