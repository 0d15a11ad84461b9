//! An in-memory relational provider: interprets the synthesized statement
//! shapes against a shared row table, with a breakable connection for the
//! recovery tests.

use crate::{
    provider::{Command, ConnectionState, DbConnection, DbProviderFactory, ProviderError, RowCursor},
    row::Row,
    sql::{BoundParam, names_match},
    value::Value,
};
use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    rc::Rc,
};

#[derive(Default)]
struct SharedState {
    rows: RefCell<Vec<Row>>,
    connections_created: Cell<usize>,
    broken: Cell<bool>,
    fail_next_connect: Cell<bool>,
}

///
/// MemoryProvider
///

#[derive(Clone, Default)]
pub(crate) struct MemoryProvider {
    shared: Rc<SharedState>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connections_created(&self) -> usize {
        self.shared.connections_created.get()
    }

    /// Mark the currently issued connection as broken (dead socket).
    pub fn break_connection(&self) {
        self.shared.broken.set(true);
    }

    /// Make the next `create_connection` fail.
    pub fn fail_next_connect(&self) {
        self.shared.fail_next_connect.set(true);
    }
}

impl DbProviderFactory for MemoryProvider {
    type Connection = MemoryConnection;

    fn create_connection(
        &self,
        _connection_string: &str,
    ) -> Result<Self::Connection, ProviderError> {
        if self.shared.fail_next_connect.take() {
            return Err(ProviderError::new("connect refused"));
        }

        self.shared.broken.set(false);
        self.shared
            .connections_created
            .set(self.shared.connections_created.get() + 1);

        Ok(MemoryConnection {
            shared: Rc::clone(&self.shared),
            state: Cell::new(ConnectionState::Closed),
        })
    }
}

///
/// MemoryConnection
///

pub(crate) struct MemoryConnection {
    shared: Rc<SharedState>,
    state: Cell<ConnectionState>,
}

impl MemoryConnection {
    fn ensure_open(&self) -> Result<(), ProviderError> {
        if self.state() == ConnectionState::Open {
            Ok(())
        } else {
            Err(ProviderError::new("connection is not open"))
        }
    }
}

impl DbConnection for MemoryConnection {
    type Rows = MemoryCursor;

    fn state(&self) -> ConnectionState {
        if self.shared.broken.get() {
            ConnectionState::Broken
        } else {
            self.state.get()
        }
    }

    fn open(&mut self) -> Result<(), ProviderError> {
        self.state.set(ConnectionState::Open);

        Ok(())
    }

    fn close(&mut self) {
        self.state.set(ConnectionState::Closed);
    }

    fn prepare(&mut self, command: &Command) -> Result<(), ProviderError> {
        self.ensure_open()?;

        if command.text.is_empty() {
            return Err(ProviderError::new("empty statement"));
        }

        Ok(())
    }

    fn execute(&mut self, command: &Command) -> Result<u64, ProviderError> {
        self.ensure_open()?;

        if command.text.starts_with("INSERT INTO") {
            let mut row = Row::new();
            for param in &command.params {
                row.set(param.column.clone(), param.value.clone());
            }
            self.shared.rows.borrow_mut().push(row);

            return Ok(1);
        }

        if command.text.starts_with("DELETE FROM") {
            let predicate = predicate_params(command);
            let mut rows = self.shared.rows.borrow_mut();
            let before = rows.len();
            rows.retain(|row| !row_matches(row, &predicate));

            return Ok((before - rows.len()) as u64);
        }

        if command.text.starts_with("UPDATE") {
            let where_names = where_param_names(&command.text);
            let (predicate, assignments): (Vec<_>, Vec<_>) = command
                .params
                .iter()
                .partition(|param| where_names.iter().any(|name| names_match(name, &param.name)));

            let mut rows = self.shared.rows.borrow_mut();
            let mut affected = 0;
            for row in rows.iter_mut() {
                if row_matches(row, &predicate) {
                    for param in &assignments {
                        row.set(param.column.clone(), param.value.clone());
                    }
                    affected += 1;
                }
            }

            return Ok(affected);
        }

        Err(ProviderError::new(format!(
            "unsupported statement: {}",
            command.text
        )))
    }

    fn execute_reader(&mut self, command: &Command) -> Result<Self::Rows, ProviderError> {
        self.ensure_open()?;

        if !command.text.starts_with("SELECT") {
            return Err(ProviderError::new(format!(
                "unsupported query: {}",
                command.text
            )));
        }

        let columns = projection_columns(&command.text);
        let predicate = predicate_params(command);

        let rows = self
            .shared
            .rows
            .borrow()
            .iter()
            .filter(|row| row_matches(row, &predicate))
            .map(|row| project(row, &columns))
            .collect();

        Ok(MemoryCursor { columns, rows })
    }
}

///
/// MemoryCursor
///

pub(crate) struct MemoryCursor {
    columns: Vec<String>,
    rows: VecDeque<Row>,
}

impl RowCursor for MemoryCursor {
    fn columns(&self) -> &[String] {
        &self.columns
    }

    fn next_row(&mut self) -> Result<Option<Row>, ProviderError> {
        Ok(self.rows.pop_front())
    }
}

/// Parameters that belong to the statement's WHERE clause. A parameter
/// bound to the null marker is a wildcard, mirroring the null-tolerant
/// predicate shape.
fn predicate_params(command: &Command) -> Vec<&BoundParam> {
    let where_names = where_param_names(&command.text);

    command
        .params
        .iter()
        .filter(|param| where_names.iter().any(|name| names_match(name, &param.name)))
        .collect()
}

fn row_matches<P: std::borrow::Borrow<BoundParam>>(row: &Row, predicate: &[P]) -> bool {
    predicate.iter().all(|param| {
        let param = param.borrow();
        if param.value.is_null() {
            return true;
        }

        row.entries()
            .find(|(name, _)| names_match(name, &param.column))
            .is_some_and(|(_, value)| *value == param.value)
    })
}

/// `@name` placeholders appearing after ` WHERE `.
fn where_param_names(text: &str) -> Vec<String> {
    let Some((_, clause)) = text.split_once(" WHERE ") else {
        return Vec::new();
    };

    let mut names: Vec<String> = Vec::new();
    for token in clause.split(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '@')) {
        if let Some(name) = token.strip_prefix('@') {
            if !name.is_empty() && !names.iter().any(|seen| names_match(seen, name)) {
                names.push(name.to_string());
            }
        }
    }

    names
}

fn projection_columns(text: &str) -> Vec<String> {
    text.strip_prefix("SELECT ")
        .and_then(|rest| rest.split_once(" FROM "))
        .map(|(projection, _)| {
            projection
                .split(',')
                .map(|column| column.trim().to_string())
                .collect()
        })
        .unwrap_or_default()
}

fn project(row: &Row, columns: &[String]) -> Row {
    row.entries()
        .filter(|(name, _)| columns.iter().any(|column| names_match(column, name)))
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn where_names_are_extracted_once_each() {
        let names = where_param_names(
            "SELECT id FROM t WHERE (@id IS NULL OR id = @id) AND (@tag IS NULL OR tag = @tag)",
        );

        assert_eq!(names, ["id", "tag"]);
    }

    #[test]
    fn statements_without_a_predicate_have_no_where_names() {
        assert!(where_param_names("SELECT id FROM t").is_empty());
    }

    #[test]
    fn null_predicate_params_match_everything() {
        let row = Row::new().with("id", Value::Int(1));
        let wildcard = BoundParam::new("@id", "id", Value::Null);

        assert!(row_matches(&row, &[&wildcard]));
    }
}
