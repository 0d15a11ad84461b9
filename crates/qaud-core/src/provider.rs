//! Relational collaborator boundary: the connection/command abstraction the
//! SQL adapter executes synthesized statements through. Drivers live outside
//! this crate and implement these traits; the adapter never sees a wire
//! protocol.

use crate::{row::Row, sql::BoundParam};
use thiserror::Error as ThisError;

///
/// ProviderError
/// Driver-level failure, opaque to the adapter beyond its message.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct ProviderError {
    message: String,
}

impl ProviderError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

///
/// ConnectionState
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConnectionState {
    Closed,
    Open,
    /// The underlying transport died; the handle must be replaced, not
    /// reopened.
    Broken,
}

///
/// Command
///
/// A command object: statement text plus its bound parameter list. Built by
/// the adapter from a synthesized template and per-call values; the
/// provider only executes it.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Command {
    pub text: String,
    pub params: Vec<BoundParam>,
}

impl Command {
    #[must_use]
    pub fn new(text: impl Into<String>, params: Vec<BoundParam>) -> Self {
        Self {
            text: text.into(),
            params,
        }
    }
}

///
/// DbProviderFactory
///
/// Creates connection handles for one backend family. A fresh handle with
/// the same connection string must be able to replace a broken one.
///

pub trait DbProviderFactory {
    type Connection: DbConnection;

    fn create_connection(&self, connection_string: &str)
    -> Result<Self::Connection, ProviderError>;
}

///
/// DbConnection
///
/// One physical connection. All command execution flows through the
/// connection so borrows stay simple; commands are plain data.
///

pub trait DbConnection {
    type Rows: RowCursor;

    fn state(&self) -> ConnectionState;

    fn open(&mut self) -> Result<(), ProviderError>;

    fn close(&mut self);

    /// Prepare a command against this connection (typed parameter sizing
    /// has already been derived into the command's parameters).
    fn prepare(&mut self, command: &Command) -> Result<(), ProviderError>;

    /// Execute a non-query command; returns the affected row count.
    fn execute(&mut self, command: &Command) -> Result<u64, ProviderError>;

    /// Execute a query command; returns a forward-only cursor.
    fn execute_reader(&mut self, command: &Command) -> Result<Self::Rows, ProviderError>;
}

///
/// RowCursor
///
/// Forward-only result cursor exposing column names and values, one row at
/// a time, as [`Row`]s.
///

pub trait RowCursor {
    fn columns(&self) -> &[String];

    fn next_row(&mut self) -> Result<Option<Row>, ProviderError>;
}
