use crate::{
    document::DocumentError, key::Key, orm::ContextError, provider::ProviderError,
    traits::FieldWriteError,
};
use thiserror::Error as ThisError;

///
/// StoreError
///
/// The single failure surface of every store operation. All variants are
/// local, synchronous failures surfaced to the immediate caller; nothing is
/// retried automatically except the one reopen-on-broken connection step,
/// which the relational adapter attempts exactly once per call before
/// surfacing `ConnectionFailure`.
///

#[remain::sorted]
#[derive(Debug, ThisError)]
pub enum StoreError {
    /// The backend itself rejected an operation (driver/client error).
    #[error("backend error: {message}")]
    Backend { message: String },

    /// Opening or reopening the physical connection failed.
    #[error("connection failure: {message}")]
    ConnectionFailure { message: String },

    /// An added record's key already addresses a stored record.
    #[error("duplicate key in '{store}': {key}")]
    DuplicateKey { store: String, key: String },

    /// A row value could not coerce into the typed field it names.
    #[error("{type_name}: field '{field}' cannot accept {found} (expected {expected})")]
    FieldMismatch {
        type_name: &'static str,
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A supplied key tuple disagrees with the type's key-field count.
    #[error("key arity mismatch for {type_name}: expected {expected}, found {found}")]
    KeyArityMismatch {
        type_name: &'static str,
        expected: usize,
        found: usize,
    },

    /// The operation requires identity but the type has no key fields.
    #[error("record type {type_name} has no key fields")]
    MissingKey { type_name: &'static str },

    /// The addressed record is absent from the store.
    #[error("record not found in '{store}': {key}")]
    NotFound { store: String, key: String },

    /// A row carries a name with no corresponding record field.
    #[error("row field '{field}' has no matching field on {type_name}")]
    UnknownRowField {
        type_name: &'static str,
        field: String,
    },

    /// A capability-gated behavior was invoked on an adapter that reports
    /// the capability as unsupported.
    #[error("adapter does not support {capability}")]
    UnsupportedCapability { capability: &'static str },
}

impl StoreError {
    #[must_use]
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn connection_failure(source: &ProviderError) -> Self {
        Self::ConnectionFailure {
            message: source.to_string(),
        }
    }

    #[must_use]
    pub fn duplicate_key(store: &str, key: &Key) -> Self {
        Self::DuplicateKey {
            store: store.to_string(),
            key: key.to_string(),
        }
    }

    #[must_use]
    pub fn not_found(store: &str, key: &Key) -> Self {
        Self::NotFound {
            store: store.to_string(),
            key: key.to_string(),
        }
    }

    #[must_use]
    pub const fn missing_key(type_name: &'static str) -> Self {
        Self::MissingKey { type_name }
    }

    /// Map a field-write failure onto the store taxonomy for `type_name`.
    #[must_use]
    pub fn from_field_write(type_name: &'static str, err: FieldWriteError) -> Self {
        match err {
            FieldWriteError::UnknownField { field } => Self::UnknownRowField { type_name, field },
            FieldWriteError::Mismatch { field, source } => Self::FieldMismatch {
                type_name,
                field,
                expected: source.expected,
                found: source.found,
            },
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<ProviderError> for StoreError {
    fn from(err: ProviderError) -> Self {
        Self::backend(err.to_string())
    }
}

impl From<DocumentError> for StoreError {
    fn from(err: DocumentError) -> Self {
        Self::backend(err.to_string())
    }
}

impl From<ContextError> for StoreError {
    fn from(err: ContextError) -> Self {
        Self::backend(err.to_string())
    }
}
