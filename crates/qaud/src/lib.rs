//! QAUD — one CRUD contract (Query, Add, Update, Delete) over heterogeneous
//! storage substrates.
//!
//! Client code writes against [`store::DataStore`] and swaps substrates
//! without code changes: relational (via the provider traits), ORM-style
//! unit-of-work, in-process table, in-process keyed map, document database,
//! or schema-less document store. The engine underneath derives everything
//! from the shape of a record type: its identity fields, its row mapping,
//! its partial-update semantics, and — for the relational backend — its
//! parameterized CRUD statements.
//!
//! ## Crate layout
//! - `qaud-core`: the engine and the adapters (re-exported module-by-module
//!   here so derive output and user code share `qaud::...` paths).
//! - `qaud-derive`: the `Record`/`Fields`/`Nested` derives.

// module re-exports; derive output resolves `::qaud::...` through these
pub use qaud_core::{
    codec, descriptor, document, error, key, model, orm, patch, provider, row, sql, store, traits,
    types, value,
};

// derives
pub use qaud_derive::{Fields, Nested, Record};

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    // the derives share names with the traits they implement; macro and
    // type namespaces keep them apart, as with serde
    pub use qaud_core::prelude::*;
    pub use qaud_derive::{Fields, Nested, Record};
}
