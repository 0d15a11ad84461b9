//! Core runtime for QAUD: record models, rows, keys, the row codec, the SQL
//! statement synthesizer, and one store adapter per backend behind a common
//! capability-reporting `DataStore` contract.

// derive output refers to `::qaud::...`; inside this crate that name must
// resolve to ourselves (downstream code gets it from the facade crate)
extern crate self as qaud;

pub mod codec;
pub mod descriptor;
pub mod document;
pub mod error;
pub mod key;
pub mod model;
pub mod orm;
pub mod patch;
pub mod provider;
pub mod row;
pub mod sql;
pub mod store;
pub mod traits;
pub mod types;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, adapters, synthesizers, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        key::Key,
        patch::ChangeSet,
        row::Row,
        store::{Capabilities, DataStore},
        traits::{Fields, Record},
        types::Timestamp,
        value::Value,
    };
}
