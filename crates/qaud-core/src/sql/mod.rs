//! Statement synthesis for the relational backend: four CRUD templates (plus
//! the explicit full scan) derived purely from a type descriptor, and the
//! per-call binding of row/key values onto their parameter slots.

mod bind;
mod statement;
mod synthesize;

pub use bind::{BoundParam, bind_key, bind_row};
pub use statement::{ParamSlot, Statement, StatementKind, StatementSet, names_match};
pub use synthesize::synthesize;
