//! Derive macros for QAUD record types.
//!
//! - `#[derive(Record)]` — full record mapping: the static `RecordModel`
//!   (with `#[record(key)]`, `#[record(generated)]`, and
//!   `#[record(store = "...")]` markers), field reads, and field writes.
//! - `#[derive(Fields)]` — field reads only, for typed partial-change
//!   shapes.
//! - `#[derive(Nested)]` — `FieldValue` for embedded structs, mapped to
//!   document-valued cells.

use proc_macro::TokenStream;

mod fields;
mod nested;
mod record;
mod util;

#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    record::expand(input.into()).into()
}

#[proc_macro_derive(Fields)]
pub fn derive_fields(input: TokenStream) -> TokenStream {
    fields::expand(input.into()).into()
}

#[proc_macro_derive(Nested)]
pub fn derive_nested(input: TokenStream) -> TokenStream {
    nested::expand(input.into()).into()
}
