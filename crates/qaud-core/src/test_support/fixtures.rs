//! Record fixtures shared by the unit tests and the adapter suites.

use crate::types::Timestamp;
use qaud_derive::{Fields, Nested, Record};

///
/// Comment
/// Nested structure carried by [`FooRecord`]'s complex field.
///

#[derive(Clone, Debug, Default, Nested, PartialEq)]
pub(crate) struct Comment {
    pub id: i64,
    pub author: String,
    pub message: String,
}

///
/// FooRecord
/// The canonical end-to-end fixture: explicit identity marker, a date/time
/// scalar, two text scalars, and one complex field.
///

#[derive(Clone, Debug, Default, PartialEq, Record)]
pub(crate) struct FooRecord {
    #[record(key)]
    pub id: i64,
    pub create_date: Timestamp,
    pub title: String,
    pub content: String,
    pub comments: Vec<Comment>,
}

///
/// FooPatch
/// Typed partial for [`FooRecord`]: key plus one updatable field.
///

#[derive(Clone, Debug, Default, Fields, PartialEq)]
pub(crate) struct FooPatch {
    pub id: i64,
    pub content: String,
}

///
/// NoteRecord
/// All-scalar fixture for statement-synthesis assertions.
///

#[derive(Clone, Debug, Default, PartialEq, Record)]
pub(crate) struct NoteRecord {
    #[record(key)]
    pub id: i64,
    pub title: String,
    pub content: String,
}

/// No marker anywhere: key discovery falls back to the field named `ID`.
#[derive(Clone, Debug, Default, PartialEq, Record)]
pub(crate) struct PlainRecord {
    pub id: i64,
    pub name: String,
}

/// No marker and no `ID` field: the `<TypeName>ID` fallback applies.
#[derive(Clone, Debug, Default, PartialEq, Record)]
pub(crate) struct Widget {
    pub widget_id: i64,
    pub label: String,
}

/// No discoverable key at all — a valid, keyless type.
#[derive(Clone, Debug, Default, PartialEq, Record)]
pub(crate) struct Anon {
    pub name: String,
}

/// Composite identity: two marked fields, declaration order significant.
#[derive(Clone, Debug, Default, PartialEq, Record)]
pub(crate) struct Pairing {
    #[record(key)]
    pub left_id: i64,
    #[record(key)]
    pub right_id: i64,
    pub weight: f64,
}

/// Store-generated integer identity.
#[derive(Clone, Debug, Default, PartialEq, Record)]
pub(crate) struct Counted {
    #[record(key, generated)]
    pub id: i64,
    pub label: String,
}

/// Store-generated text identity.
#[derive(Clone, Debug, Default, PartialEq, Record)]
pub(crate) struct Tagged {
    #[record(key, generated)]
    pub id: String,
    pub note: String,
}

/// Explicit store-name marker.
#[derive(Clone, Debug, Default, PartialEq, Record)]
#[record(store = "stamps")]
pub(crate) struct StampRecord {
    #[record(key)]
    pub id: i64,
    pub label: String,
}

/// Deterministic, fully populated [`FooRecord`] keyed by `id`.
pub(crate) fn fixture_foo(id: i64) -> FooRecord {
    FooRecord {
        id,
        create_date: Timestamp::from_unix_nanos(1_700_000_000_000_000_000 + id),
        title: format!("title-{id}"),
        content: format!("content-{id}"),
        comments: vec![
            Comment {
                id: id * 10,
                author: format!("author-{id}"),
                message: "first".to_string(),
            },
            Comment {
                id: id * 10 + 1,
                author: format!("author-{id}"),
                message: "second".to_string(),
            },
        ],
    }
}
