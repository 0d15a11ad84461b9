///
/// RecordModel
///
/// Static, build-time schema table for one record type, emitted by
/// `#[derive(Record)]`. This is the whole input to descriptor resolution —
/// no runtime type introspection happens anywhere downstream.
///

#[derive(Debug)]
pub struct RecordModel {
    /// Bare type name (also the default store/table/collection name).
    pub type_name: &'static str,
    /// Explicit store-name override from the declarative marker, if any.
    pub store_name: Option<&'static str>,
    /// Ordered field list (authoritative: declaration order).
    pub fields: &'static [FieldModel],
}

///
/// FieldModel
/// Declared facts about one field: name, type tag, and markers.
///

#[derive(Debug)]
pub struct FieldModel {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Carries the explicit identity marker.
    pub key: bool,
    /// Carries the generated-value marker with the identity strategy.
    pub generated: bool,
}

///
/// FieldKind
///
/// Lossy projection of a field's Rust type onto the value surface. The
/// scalar kinds are exactly the statement-synthesis whitelist; `List` and
/// `Document` are complex and excluded from synthesized statements.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldKind {
    Bool,
    Int,
    Uint,
    Float,
    Text,
    Timestamp,
    List,
    Document,
}

impl FieldKind {
    #[must_use]
    pub const fn is_scalar(self) -> bool {
        matches!(
            self,
            Self::Bool | Self::Int | Self::Uint | Self::Float | Self::Text | Self::Timestamp
        )
    }

    #[must_use]
    pub const fn is_complex(self) -> bool {
        !self.is_scalar()
    }

    #[must_use]
    pub const fn is_integer(self) -> bool {
        matches!(self, Self::Int | Self::Uint)
    }
}
