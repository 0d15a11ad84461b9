use crate::model::FieldKind;

///
/// StatementKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StatementKind {
    Select,
    SelectAll,
    Insert,
    Update,
    Delete,
}

///
/// ParamSlot
///
/// One parameter position in a synthesized template: the `@`-prefixed
/// placeholder name, the record field it sources from, and the field's
/// declared type tag. Slots are ordered exactly as their placeholders
/// appear in the statement text.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParamSlot {
    pub name: String,
    pub column: &'static str,
    pub kind: FieldKind,
}

impl ParamSlot {
    #[must_use]
    pub fn new(column: &'static str, kind: FieldKind) -> Self {
        Self {
            name: format!("@{column}"),
            column,
            kind,
        }
    }
}

///
/// Statement
///
/// A parameterized command template. The template shape is invariant for a
/// given type descriptor; only parameter values change between calls, so
/// templates are synthesized once and cached per adapter.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Statement {
    pub kind: StatementKind,
    pub text: String,
    pub slots: Vec<ParamSlot>,
}

impl Statement {
    /// Find a slot by name, tolerating case differences and an optional
    /// `@` marker prefix on either side.
    #[must_use]
    pub fn slot(&self, name: &str) -> Option<&ParamSlot> {
        self.slots.iter().find(|slot| names_match(&slot.name, name))
    }
}

///
/// StatementSet
/// The full template set for one record type against one store name.
///

#[derive(Clone, Debug)]
pub struct StatementSet {
    pub select: Statement,
    pub select_all: Statement,
    pub insert: Statement,
    pub update: Statement,
    pub delete: Statement,
}

/// Parameter-name equality: ASCII case-insensitive, ignoring an optional
/// leading `@` on either operand (`name`, `Name`, and `@name` all match).
#[must_use]
pub fn names_match(left: &str, right: &str) -> bool {
    let left = left.strip_prefix('@').unwrap_or(left);
    let right = right.strip_prefix('@').unwrap_or(right);

    left.eq_ignore_ascii_case(right)
}

///
/// TESTS
///
