use crate::{
    descriptor::TypeDescriptor,
    error::StoreError,
    key::{Key, ensure_arity},
    row::Row,
    sql::statement::{Statement, names_match},
    value::Value,
};

///
/// BoundParam
///
/// One parameter slot with its per-call value and derived size. Variable-
/// length text sizing mirrors typed parameter APIs: the value's length,
/// minimum 1 for empty or null text; non-text parameters carry size 0.
///

#[derive(Clone, Debug, PartialEq)]
pub struct BoundParam {
    pub name: String,
    pub column: String,
    pub value: Value,
    pub size: usize,
}

impl BoundParam {
    #[must_use]
    pub fn new(name: impl Into<String>, column: impl Into<String>, value: Value) -> Self {
        let size = text_size(&value);

        Self {
            name: name.into(),
            column: column.into(),
            value,
            size,
        }
    }
}

fn text_size(value: &Value) -> usize {
    match value.text_len() {
        Some(len) => len.max(1),
        None if value.is_null() => 1,
        None => 0,
    }
}

/// Bind every slot of `statement` from `row`.
///
/// Row names are matched case-insensitively with `@`-prefix tolerance. A
/// slot the row does not cover — or covers with a complex value, which is
/// skipped at bind time — binds the null marker.
#[must_use]
pub fn bind_row(statement: &Statement, row: &Row) -> Vec<BoundParam> {
    statement
        .slots
        .iter()
        .map(|slot| {
            let value = row
                .entries()
                .find(|(name, _)| names_match(name, slot.column))
                .map(|(_, value)| value.clone())
                .filter(|value| !value.is_complex())
                .unwrap_or(Value::Null);

            BoundParam::new(slot.name.clone(), slot.column, value)
        })
        .collect()
}

/// Bind a key tuple positionally onto the key slots of `statement`.
///
/// The tuple's arity must equal the descriptor's key-field count;
/// key slots were synthesized in key-field order, so the binding is
/// deterministic.
pub fn bind_key(
    statement: &Statement,
    descriptor: &TypeDescriptor,
    key: &Key,
) -> Result<Vec<BoundParam>, StoreError> {
    ensure_arity(descriptor, key)?;

    let bound = statement
        .slots
        .iter()
        .zip(key.values())
        .map(|(slot, value)| BoundParam::new(slot.name.clone(), slot.column, value.clone()))
        .collect();

    Ok(bound)
}

///
/// TESTS
///
