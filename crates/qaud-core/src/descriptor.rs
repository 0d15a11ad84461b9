use crate::{
    model::{FieldModel, RecordModel},
    traits::Record,
};
use std::{
    any::TypeId,
    collections::HashMap,
    sync::{LazyLock, Mutex, PoisonError},
};

///
/// TypeDescriptor
///
/// Derived, cached metadata for one record type: the ordered key fields,
/// the ordered non-key fields, and the resolved store name. Computed once
/// per type and immutable for the process lifetime; computation is pure,
/// so redundant recomputation yields an identical result.
///

#[derive(Debug)]
pub struct TypeDescriptor {
    type_name: &'static str,
    store_name: &'static str,
    model: &'static RecordModel,
    key_fields: Vec<&'static FieldModel>,
    data_fields: Vec<&'static FieldModel>,
}

impl TypeDescriptor {
    /// Resolve (and memoize) the descriptor for `T`.
    pub fn resolve<T: Record>() -> &'static Self {
        static CACHE: LazyLock<Mutex<HashMap<TypeId, &'static TypeDescriptor>>> =
            LazyLock::new(|| Mutex::new(HashMap::new()));

        let mut cache = CACHE.lock().unwrap_or_else(PoisonError::into_inner);

        cache
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::leak(Box::new(Self::compute(T::MODEL))))
    }

    /// Pure descriptor computation over a static record model.
    ///
    /// Key discovery: fields carrying the identity marker; else a field
    /// named `ID`; else `<TypeName>ID`. Name comparisons are ASCII
    /// case-insensitive and ignore underscores, so `widget_id` satisfies
    /// `WidgetID`. No match leaves the key-field set empty — a valid
    /// result; operations that need identity fail at the point of use.
    #[must_use]
    pub fn compute(model: &'static RecordModel) -> Self {
        let mut key_fields: Vec<&'static FieldModel> =
            model.fields.iter().filter(|field| field.key).collect();

        if key_fields.is_empty() {
            key_fields = model
                .fields
                .iter()
                .filter(|field| names_equal(field.name, "ID"))
                .collect();
        }

        if key_fields.is_empty() {
            let type_key = format!("{}ID", model.type_name);
            key_fields = model
                .fields
                .iter()
                .filter(|field| names_equal(field.name, &type_key))
                .collect();
        }

        let data_fields = model
            .fields
            .iter()
            .filter(|field| !key_fields.iter().any(|key| key.name == field.name))
            .collect();

        Self {
            type_name: model.type_name,
            store_name: model.store_name.unwrap_or(model.type_name),
            model,
            key_fields,
            data_fields,
        }
    }

    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Physical table/collection name: the explicit marker override, else
    /// the bare type name.
    #[must_use]
    pub const fn store_name(&self) -> &'static str {
        self.store_name
    }

    #[must_use]
    pub fn key_fields(&self) -> &[&'static FieldModel] {
        &self.key_fields
    }

    #[must_use]
    pub fn data_fields(&self) -> &[&'static FieldModel] {
        &self.data_fields
    }

    /// Every field in declaration order.
    pub fn all_fields(&self) -> impl Iterator<Item = &'static FieldModel> {
        self.model.fields.iter()
    }

    /// Whitelisted (non-complex) fields in declaration order.
    pub fn scalar_fields(&self) -> impl Iterator<Item = &'static FieldModel> {
        self.model.fields.iter().filter(|field| field.kind.is_scalar())
    }

    #[must_use]
    pub fn key_arity(&self) -> usize {
        self.key_fields.len()
    }

    #[must_use]
    pub fn has_key(&self) -> bool {
        !self.key_fields.is_empty()
    }

    /// The generated-identity key field, if one is declared.
    #[must_use]
    pub fn generated_key_field(&self) -> Option<&'static FieldModel> {
        self.key_fields.iter().copied().find(|field| field.generated)
    }
}

/// ASCII case-insensitive, underscore-insensitive name comparison.
fn names_equal(left: &str, right: &str) -> bool {
    let mut l = left.bytes().filter(|b| *b != b'_');
    let mut r = right.bytes().filter(|b| *b != b'_');

    loop {
        match (l.next(), r.next()) {
            (None, None) => return true,
            (Some(a), Some(b)) if a.eq_ignore_ascii_case(&b) => {}
            _ => return false,
        }
    }
}

///
/// TESTS
///
