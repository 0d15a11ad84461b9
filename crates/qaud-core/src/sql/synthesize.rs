use crate::{
    descriptor::TypeDescriptor,
    sql::statement::{ParamSlot, Statement, StatementKind, StatementSet},
};

/// Build the full template set for one descriptor.
///
/// Only whitelisted (non-complex) fields appear in projections, column
/// lists, and parameter slots; complex fields never block a statement, they
/// are simply excluded. Key parameters are always bound by the adapter —
/// the unparameterized full scan is the separate `select_all` template, not
/// an unbound `select`.
#[must_use]
pub fn synthesize(descriptor: &TypeDescriptor) -> StatementSet {
    StatementSet {
        select: select(descriptor),
        select_all: select_all(descriptor),
        insert: insert(descriptor),
        update: update(descriptor),
        delete: delete(descriptor),
    }
}

/// Key predicate shared by select, update, and delete:
/// `(@K IS NULL OR K = @K) AND ...` in key-field order. The null-tolerant
/// form keeps the template text reusable by provider layers that probe
/// statements before binding; bound to a concrete value it behaves as plain
/// equality.
fn key_predicate(descriptor: &TypeDescriptor) -> (String, Vec<ParamSlot>) {
    let mut slots = Vec::with_capacity(descriptor.key_arity());
    let mut terms = Vec::with_capacity(descriptor.key_arity());

    for field in descriptor.key_fields() {
        let slot = ParamSlot::new(field.name, field.kind);
        terms.push(format!(
            "({param} IS NULL OR {column} = {param})",
            param = slot.name,
            column = field.name
        ));
        slots.push(slot);
    }

    if terms.is_empty() {
        (String::new(), slots)
    } else {
        (format!(" WHERE {}", terms.join(" AND ")), slots)
    }
}

fn projection(descriptor: &TypeDescriptor) -> String {
    descriptor
        .scalar_fields()
        .map(|field| field.name)
        .collect::<Vec<_>>()
        .join(", ")
}

fn select(descriptor: &TypeDescriptor) -> Statement {
    let (predicate, slots) = key_predicate(descriptor);

    Statement {
        kind: StatementKind::Select,
        text: format!(
            "SELECT {} FROM {}{}",
            projection(descriptor),
            descriptor.store_name(),
            predicate
        ),
        slots,
    }
}

fn select_all(descriptor: &TypeDescriptor) -> Statement {
    Statement {
        kind: StatementKind::SelectAll,
        text: format!(
            "SELECT {} FROM {}",
            projection(descriptor),
            descriptor.store_name()
        ),
        slots: Vec::new(),
    }
}

fn insert(descriptor: &TypeDescriptor) -> Statement {
    let slots: Vec<ParamSlot> = descriptor
        .scalar_fields()
        .map(|field| ParamSlot::new(field.name, field.kind))
        .collect();

    let columns = slots
        .iter()
        .map(|slot| slot.column)
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = slots
        .iter()
        .map(|slot| slot.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    Statement {
        kind: StatementKind::Insert,
        text: format!(
            "INSERT INTO {} ({columns}) VALUES ({placeholders})",
            descriptor.store_name()
        ),
        slots,
    }
}

fn update(descriptor: &TypeDescriptor) -> Statement {
    let mut slots: Vec<ParamSlot> = descriptor
        .data_fields()
        .iter()
        .filter(|field| field.kind.is_scalar())
        .map(|field| ParamSlot::new(field.name, field.kind))
        .collect();

    let assignments = slots
        .iter()
        .map(|slot| format!("{} = {}", slot.column, slot.name))
        .collect::<Vec<_>>()
        .join(", ");

    let (predicate, key_slots) = key_predicate(descriptor);
    slots.extend(key_slots);

    Statement {
        kind: StatementKind::Update,
        text: format!(
            "UPDATE {} SET {assignments}{predicate}",
            descriptor.store_name()
        ),
        slots,
    }
}

fn delete(descriptor: &TypeDescriptor) -> Statement {
    let (predicate, slots) = key_predicate(descriptor);

    Statement {
        kind: StatementKind::Delete,
        text: format!("DELETE FROM {}{predicate}", descriptor.store_name()),
        slots,
    }
}

///
/// TESTS
///
