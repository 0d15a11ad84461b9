//! Scenario suites every adapter must pass, expressed once against the
//! facade contract.

use crate::{
    error::StoreError,
    key::Key,
    patch::ChangeSet,
    row::Row,
    store::{Capabilities, DataStore},
    test_support::fixtures::{FooPatch, FooRecord, fixture_foo},
    value::Value,
};

fn assert_foo_matches(caps: Capabilities, actual: &FooRecord, expected: &FooRecord) {
    assert_eq!(actual.id, expected.id);
    assert_eq!(actual.title, expected.title);
    assert_eq!(actual.content, expected.content);
    assert_eq!(actual.create_date, expected.create_date);

    if caps.complex_structures {
        assert_eq!(actual.comments, expected.comments);
    }
}

/// End-to-end scenario: add → get → update → partial update (typed and
/// raw-row forms) → delete, with the loud-failure contract checked along
/// the way.
pub(crate) fn simple_suite<S: DataStore<FooRecord>>(store: &mut S) {
    let caps = store.capabilities();

    // create yields a fresh default instance
    assert_eq!(store.create(), FooRecord::default());

    // add, then read back by key and by sample
    let item = fixture_foo(1);
    let added = store.add(item.clone()).expect("add should succeed");
    assert_eq!(added.id, 1);
    store.save_changes().expect("flush should succeed");

    let loaded = store
        .get(&Key::single(1i64))
        .expect("get should succeed")
        .expect("added record should be found");
    assert_foo_matches(caps, &loaded, &item);

    let matched = store
        .get_match(&item)
        .expect("get_match should succeed")
        .expect("sample lookup should find the record");
    assert_eq!(matched.id, 1);

    // absent key reads as None, not an error
    assert!(
        store
            .get(&Key::single(404i64))
            .expect("get should succeed")
            .is_none()
    );

    // full update
    let mut changed = loaded;
    changed.content = "Modified".to_string();
    store.update(&changed).expect("update should succeed");
    store.save_changes().expect("flush should succeed");

    let reloaded = store
        .get(&Key::single(1i64))
        .expect("get should succeed")
        .expect("updated record should be found");
    assert_eq!(reloaded.content, "Modified");
    assert_eq!(reloaded.title, item.title, "unrelated fields survive update");

    // partial update from a typed partial
    let merged = store
        .update_partial(&ChangeSet::from_partial(&FooPatch {
            id: 1,
            content: "C".to_string(),
        }))
        .expect("partial update should succeed");
    store.save_changes().expect("flush should succeed");
    assert_eq!(merged.content, "C");
    assert_eq!(merged.title, item.title, "unlisted fields stay untouched");

    // partial update from a raw row
    store
        .update_partial(&ChangeSet::from_row(
            Row::new()
                .with("id", Value::Int(1))
                .with("title", Value::Text("Renamed".into())),
        ))
        .expect("row-form partial update should succeed");
    store.save_changes().expect("flush should succeed");

    let after_partials = store
        .get(&Key::single(1i64))
        .expect("get should succeed")
        .expect("record should still exist");
    assert_eq!(after_partials.title, "Renamed");
    assert_eq!(after_partials.content, "C", "earlier partial survives");

    // partial update addressing an absent key fails loudly
    let err = store
        .update_partial(&ChangeSet::from_row(
            Row::new()
                .with("id", Value::Int(404))
                .with("title", Value::Text("x".into())),
        ))
        .expect_err("partial update of a missing record must fail");
    assert!(err.is_not_found());

    // arity mismatch fails loudly and mutates nothing
    let err = store
        .delete(&Key::new(vec![Value::Int(1), Value::Int(2)]))
        .expect_err("two key values against one key field must fail");
    assert!(matches!(err, StoreError::KeyArityMismatch { .. }));
    assert!(
        store
            .get(&Key::single(1i64))
            .expect("get should succeed")
            .is_some(),
        "failed delete must not mutate the store"
    );

    // delete by item, then the record is gone
    store
        .delete_item(&after_partials)
        .expect("delete should succeed");
    store.save_changes().expect("flush should succeed");
    assert!(
        store
            .get(&Key::single(1i64))
            .expect("get should succeed")
            .is_none()
    );

    // deleting it again is NotFound
    let err = store
        .delete(&Key::single(1i64))
        .expect_err("deleting an absent record must fail");
    assert!(err.is_not_found());
}

/// Bulk scenario: 25 distinct keys in, a full scan returns exactly those 25
/// back (order not guaranteed), then range update and range delete.
pub(crate) fn bulk_suite<S: DataStore<FooRecord>>(store: &mut S) {
    let items: Vec<FooRecord> = (1..=25).map(fixture_foo).collect();

    store
        .add_range(items.clone())
        .expect("bulk add should succeed");
    store.save_changes().expect("flush should succeed");

    let mut keys: Vec<i64> = store
        .query()
        .expect("scan should succeed")
        .map(|item| item.id)
        .collect();
    keys.sort_unstable();
    assert_eq!(keys, (1..=25).collect::<Vec<i64>>());

    // client-side filtering over the scan
    let high: Vec<FooRecord> = store
        .query()
        .expect("scan should succeed")
        .filter(|item| item.id > 20)
        .collect();
    assert_eq!(high.len(), 5);

    // bulk update
    let renamed: Vec<FooRecord> = items
        .iter()
        .cloned()
        .map(|mut item| {
            item.content = "bulk".to_string();
            item
        })
        .collect();
    store
        .update_range(renamed)
        .expect("bulk update should succeed");
    store.save_changes().expect("flush should succeed");
    assert!(
        store
            .query()
            .expect("scan should succeed")
            .all(|item| item.content == "bulk")
    );

    // bulk delete leaves an empty store
    store
        .delete_range(items)
        .expect("bulk delete should succeed");
    store.save_changes().expect("flush should succeed");
    assert_eq!(store.query().expect("scan should succeed").count(), 0);
}

/// Deferred writes are capability-gated: adapters without queue support
/// must reject `set_auto_save(false)` and accept the no-op `true`.
pub(crate) fn queue_changes_is_gated<S: DataStore<FooRecord>>(store: &mut S) {
    assert!(!store.capabilities().queue_changes);
    assert!(store.auto_save());

    let err = store
        .set_auto_save(false)
        .expect_err("queueing must be rejected without the capability");
    assert!(matches!(err, StoreError::UnsupportedCapability { .. }));

    store
        .set_auto_save(true)
        .expect("enabling auto-save is always a no-op");
}
