// The checked-in generated store, driven against both containers.

use std::sync::Arc;

use assert_matches::assert_matches;
use sdata::prelude::*;

mod common;

use common::{User, UserStore, sample_users};

fn filled<C: Container>(container: C) -> UserStore<C> {
    common::init_logging();
    let store = UserStore::new(container);
    store.init().unwrap();
    for user in sample_users() {
        store.insert(&user).unwrap();
    }
    store
}

#[test]
fn table_is_named_after_the_type() {
    let store = UserStore::new(MemoryContainer::new());
    assert_eq!(UserStore::<MemoryContainer>::TABLE, "User");
    assert_eq!(store.table(), "User");
}

#[test]
fn insert_keys_by_the_primary_key_field() {
    let store = filled(MemoryContainer::new());
    let keys: Vec<String> = store
        .container()
        .select(UserStore::<MemoryContainer>::TABLE)
        .unwrap()
        .into_keys()
        .collect();
    assert_eq!(keys, ["1", "2", "3"]);

    // Two users sharing a name are still distinct entries.
    store.insert(&User::new("4", "Alice", 9)).unwrap();
    assert_eq!(store.select_where(|u| u.name == "Alice").unwrap().len(), 2);
}

#[test]
fn derived_record_agrees_with_the_store_key() {
    let store = filled(MemoryContainer::new());
    for user in store.select_all().unwrap() {
        let table = store.container().select("User").unwrap();
        assert!(table.contains_key(user.primary_key()));
    }
}

#[test]
fn select_all_returns_what_was_inserted() {
    let store = filled(MemoryContainer::new());
    assert_eq!(store.select_all().unwrap(), sample_users());
}

#[test]
fn select_where_and_first_or_none() {
    let store = filled(MemoryContainer::new());

    let adults = store.select_where(|u| u.age >= 18).unwrap();
    let names: Vec<&str> = adults.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, ["Alice", "Carol"]);

    let minimum = 50;
    let senior = store.first_or_none(|u| u.age > minimum).unwrap();
    assert_eq!(senior.map(|u| u.id), Some("3".to_string()));

    assert_eq!(store.first_or_none(|u| u.age > 200).unwrap(), None);
}

#[test]
fn execute_accepts_prepared_queries() {
    let store = filled(MemoryContainer::new());
    let minors = Query::filtered(UserStore::<MemoryContainer>::TABLE, |u: &User| u.age < 18);
    assert_eq!(
        store.execute(&minors).unwrap(),
        Selection::Many(vec![User::new("2", "Bob", 17)])
    );

    let first = Query::<User>::first(UserStore::<MemoryContainer>::TABLE, None);
    assert_eq!(
        store.execute(&first).unwrap().into_first(),
        Some(User::new("1", "Alice", 34))
    );
}

#[test]
fn duplicate_insert_keeps_the_first_value() {
    let store = filled(MemoryContainer::new());
    let err = store.create(&User::new("1", "Mallory", 1)).unwrap_err();
    assert!(err.is_duplicate_key());
    assert_eq!(
        store.first_or_none(|u| u.id == "1").unwrap(),
        Some(User::new("1", "Alice", 34))
    );
}

#[test]
fn delete_twice_reports_true_then_false() {
    let store = filled(MemoryContainer::new());
    assert!(store.delete("2").unwrap());
    assert!(!store.delete("2").unwrap());
    assert_eq!(store.select_all().unwrap().len(), 2);

    let empty = UserStore::new(MemoryContainer::new());
    assert!(!empty.delete("2").unwrap());
    assert!(empty.select_all().unwrap().is_empty());
}

#[test]
fn select_by_query_string_is_unsupported() {
    let store = filled(MemoryContainer::new());
    assert_matches!(
        store.select("age > 18"),
        Err(StoreError::UnsupportedQuery { container: "MemoryContainer", .. })
    );
}

#[test]
fn foreign_payloads_fail_the_whole_select() {
    let store = filled(MemoryContainer::new());
    store
        .container()
        .insert("User", "0", b"{\"unexpected\":true}".to_vec())
        .unwrap();
    assert_matches!(
        store.select_all(),
        Err(StoreError::Decode { ref key, .. }) if key == "0"
    );
    assert_matches!(
        store.first_or_none(|_| true),
        Err(StoreError::Decode { .. })
    );
}

#[test]
fn file_backed_store_persists_across_instances() {
    let (_dir, path, container) = common::temp_file_container("users.json");
    let store = filled(container);
    assert!(store.delete("2").unwrap());
    drop(store);

    let reopened = UserStore::new(FileContainer::new(&path));
    assert_eq!(
        reopened.select_all().unwrap(),
        vec![User::new("1", "Alice", 34), User::new("3", "Carol", 52)]
    );
    assert_matches!(
        reopened.insert(&User::new("3", "Dup", 0)),
        Err(StoreError::DuplicateKey { .. })
    );
}

#[test]
fn stores_work_over_shared_and_boxed_containers() {
    let shared = Arc::new(MemoryContainer::new());
    let writer = filled(Arc::clone(&shared));
    let reader = UserStore::new(Arc::clone(&shared));
    assert_eq!(reader.select_all().unwrap(), writer.select_all().unwrap());

    let container: Box<dyn Container> = Box::new(MemoryContainer::new());
    let boxed = UserStore::new(container);
    boxed.insert(&User::new("9", "Zed", 40)).unwrap();
    assert_eq!(boxed.select_all().unwrap().len(), 1);

    let borrowed = UserStore::new(&*shared);
    assert_eq!(borrowed.select_all().unwrap().len(), 3);
}

#[derive(Record)]
struct Tag(#[data(primary_key)] String, u32);

#[derive(Record)]
struct Borrowing<'a, T: Clone> {
    #[data = "primary_key"]
    key: std::string::String,
    value: &'a T,
}

#[test]
fn derive_handles_tuple_and_generic_structs() {
    let tag = Tag("rust".to_string(), 3);
    assert_eq!(tag.primary_key(), "rust");
    assert_eq!(tag.1, 3);

    let value = 7u8;
    let borrowing = Borrowing {
        key: "k".to_string(),
        value: &value,
    };
    assert_eq!(borrowing.primary_key(), "k");
    assert_eq!(*borrowing.value, 7);
}
