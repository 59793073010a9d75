//! Durable state across store instances, backed by the JSON file store.

use std::fs;

use stylecart::catalog::{Catalog, TemplateId};
use stylecart::persist::{FileStore, KeyValueStore, PersistError, CREDITS_KEY, PURCHASED_KEY};
use stylecart::store::{Store, StoreSettings};
use tempfile::TempDir;

fn open_store(dir: &TempDir) -> Store {
    let backend = FileStore::open(dir.path().join("state.json")).expect("open state file");
    Store::open(Catalog::builtin(), backend, StoreSettings::default())
}

#[test]
fn purchases_survive_a_restart() {
    let dir = TempDir::new().expect("tempdir");
    {
        let mut store = open_store(&dir);
        store.add_by_id(TemplateId(2)).expect("add");
        store.add_by_id(TemplateId(6)).expect("add");
        store.add_by_id(TemplateId(8)).expect("add");
        store.remove_from_cart(TemplateId(8)).expect("remove");
        store.checkout().expect("checkout");
        assert!(store.take_warnings().is_empty());
    }

    let store = open_store(&dir);
    assert_eq!(store.credits(), 120);
    assert_eq!(
        store.purchased().iter().copied().collect::<Vec<_>>(),
        vec![TemplateId(2), TemplateId(6)]
    );
    // The cart is session-only.
    assert!(store.cart().is_empty());
}

#[test]
fn state_file_uses_documented_encodings() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("state.json");
    {
        let mut store = open_store(&dir);
        store.add_by_id(TemplateId(5)).expect("add");
        store.add_by_id(TemplateId(3)).expect("add");
        store.checkout().expect("checkout");
    }

    let raw = fs::read_to_string(&path).expect("read state");
    let map: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(&raw).expect("state is a JSON object");
    assert_eq!(map[CREDITS_KEY], serde_json::json!("100"));
    assert_eq!(map[PURCHASED_KEY], serde_json::json!("[3,5]"));
}

#[test]
fn reset_clears_the_state_file() {
    let dir = TempDir::new().expect("tempdir");
    {
        let mut store = open_store(&dir);
        store.add_by_id(TemplateId(4)).expect("add");
        store.checkout().expect("checkout");
        store.reset().expect("reset");
    }

    let backend = FileStore::open(dir.path().join("state.json")).expect("reopen");
    assert_eq!(backend.get(CREDITS_KEY).expect("get"), None);
    assert_eq!(backend.get(PURCHASED_KEY).expect("get"), None);

    let store = Store::open(Catalog::builtin(), backend, StoreSettings::default());
    assert_eq!(store.credits(), 500);
    assert!(store.purchased().is_empty());
}

#[test]
fn corrupt_state_file_falls_back_to_defaults() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(dir.path().join("state.json"), "{ not json").expect("write");

    let mut store = open_store(&dir);
    assert_eq!(store.credits(), 500);
    assert!(store.purchased().is_empty());
    assert_eq!(store.take_warnings().len(), 2);

    // The next write replaces the corrupt file.
    store.add_by_id(TemplateId(7)).expect("add");
    store.checkout().expect("checkout");
    assert!(store.take_warnings().is_empty());
    drop(store);

    let store = open_store(&dir);
    assert_eq!(store.credits(), 350);
    assert!(store.is_purchased(TemplateId(7)));
}

#[test]
fn invalid_values_fall_back_individually() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(
        dir.path().join("state.json"),
        r#"{"credits": "12.5", "purchased": "[1, 4]"}"#,
    )
    .expect("write");

    let mut store = open_store(&dir);
    assert_eq!(store.credits(), 500);
    assert!(store.is_purchased(TemplateId(1)));
    assert!(store.is_purchased(TemplateId(4)));

    let warnings = store.take_warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].key, CREDITS_KEY);
}

#[test]
fn second_session_on_same_file_is_refused() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("state.json");
    let _first = FileStore::open(&path).expect("first open");

    match FileStore::open(&path) {
        Err(PersistError::Locked { path: locked }) => assert_eq!(locked, path),
        Err(other) => panic!("expected Locked, got {other}"),
        Ok(_) => panic!("second open should be refused"),
    }
}

#[test]
fn lock_is_released_on_drop() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("state.json");
    drop(FileStore::open(&path).expect("first open"));
    FileStore::open(&path).expect("reopen after drop");
}

#[test]
fn missing_parent_directories_are_created() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("nested").join("deeper").join("state.json");
    let mut backend = FileStore::open(&path).expect("open");
    backend.set(CREDITS_KEY, "75").expect("set");
    assert!(path.exists());
    assert_eq!(backend.path(), path.as_path());
}
