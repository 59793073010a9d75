//! Shared test utilities.

#![allow(dead_code, unused_imports)]

use std::path::PathBuf;
use std::time::Duration;

use stylecart::catalog::{Catalog, TemplateDescriptor, TemplateId};
use stylecart::persist::{MemoryStore, CREDITS_KEY, PURCHASED_KEY};
use stylecart::store::{Store, StoreSettings};
use stylecart::ui::App;
use tempfile::TempDir;

// -- Store helpers ------------------------------------------------------------

/// Store over a fresh in-memory backend with the built-in catalog.
pub fn fresh_store() -> (Store, MemoryStore) {
    store_with_entries(&[])
}

/// Store seeded from the given persisted entries. The returned backend
/// shares state with the one inside the store.
pub fn store_with_entries(entries: &[(&str, &str)]) -> (Store, MemoryStore) {
    let backend = MemoryStore::with_entries(entries.iter().copied());
    let store = Store::open(
        Catalog::builtin(),
        backend.clone(),
        StoreSettings::default(),
    );
    (store, backend)
}

/// Store starting from `credits` and owning `purchased`.
pub fn store_with(credits: u64, purchased: &[u32]) -> (Store, MemoryStore) {
    let credits = credits.to_string();
    let purchased = serde_json::to_string(purchased).expect("serialize ids");
    store_with_entries(&[(CREDITS_KEY, credits.as_str()), (PURCHASED_KEY, purchased.as_str())])
}

/// Catalog entry for `id`, as a presentation layer would hand it over.
pub fn template(id: u32) -> TemplateDescriptor {
    Catalog::builtin()
        .get(TemplateId(id))
        .cloned()
        .expect("built-in template")
}

pub fn ids(values: &[u32]) -> Vec<TemplateId> {
    values.iter().copied().map(TemplateId).collect()
}

// -- Config helpers -----------------------------------------------------------

/// Write `content` to a `config.toml` in a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

// -- App helpers --------------------------------------------------------------

pub const TEST_CHECKOUT_DELAY: Duration = Duration::from_millis(1500);

pub fn make_app() -> (App, MemoryStore) {
    let (store, backend) = fresh_store();
    (App::new(store, TEST_CHECKOUT_DELAY), backend)
}

pub fn make_app_with(credits: u64, purchased: &[u32]) -> (App, MemoryStore) {
    let (store, backend) = store_with(credits, purchased);
    (App::new(store, TEST_CHECKOUT_DELAY), backend)
}
