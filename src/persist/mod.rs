//! Durable key-value storage for store state.
//!
//! Two keys are persisted:
//! - `credits`: decimal string of the balance
//! - `purchased`: JSON array of template ids

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::path::PathBuf;
use thiserror::Error;

/// Key holding the credit balance.
pub const CREDITS_KEY: &str = "credits";
/// Key holding the owned template ids.
pub const PURCHASED_KEY: &str = "purchased";

/// Errors raised by a durable store.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Failed to access state file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("State file '{path}' is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("State file '{path}' is in use by another session")]
    Locked { path: PathBuf },

    #[error("Stored value for '{key}' is invalid: {value:?}")]
    InvalidValue { key: String, value: String },

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// String-keyed durable storage.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError>;

    /// Replace the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), PersistError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistError> {
        (**self).remove(key)
    }
}

/// A persistence problem that did not fail the operation that caused it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistWarning {
    /// Key that could not be read or written.
    pub key: &'static str,
    pub message: String,
}
