use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::persist::{KeyValueStore, PersistError};

#[derive(Default)]
struct Inner {
    values: HashMap<String, String>,
    fail_reads: bool,
    fail_writes: bool,
    /// Writes left before `fail_writes` switches on.
    writes_before_failure: Option<usize>,
}

impl Inner {
    fn write_refused(&mut self) -> bool {
        if let Some(remaining) = self.writes_before_failure {
            match remaining.checked_sub(1) {
                Some(left) => self.writes_before_failure = Some(left),
                None => {
                    self.writes_before_failure = None;
                    self.fail_writes = true;
                }
            }
        }
        self.fail_writes
    }
}

/// In-memory store.
///
/// Clones share the same map, so a test can keep a handle to inspect what the
/// store wrote, or flip it into a failing mode mid-session.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with the given entries.
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let store = Self::new();
        {
            let mut inner = store.inner.lock();
            for (key, value) in entries {
                inner.values.insert(key.to_string(), value.to_string());
            }
        }
        store
    }

    /// Make every `get` fail.
    pub fn set_fail_reads(&self, fail: bool) {
        self.inner.lock().fail_reads = fail;
    }

    /// Make every `set` and `remove` fail.
    pub fn set_fail_writes(&self, fail: bool) {
        let mut inner = self.inner.lock();
        inner.fail_writes = fail;
        inner.writes_before_failure = None;
    }

    /// Let the next `count` writes through, then fail every write after.
    pub fn fail_writes_after(&self, count: usize) {
        let mut inner = self.inner.lock();
        inner.fail_writes = false;
        inner.writes_before_failure = Some(count);
    }

    /// Current raw value, bypassing failure injection.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.inner.lock().values.get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        let inner = self.inner.lock();
        if inner.fail_reads {
            return Err(PersistError::Unavailable(format!("read of '{key}' refused")));
        }
        Ok(inner.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        let mut inner = self.inner.lock();
        if inner.write_refused() {
            return Err(PersistError::Unavailable(format!("write of '{key}' refused")));
        }
        inner.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistError> {
        let mut inner = self.inner.lock();
        if inner.write_refused() {
            return Err(PersistError::Unavailable(format!("removal of '{key}' refused")));
        }
        inner.values.remove(key);
        Ok(())
    }
}
