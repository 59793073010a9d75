use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::persist::{KeyValueStore, PersistError};

/// JSON file store.
///
/// The whole file is one object mapping keys to string values. Every write
/// rewrites the file through a temp file and rename. An exclusive lock on a
/// sibling `.lock` file is held for the lifetime of the store, so two sessions
/// never write the same keys.
pub struct FileStore {
    path: PathBuf,
    _lock: File,
}

impl FileStore {
    /// Default location: `<data_dir>/stylecart/state.json`.
    ///
    /// Falls back to the current directory if the platform data dir is
    /// unavailable.
    pub fn default_path() -> PathBuf {
        let data_dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        data_dir.join("stylecart").join("state.json")
    }

    /// Open (or prepare to create) the state file at `path` and lock it.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PersistError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| PersistError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let lock_path = sibling(&path, "lock");
        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .map_err(|source| PersistError::Io {
                path: lock_path.clone(),
                source,
            })?;
        if lock.try_lock_exclusive().is_err() {
            return Err(PersistError::Locked { path });
        }

        tracing::debug!(path = %path.display(), "State file opened");
        Ok(Self { path, _lock: lock })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, PersistError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(PersistError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|source| PersistError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Load the current map for a read-modify-write. A corrupt file is
    /// replaced rather than blocking every later write.
    fn read_for_update(&self) -> Result<BTreeMap<String, String>, PersistError> {
        match self.read_map() {
            Err(PersistError::Corrupt { path, source }) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %source,
                    "Overwriting corrupt state file"
                );
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), PersistError> {
        let content = serde_json::to_string_pretty(map).map_err(|source| PersistError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        let tmp_path = sibling(&self.path, "tmp");
        fs::write(&tmp_path, content).map_err(|source| PersistError::Io {
            path: tmp_path.clone(),
            source,
        })?;
        fs::rename(&tmp_path, &self.path).map_err(|source| PersistError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.read_map()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        let mut map = self.read_for_update()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistError> {
        let mut map = self.read_for_update()?;
        if map.remove(key).is_none() {
            return Ok(());
        }
        self.write_map(&map)
    }
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}
