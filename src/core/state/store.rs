//! Key-value storage for persisted client state
//!
//! State is a flat map of string keys to string values. [`FileStateStore`]
//! keeps it in a single JSON object file that is rewritten on every change;
//! [`MemoryStateStore`] keeps it in process for tests and dry runs.

use crate::domain::{Result, WhispError};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// String key-value storage backend
pub trait StateStore {
    /// Read a value
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a value; removing an absent key is not an error
    fn remove(&self, key: &str) -> Result<()>;

    /// All keys currently stored
    fn keys(&self) -> Result<Vec<String>>;
}

fn lock(entries: &Mutex<BTreeMap<String, String>>) -> Result<MutexGuard<'_, BTreeMap<String, String>>> {
    entries
        .lock()
        .map_err(|_| WhispError::State("State store lock poisoned".to_string()))
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStateStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(lock(&self.entries)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        lock(&self.entries)?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        lock(&self.entries)?.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(lock(&self.entries)?.keys().cloned().collect())
    }
}

/// JSON-file store
///
/// The file is read once on open. Each write rewrites the whole file
/// through a temporary sibling and a rename.
#[derive(Debug)]
pub struct FileStateStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStateStore {
    /// Open the store at `path`
    ///
    /// A missing file is an empty store. A file that is not a JSON object of
    /// strings is discarded with a warning and the store starts empty.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let entries = if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| {
                WhispError::State(format!(
                    "Failed to read state file {}: {e}",
                    path.display()
                ))
            })?;

            match serde_json::from_str::<BTreeMap<String, String>>(&content) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "State file is corrupt, starting with empty state"
                    );
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };

        tracing::debug!(
            path = %path.display(),
            keys = entries.len(),
            "Opened state store"
        );

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                WhispError::State(format!(
                    "Failed to create state directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let content = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content).map_err(|e| {
            WhispError::State(format!("Failed to write {}: {e}", tmp.display()))
        })?;
        std::fs::rename(&tmp, &self.path).map_err(|e| {
            WhispError::State(format!(
                "Failed to replace state file {}: {e}",
                self.path.display()
            ))
        })
    }
}

impl StateStore for FileStateStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(lock(&self.entries)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = lock(&self.entries)?;
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = lock(&self.entries)?;
        if entries.remove(key).is_some() {
            self.persist(&entries)?;
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(lock(&self.entries)?.keys().cloned().collect())
    }
}
