//! Key/value storage backing the session.
//!
//! Values are plain strings under independent keys, with no schema version
//! and no expiry.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::{SessionError, SessionResult};

/// Trait for session key/value storage.
pub trait SessionStorage: Send + Sync {
    /// Reads a value.
    fn get(&self, key: &str) -> SessionResult<Option<String>>;

    /// Writes several values in one step. Either all are stored or none are.
    fn set_many(&self, entries: &[(&str, &str)]) -> SessionResult<()>;

    /// Writes a single value.
    fn set(&self, key: &str, value: &str) -> SessionResult<()> {
        self.set_many(&[(key, value)])
    }

    /// Removes the given keys. Missing keys are ignored.
    fn remove_many(&self, keys: &[&str]) -> SessionResult<()>;
}

/// In-memory storage for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    values: RwLock<BTreeMap<String, String>>,
}

impl MemorySessionStorage {
    /// Create a new in-memory storage
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemorySessionStorage {
    fn get(&self, key: &str) -> SessionResult<Option<String>> {
        let values = self
            .values
            .read()
            .map_err(|e| SessionError::Unavailable(format!("Lock poisoned: {}", e)))?;
        Ok(values.get(key).cloned())
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> SessionResult<()> {
        let mut values = self
            .values
            .write()
            .map_err(|e| SessionError::Unavailable(format!("Lock poisoned: {}", e)))?;
        for (key, value) in entries {
            values.insert((*key).to_string(), (*value).to_string());
        }
        Ok(())
    }

    fn remove_many(&self, keys: &[&str]) -> SessionResult<()> {
        let mut values = self
            .values
            .write()
            .map_err(|e| SessionError::Unavailable(format!("Lock poisoned: {}", e)))?;
        for key in keys {
            values.remove(*key);
        }
        Ok(())
    }
}

/// Storage persisted as a JSON object in a single file.
///
/// Every write rewrites the whole file through a temporary sibling and a
/// rename, so a crash never leaves half of a multi-key write behind.
#[derive(Debug)]
pub struct FileSessionStorage {
    path: PathBuf,
    lock: RwLock<()>,
}

impl FileSessionStorage {
    /// Opens storage at `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> SessionResult<BTreeMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> SessionResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_vec_pretty(values)?)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl SessionStorage for FileSessionStorage {
    fn get(&self, key: &str) -> SessionResult<Option<String>> {
        let _guard = self
            .lock
            .read()
            .map_err(|e| SessionError::Unavailable(format!("Lock poisoned: {}", e)))?;
        Ok(self.read_all()?.remove(key))
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> SessionResult<()> {
        let _guard = self
            .lock
            .write()
            .map_err(|e| SessionError::Unavailable(format!("Lock poisoned: {}", e)))?;
        let mut values = self.read_all()?;
        for (key, value) in entries {
            values.insert((*key).to_string(), (*value).to_string());
        }
        self.write_all(&values)
    }

    fn remove_many(&self, keys: &[&str]) -> SessionResult<()> {
        let _guard = self
            .lock
            .write()
            .map_err(|e| SessionError::Unavailable(format!("Lock poisoned: {}", e)))?;
        let mut values = self.read_all()?;
        for key in keys {
            values.remove(*key);
        }
        self.write_all(&values)
    }
}
