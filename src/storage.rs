//! Persistent key/value storage for the chat session.
//!
//! Mirrors the browser's `localStorage`: string keys, string values, reads
//! are infallible and every write goes straight to disk.

use crate::error::StorageError;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONVERSATION_ID_KEY: &str = "orbitx_conversation_id";
pub const USER_NAME_KEY: &str = "orbitx_user_name";
pub const USER_EMAIL_KEY: &str = "orbitx_user_email";
pub const USER_PHONE_KEY: &str = "orbitx_user_phone";

/// String key/value store backing the session manager
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store, lost when the process exits
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON-object file store with write-through semantics
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`, creating parent directories as needed.
    ///
    /// A missing file starts empty. A file that cannot be parsed is logged
    /// and ignored; it is overwritten on the next write.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let entries = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                match serde_json::from_str(&content) {
                    Ok(entries) => entries,
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable storage file");
                        BTreeMap::new()
                    }
                }
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(&self.entries)?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

/// Open the file store, falling back to memory when the file is unusable
pub fn open_or_memory(path: &Path) -> Box<dyn KeyValueStore> {
    match FileStore::open(path) {
        Ok(store) => Box::new(store),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "falling back to in-memory storage");
            Box::new(MemoryStore::new())
        }
    }
}
