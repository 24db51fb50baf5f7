//! Client Storage
//!
//! Key/value storage that outlives a single run: browser `localStorage`
//! in the UI, a JSON file for the terminal front end, memory in tests.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::api::error::{ClientError, ClientResult};

/// Storage key holding the opaque bearer token
pub const TOKEN_KEY: &str = "token";
/// Storage key holding the JSON-encoded [`crate::api::SessionUser`]
pub const USER_KEY: &str = "user";

/// Persistent key/value client storage
pub trait SessionStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> ClientResult<()>;
    fn remove(&self, key: &str);
}

/// In-memory storage
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| ClientError::Storage(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}

#[cfg(feature = "native")]
pub use file::FileStorage;

#[cfg(feature = "native")]
mod file {
    use super::*;
    use std::path::{Path, PathBuf};

    /// Storage backed by a single JSON object on disk
    #[derive(Debug, Clone)]
    pub struct FileStorage {
        path: PathBuf,
    }

    impl FileStorage {
        /// Store entries in `<dir>/session.json`
        pub fn in_dir(dir: impl AsRef<Path>) -> Self {
            Self {
                path: dir.as_ref().join("session.json"),
            }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        fn load(&self) -> HashMap<String, String> {
            match std::fs::read_to_string(&self.path) {
                Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                    tracing::warn!(path = ?self.path, error = %e, "Ignoring unreadable session file");
                    HashMap::new()
                }),
                Err(_) => HashMap::new(),
            }
        }

        fn save(&self, entries: &HashMap<String, String>) -> ClientResult<()> {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| ClientError::Storage(e.to_string()))?;
            }
            if entries.is_empty() {
                return match std::fs::remove_file(&self.path) {
                    Ok(()) => Ok(()),
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                    Err(e) => Err(ClientError::Storage(e.to_string())),
                };
            }
            let content = serde_json::to_string_pretty(entries)?;
            std::fs::write(&self.path, content).map_err(|e| ClientError::Storage(e.to_string()))
        }
    }

    impl SessionStorage for FileStorage {
        fn get(&self, key: &str) -> Option<String> {
            self.load().remove(key)
        }

        fn set(&self, key: &str, value: &str) -> ClientResult<()> {
            let mut entries = self.load();
            entries.insert(key.to_string(), value.to_string());
            self.save(&entries)
        }

        fn remove(&self, key: &str) {
            let mut entries = self.load();
            if entries.remove(key).is_some() {
                if let Err(e) = self.save(&entries) {
                    tracing::warn!(key, error = %e, "Failed to remove session entry");
                }
            }
        }
    }
}
