//! Local key-value persistence.
//!
//! Browser builds use `localStorage`; native builds keep a JSON file in the
//! user data directory. [`MemoryStore`] backs tests and is the fallback when
//! neither is available.

pub mod chat;
pub mod session;

use std::rc::Rc;

use dashmap::DashMap;

use crate::shared::errors::StorageError;

pub use chat::{ChatStore, CHAT_THREADS_KEY};
pub use session::{SessionStore, TOKEN_KEY, USER_KEY};

/// String key-value capability injected into everything that persists locally.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// `window.localStorage`, looked up on every call
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserStorage;

#[cfg(target_arch = "wasm32")]
impl BrowserStorage {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .and_then(|window| window.local_storage().ok().flatten())
            .ok_or_else(|| StorageError::Unavailable("localStorage is not accessible".to_string()))
    }

    pub fn is_available() -> bool {
        Self::storage().is_ok()
    }
}

#[cfg(target_arch = "wasm32")]
fn js_error(err: wasm_bindgen::JsValue) -> StorageError {
    StorageError::Unavailable(format!("{:?}", err))
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?.get_item(key).map_err(js_error)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?.set_item(key, value).map_err(js_error)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Self::storage()?.remove_item(key).map_err(js_error)
    }
}

/// Native store: every entry in one JSON object, rewritten on each change.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct FileStore {
    path: std::path::PathBuf,
    entries: DashMap<String, String>,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub const FILE_NAME: &'static str = "storage.json";

    pub fn open(path: impl Into<std::path::PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let mut stored = std::collections::HashMap::<String, String>::new();

        if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            if !raw.trim().is_empty() {
                stored = serde_json::from_str(&raw)?;
            }
        }

        Ok(Self {
            path,
            entries: stored.into_iter().collect(),
        })
    }

    /// `<data dir>/milestack/storage.json`
    pub fn open_default() -> anyhow::Result<Self> {
        let dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("No user data directory on this platform"))?
            .join("milestack");
        std::fs::create_dir_all(&dir)?;
        Ok(Self::open(dir.join(Self::FILE_NAME))?)
    }

    fn flush(&self) -> Result<(), StorageError> {
        let snapshot: std::collections::BTreeMap<String, String> = self
            .entries
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        let json = serde_json::to_string_pretty(&snapshot)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// The platform's persistent store, or memory if it cannot be opened.
pub fn default_store() -> Rc<dyn KeyValueStore> {
    #[cfg(target_arch = "wasm32")]
    {
        if BrowserStorage::is_available() {
            return Rc::new(BrowserStorage);
        }
        tracing::warn!("localStorage unavailable, falling back to in-memory storage");
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        match FileStore::open_default() {
            Ok(store) => return Rc::new(store),
            Err(e) => tracing::warn!(error = %e, "File store unavailable, falling back to in-memory storage"),
        }
    }

    Rc::new(MemoryStore::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("token").unwrap(), None);

        store.set("token", "abc").unwrap();
        assert_eq!(store.get("token").unwrap().as_deref(), Some("abc"));

        store.remove("token").unwrap();
        assert_eq!(store.get("token").unwrap(), None);
    }

    #[test]
    fn test_file_store_persists_between_opens() {
        let path = std::env::temp_dir().join(format!("milestack-store-{}.json", uuid::Uuid::new_v4()));

        {
            let store = FileStore::open(&path).unwrap();
            store.set("token", "abc").unwrap();
            store.set("user", "{}").unwrap();
            store.remove("user").unwrap();
        }

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("token").unwrap().as_deref(), Some("abc"));
        assert_eq!(reopened.get("user").unwrap(), None);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_file_store_rejects_corrupt_file() {
        let path = std::env::temp_dir().join(format!("milestack-corrupt-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&path, "not json").unwrap();

        let result = FileStore::open(&path);

        assert!(matches!(result, Err(StorageError::SerializationError(_))));
        let _ = std::fs::remove_file(&path);
    }
}
