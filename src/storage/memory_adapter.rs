//! Memory durable store

use crate::error::{StoreError, StoreResult};
use crate::storage::adapter::DurableStore;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// In-memory durable store
///
/// Clones share the same underlying map. Contents live as long as the last
/// handle and are never written to disk.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    data: Arc<RwLock<HashMap<String, String>>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create a new empty memory store
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of keys currently held
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.read()?.len())
    }

    /// Whether the store holds no keys
    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, HashMap<String, String>>> {
        self.data.read().map_err(|_| StoreError::Unavailable {
            reason: "memory store lock poisoned".to_string(),
        })
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, HashMap<String, String>>> {
        self.data.write().map_err(|_| StoreError::Unavailable {
            reason: "memory store lock poisoned".to_string(),
        })
    }
}

impl DurableStore for MemoryStore {
    async fn store_get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.read()?.get(key).cloned())
    }

    async fn store_set(&self, key: &str, value: String) -> StoreResult<()> {
        self.write()?.insert(key.to_string(), value);
        Ok(())
    }

    async fn store_remove(&self, key: &str) -> StoreResult<()> {
        self.write()?.remove(key);
        Ok(())
    }

    async fn store_clear(&self) -> StoreResult<()> {
        self.write()?.clear();
        Ok(())
    }

    async fn store_list_keys(&self) -> StoreResult<Vec<String>> {
        let mut keys: Vec<String> = self.read()?.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}
