//! Generic storage adapter over a durable store
//!
//! [`Storage`] adds JSON encoding at the boundary, uniform error translation
//! and the closed key vocabulary of [`StorageKey`]. It holds no cached state:
//! every read goes to the durable store.

use crate::error::{StorageError, StorageResult};
use crate::storage::adapter::DurableStore;
use crate::storage::keys::{KeyRegistry, StorageKey};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, warn};

/// How [`Storage::get`] treats stored text that cannot be decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadPolicy {
    /// Log the anomaly and report the key as absent
    #[default]
    Lenient,
    /// Return [`StorageError::Deserialization`]
    Strict,
}

/// Storage adapter configuration
#[derive(Debug, Clone, Default)]
pub struct StorageConfig {
    /// Handling of unreadable stored values
    pub read_policy: ReadPolicy,
    /// Key namespace, see [`KeyRegistry::namespaced`]
    pub namespace: Option<String>,
}

impl StorageConfig {
    /// Registry described by this configuration
    pub fn registry(&self) -> StorageResult<KeyRegistry> {
        match &self.namespace {
            Some(namespace) => KeyRegistry::namespaced(namespace.clone()),
            None => Ok(KeyRegistry::new()),
        }
    }
}

/// Typed JSON storage over a [`DurableStore`]
#[derive(Debug, Clone)]
pub struct Storage<S> {
    store: S,
    registry: KeyRegistry,
    config: StorageConfig,
}

impl<S: DurableStore> Storage<S> {
    /// Adapter with the default registry and lenient reads
    pub fn new(store: S) -> Self {
        Self {
            store,
            registry: KeyRegistry::new(),
            config: StorageConfig::default(),
        }
    }

    /// Adapter configured by `config`
    pub fn with_config(store: S, config: StorageConfig) -> StorageResult<Self> {
        let registry = config.registry()?;
        Ok(Self {
            store,
            registry,
            config,
        })
    }

    /// Underlying durable store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Registry resolving keys for this adapter
    pub fn registry(&self) -> &KeyRegistry {
        &self.registry
    }

    /// Adapter configuration
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Serialize `value` and write it under `key`
    ///
    /// Serialization happens before any I/O, so a value that cannot be encoded
    /// leaves the store untouched.
    pub async fn set<T>(&self, key: StorageKey, value: &T) -> StorageResult<()>
    where
        T: Serialize + ?Sized,
    {
        let store_key = self.registry.resolve(key);
        let text = serde_json::to_string(value).map_err(|source| {
            error!(key = %store_key, error = %source, "Error serializing value for storage");
            StorageError::Serialization {
                key: store_key.clone(),
                source,
            }
        })?;

        self.store
            .store_set(&store_key, text)
            .await
            .map_err(|source| {
                error!(key = %store_key, error = %source, "Error saving to storage");
                StorageError::StoreWrite {
                    key: store_key.clone(),
                    source,
                }
            })
    }

    /// Read and decode the value under `key`
    ///
    /// Absent keys yield `Ok(None)`. Undecodable text is handled according to
    /// [`StorageConfig::read_policy`].
    pub async fn get<T>(&self, key: StorageKey) -> StorageResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        let store_key = self.registry.resolve(key);
        let text = match self.read(&store_key).await? {
            Some(text) => text,
            None => return Ok(None),
        };

        match serde_json::from_str(&text) {
            Ok(value) => Ok(Some(value)),
            Err(source) => match self.config.read_policy {
                ReadPolicy::Lenient => {
                    warn!(key = %store_key, error = %source, "Discarding unreadable stored value");
                    Ok(None)
                }
                ReadPolicy::Strict => {
                    error!(key = %store_key, error = %source, "Error decoding stored value");
                    Err(StorageError::Deserialization {
                        key: store_key,
                        source,
                    })
                }
            },
        }
    }

    /// Raw stored text under `key`
    pub async fn get_raw(&self, key: StorageKey) -> StorageResult<Option<String>> {
        let store_key = self.registry.resolve(key);
        self.read(&store_key).await
    }

    /// Whether `key` is present, regardless of whether it decodes
    pub async fn contains(&self, key: StorageKey) -> StorageResult<bool> {
        Ok(self.get_raw(key).await?.is_some())
    }

    /// Delete `key`; removing an absent key succeeds
    pub async fn remove(&self, key: StorageKey) -> StorageResult<()> {
        let store_key = self.registry.resolve(key);
        self.store
            .store_remove(&store_key)
            .await
            .map_err(|source| {
                error!(key = %store_key, error = %source, "Error removing from storage");
                StorageError::StoreRemove {
                    key: store_key.clone(),
                    source,
                }
            })
    }

    /// Delete every key in the durable store, not only registry keys
    pub async fn clear(&self) -> StorageResult<()> {
        self.store.store_clear().await.map_err(|source| {
            error!(error = %source, "Error clearing storage");
            StorageError::StoreClear { source }
        })?;
        debug!("Cleared storage");
        Ok(())
    }

    /// Every key currently in the durable store
    pub async fn list_keys(&self) -> StorageResult<Vec<String>> {
        self.store.store_list_keys().await.map_err(|source| {
            error!(error = %source, "Error getting storage keys");
            StorageError::StoreListKeys { source }
        })
    }

    async fn read(&self, store_key: &str) -> StorageResult<Option<String>> {
        self.store.store_get(store_key).await.map_err(|source| {
            error!(key = %store_key, error = %source, "Error reading from storage");
            StorageError::StoreRead {
                key: store_key.to_string(),
                source,
            }
        })
    }
}

/// Utility functions for storage operations
pub mod utils {
    use crate::error::{StoreError, StoreResult};
    use crate::storage::constants::MAX_KEY_LENGTH;

    /// Validate a durable store key
    pub fn validate_key(key: &str) -> StoreResult<()> {
        let reason = if key.is_empty() {
            "Key cannot be empty".to_string()
        } else if key.len() > MAX_KEY_LENGTH {
            format!("Key too long (max {} characters)", MAX_KEY_LENGTH)
        } else if key.contains('\0') || key.contains('\n') || key.contains('\r') {
            "Key contains invalid characters".to_string()
        } else {
            return Ok(());
        };

        Err(StoreError::InvalidKey {
            key: key.to_string(),
            reason,
        })
    }
}
