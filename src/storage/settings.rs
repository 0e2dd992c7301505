//! Application settings storage

use crate::error::StorageResult;
use crate::storage::adapter::DurableStore;
use crate::storage::keys::StorageKey;
use crate::storage::storage_api::Storage;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Application preferences persisted under [`StorageKey::AppSettings`]
#[derive(Debug, Clone)]
pub struct SettingsStorage<S> {
    storage: Storage<S>,
}

impl<S: DurableStore> SettingsStorage<S> {
    /// Wrap an adapter
    pub fn new(storage: Storage<S>) -> Self {
        Self { storage }
    }

    /// Adapter used by this wrapper
    pub fn storage(&self) -> &Storage<S> {
        &self.storage
    }

    /// Persist the settings payload
    pub async fn save_settings<T>(&self, settings: &T) -> StorageResult<()>
    where
        T: Serialize + ?Sized,
    {
        self.storage.set(StorageKey::AppSettings, settings).await
    }

    /// Load the settings payload
    pub async fn get_settings<T>(&self) -> StorageResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        self.storage.get(StorageKey::AppSettings).await
    }

    /// Load the settings payload, falling back to `T::default()` when absent
    pub async fn get_settings_or_default<T>(&self) -> StorageResult<T>
    where
        T: DeserializeOwned + Default,
    {
        Ok(self.get_settings().await?.unwrap_or_default())
    }

    /// Forget the settings payload
    pub async fn remove_settings(&self) -> StorageResult<()> {
        self.storage.remove(StorageKey::AppSettings).await
    }
}
