//! Durable store trait implemented by storage backends

use crate::error::StoreResult;
use std::future::Future;
use std::sync::Arc;

/// Asynchronous string key-value medium underneath [`Storage`](crate::storage::Storage)
///
/// Backends persist opaque text under string keys. They report every failure
/// through [`StoreError`](crate::error::StoreError) and never retry on their own.
/// Physical write ordering for concurrent callers is the backend's concern.
pub trait DurableStore: Send + Sync {
    /// Read the text stored under `key`, `None` when absent
    fn store_get(&self, key: &str) -> impl Future<Output = StoreResult<Option<String>>> + Send;

    /// Write `value` under `key`, replacing any previous value
    fn store_set(&self, key: &str, value: String) -> impl Future<Output = StoreResult<()>> + Send;

    /// Delete `key`; deleting an absent key succeeds
    fn store_remove(&self, key: &str) -> impl Future<Output = StoreResult<()>> + Send;

    /// Delete every key held by the store
    fn store_clear(&self) -> impl Future<Output = StoreResult<()>> + Send;

    /// List every key currently held by the store
    fn store_list_keys(&self) -> impl Future<Output = StoreResult<Vec<String>>> + Send;
}

impl<S: DurableStore> DurableStore for Arc<S> {
    async fn store_get(&self, key: &str) -> StoreResult<Option<String>> {
        self.as_ref().store_get(key).await
    }

    async fn store_set(&self, key: &str, value: String) -> StoreResult<()> {
        self.as_ref().store_set(key, value).await
    }

    async fn store_remove(&self, key: &str) -> StoreResult<()> {
        self.as_ref().store_remove(key).await
    }

    async fn store_clear(&self) -> StoreResult<()> {
        self.as_ref().store_clear().await
    }

    async fn store_list_keys(&self) -> StoreResult<Vec<String>> {
        self.as_ref().store_list_keys().await
    }
}
