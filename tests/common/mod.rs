//! Shared helpers for integration tests

#![allow(dead_code)]

use kv_persist::error::{StoreError, StoreResult};
use kv_persist::storage::{DurableStore, MemoryStore};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tokio::sync::Barrier;

/// Durable store operations that can be made to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Get,
    Set,
    Remove,
    Clear,
    ListKeys,
}

/// Memory store wrapper failing selected operations on demand
#[derive(Debug, Clone, Default)]
pub struct FaultyStore {
    inner: MemoryStore,
    faults: Arc<Mutex<HashSet<(Op, Option<String>)>>>,
}

impl FaultyStore {
    pub fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            faults: Arc::default(),
        }
    }

    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }

    /// Fail `op` for `key`, or for every key when `key` is `None`
    pub fn fail(&self, op: Op, key: Option<&str>) {
        self.faults
            .lock()
            .unwrap()
            .insert((op, key.map(str::to_string)));
    }

    pub fn heal(&self) {
        self.faults.lock().unwrap().clear();
    }

    fn check(&self, op: Op, key: Option<&str>) -> StoreResult<()> {
        let faults = self.faults.lock().unwrap();
        let keyed = key.map_or(false, |k| faults.contains(&(op, Some(k.to_string()))));
        if keyed || faults.contains(&(op, None)) {
            return Err(StoreError::Unavailable {
                reason: format!("injected {:?} failure", op),
            });
        }
        Ok(())
    }
}

impl DurableStore for FaultyStore {
    async fn store_get(&self, key: &str) -> StoreResult<Option<String>> {
        self.check(Op::Get, Some(key))?;
        self.inner.store_get(key).await
    }

    async fn store_set(&self, key: &str, value: String) -> StoreResult<()> {
        self.check(Op::Set, Some(key))?;
        self.inner.store_set(key, value).await
    }

    async fn store_remove(&self, key: &str) -> StoreResult<()> {
        tokio::task::yield_now().await;
        self.check(Op::Remove, Some(key))?;
        self.inner.store_remove(key).await
    }

    async fn store_clear(&self) -> StoreResult<()> {
        self.check(Op::Clear, None)?;
        self.inner.store_clear().await
    }

    async fn store_list_keys(&self) -> StoreResult<Vec<String>> {
        self.check(Op::ListKeys, None)?;
        self.inner.store_list_keys().await
    }
}

/// Memory store whose removals wait until `parties` of them are in flight
#[derive(Debug, Clone)]
pub struct RendezvousStore {
    inner: MemoryStore,
    barrier: Arc<Barrier>,
}

impl RendezvousStore {
    pub fn new(inner: MemoryStore, parties: usize) -> Self {
        Self {
            inner,
            barrier: Arc::new(Barrier::new(parties)),
        }
    }

    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }
}

impl DurableStore for RendezvousStore {
    async fn store_get(&self, key: &str) -> StoreResult<Option<String>> {
        self.inner.store_get(key).await
    }

    async fn store_set(&self, key: &str, value: String) -> StoreResult<()> {
        self.inner.store_set(key, value).await
    }

    async fn store_remove(&self, key: &str) -> StoreResult<()> {
        self.barrier.wait().await;
        self.inner.store_remove(key).await
    }

    async fn store_clear(&self) -> StoreResult<()> {
        self.inner.store_clear().await
    }

    async fn store_list_keys(&self) -> StoreResult<Vec<String>> {
        self.inner.store_list_keys().await
    }
}
