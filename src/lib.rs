//! # kv-persist
//!
//! Namespaced, asynchronous key-value persistence with JSON values.
//!
//! ## Features
//!
//! - **Durable stores**: pluggable raw text backends, in-memory and filesystem
//! - **Storage adapter**: typed get/set/remove/clear/list-keys with JSON at the boundary
//! - **Key registry**: a closed set of recognized keys, optionally namespaced
//! - **Session storage**: token and user profile helpers with a combined `clear_auth`
//!
//! ## Example
//!
//! ```rust
//! use kv_persist::prelude::*;
//!
//! # #[tokio::main]
//! # async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let auth = AuthStorage::new(Storage::new(MemoryStore::new()));
//!
//! auth.save_user_data(&serde_json::json!({"id": 1, "name": "x"})).await?;
//! let user: Option<serde_json::Value> = auth.get_user_data().await?;
//! assert!(user.is_some());
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(clippy::all)]

// Re-export core error types
pub use error::{Error, Result};

// Core modules
pub mod error;
pub mod storage;

// Re-export commonly used types
pub mod prelude {
    //! Common types and traits for convenient importing

    pub use crate::error::{Error, Result, StorageError, StorageResult, StoreError};
    pub use crate::storage::{
        AuthStorage, DurableStore, FileStore, FileStoreConfig, KeyRegistry, MemoryStore,
        ReadPolicy, SettingsStorage, Storage, StorageConfig, StorageKey,
    };
}

// Version information
/// The version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of this crate
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
