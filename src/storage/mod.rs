//! Storage module for data persistence
//!
//! This module provides a namespaced key-value persistence layer:
//! - **Durable stores** - [`DurableStore`] backends holding raw text ([`MemoryStore`], [`FileStore`])
//! - **Storage adapter** - [`Storage`], typed JSON values under registry keys
//! - **Domain wrappers** - [`AuthStorage`] and [`SettingsStorage`]
//!
//! Reads always go to the durable store; nothing is cached in memory.
//!
//! # Examples
//!
//! ```rust
//! use kv_persist::storage::{AuthStorage, MemoryStore, Storage};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let auth = AuthStorage::new(Storage::new(MemoryStore::new()));
//!
//! auth.save_token("abc123").await?;
//! assert_eq!(auth.get_token().await?.as_deref(), Some("abc123"));
//!
//! auth.clear_auth().await?;
//! assert_eq!(auth.get_token().await?, None);
//! # Ok(())
//! # }
//! ```
//!
//! ## File storage
//!
//! ```rust,no_run
//! use kv_persist::storage::{FileStore, FileStoreConfig, Storage, StorageKey};
//! use std::path::PathBuf;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = FileStoreConfig {
//!     base_path: PathBuf::from("./my_storage"),
//!     ..Default::default()
//! };
//! let storage = Storage::new(FileStore::open(config).await?);
//!
//! storage.set(StorageKey::AppSettings, &vec!["dark", "compact"]).await?;
//! let _settings: Option<Vec<String>> = storage.get(StorageKey::AppSettings).await?;
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod keys;
pub mod storage_api;

// Durable store backends
pub mod memory_adapter;
pub mod storage_local;

// Domain wrappers
pub mod auth;
pub mod settings;

// Re-export main types for convenience
pub use adapter::DurableStore;
pub use auth::AuthStorage;
pub use keys::{KeyRegistry, StorageKey};
pub use memory_adapter::MemoryStore;
pub use settings::SettingsStorage;
pub use storage_api::{ReadPolicy, Storage, StorageConfig};
pub use storage_local::{FileStore, FileStoreConfig};

/// Storage constants
pub mod constants {
    //! Constants used throughout the storage module

    /// Maximum storage key length
    pub const MAX_KEY_LENGTH: usize = 1024;

    /// Longest key a [`FileStore`](super::FileStore) can map to a file name
    pub const MAX_FILE_KEY_LENGTH: usize = 125;

    /// Separator between a registry namespace and a key name
    pub const NAMESPACE_SEPARATOR: char = ':';

    /// Default base directory of a file store
    pub const DEFAULT_STORAGE_DIR: &str = "./storage";

    /// Extension of files holding stored values
    pub const FILE_EXTENSION: &str = "json";

    /// Extension of in-flight atomic write files
    pub const TEMP_EXTENSION: &str = "tmp";

    /// Default maximum stored value size (16MB)
    pub const DEFAULT_MAX_VALUE_SIZE: usize = 16 * 1024 * 1024;
}
