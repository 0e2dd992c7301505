//! Local filesystem durable store
//!
//! Each key is persisted as its own file under a base directory:
//! - File names are the hex encoding of the key plus a `.json` extension
//! - Atomic writes go through a temporary file that is synced and renamed
//! - Listing recovers keys from file names and skips foreign files

use crate::error::{Result, StoreError, StoreResult};
use crate::storage::adapter::DurableStore;
use crate::storage::constants::{
    DEFAULT_MAX_VALUE_SIZE, DEFAULT_STORAGE_DIR, FILE_EXTENSION, MAX_FILE_KEY_LENGTH,
    TEMP_EXTENSION,
};
use crate::storage::storage_api::utils::validate_key;
use crate::storage::storage_api::{Storage, StorageConfig};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// File store configuration
#[derive(Debug, Clone)]
pub struct FileStoreConfig {
    /// Base directory for storage
    pub base_path: PathBuf,
    /// Create directories if they don't exist
    pub create_dirs: bool,
    /// Use atomic writes (write to temp file, then rename)
    pub atomic_writes: bool,
    /// File permissions (Unix only)
    pub file_permissions: Option<u32>,
    /// Directory permissions (Unix only)
    pub dir_permissions: Option<u32>,
    /// Maximum stored value size (bytes)
    pub max_value_size: usize,
}

impl Default for FileStoreConfig {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from(DEFAULT_STORAGE_DIR),
            create_dirs: true,
            atomic_writes: true,
            file_permissions: Some(0o600),
            dir_permissions: Some(0o700),
            max_value_size: DEFAULT_MAX_VALUE_SIZE,
        }
    }
}

/// Filesystem durable store
#[derive(Debug, Clone)]
pub struct FileStore {
    config: FileStoreConfig,
}

impl FileStore {
    /// Open a file store, creating the base directory when configured to
    pub async fn open(config: FileStoreConfig) -> StoreResult<Self> {
        let exists = fs::try_exists(&config.base_path)
            .await
            .map_err(|e| io_failure("verify_base_directory", &config.base_path, e))?;

        if !exists {
            if !config.create_dirs {
                return Err(StoreError::OperationFailed {
                    operation: "verify_base_directory".to_string(),
                    reason: "Base directory does not exist and create_dirs is disabled".to_string(),
                });
            }

            fs::create_dir_all(&config.base_path)
                .await
                .map_err(|e| io_failure("create_base_directory", &config.base_path, e))?;

            #[cfg(unix)]
            if let Some(perms) = config.dir_permissions {
                set_permissions(&config.base_path, perms).await?;
            }
        }

        let metadata = fs::metadata(&config.base_path)
            .await
            .map_err(|e| io_failure("verify_base_directory", &config.base_path, e))?;
        if !metadata.is_dir() {
            return Err(StoreError::OperationFailed {
                operation: "verify_base_directory".to_string(),
                reason: "Base path exists but is not a directory".to_string(),
            });
        }

        debug!(base_path = %config.base_path.display(), "Opened file store");
        Ok(Self { config })
    }

    /// Store configuration
    pub fn config(&self) -> &FileStoreConfig {
        &self.config
    }

    /// Base directory holding the key files
    pub fn base_path(&self) -> &Path {
        &self.config.base_path
    }

    /// Path of the file holding `key`
    fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        validate_key(key)?;
        if key.len() > MAX_FILE_KEY_LENGTH {
            return Err(StoreError::InvalidKey {
                key: key.to_string(),
                reason: format!("Key too long for file store (max {} bytes)", MAX_FILE_KEY_LENGTH),
            });
        }

        Ok(self
            .config
            .base_path
            .join(format!("{}.{}", hex::encode(key), FILE_EXTENSION)))
    }

    /// Write data to file with optional atomic operation
    async fn write_file(&self, path: &Path, data: &[u8]) -> StoreResult<()> {
        if self.config.atomic_writes {
            let temp_path = path.with_file_name(format!(
                ".{}.{}",
                uuid::Uuid::new_v4().simple(),
                TEMP_EXTENSION
            ));

            if let Err(e) = self.write_synced(&temp_path, data).await {
                let _ = fs::remove_file(&temp_path).await;
                return Err(e);
            }

            if let Err(e) = fs::rename(&temp_path, path).await {
                let _ = fs::remove_file(&temp_path).await;
                return Err(io_failure("atomic_rename", path, e));
            }
        } else {
            self.write_synced(path, data).await?;
        }

        Ok(())
    }

    /// Write and sync `data` to `path`
    ///
    /// File permissions are applied when the file is created, before any data
    /// reaches it. Overwriting an existing file keeps its mode.
    async fn write_synced(&self, path: &Path, data: &[u8]) -> StoreResult<()> {
        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        if let Some(perms) = self.config.file_permissions {
            options.mode(perms);
        }

        let mut file = options
            .open(path)
            .await
            .map_err(|e| io_failure("create_file", path, e))?;

        file.write_all(data)
            .await
            .map_err(|e| io_failure("write_file", path, e))?;
        file.sync_all()
            .await
            .map_err(|e| io_failure("sync_file", path, e))?;

        Ok(())
    }

    /// Entries of the base directory as (path, decoded key)
    ///
    /// Temporary files map to `None`; files this store did not write are skipped.
    async fn entries(&self) -> StoreResult<Vec<(PathBuf, Option<String>)>> {
        let base_path = &self.config.base_path;
        let mut entries = fs::read_dir(base_path)
            .await
            .map_err(|e| io_failure("read_directory", base_path, e))?;

        let mut found = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| io_failure("read_directory_entry", base_path, e))?
        {
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };

            if name.starts_with('.') && name.ends_with(TEMP_EXTENSION) {
                found.push((entry.path(), None));
            } else if let Some(key) = key_from_file_name(name) {
                found.push((entry.path(), Some(key)));
            }
        }

        Ok(found)
    }
}

impl DurableStore for FileStore {
    async fn store_get(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key)?;

        match fs::read_to_string(&path).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_failure("read_file", &path, e)),
        }
    }

    async fn store_set(&self, key: &str, value: String) -> StoreResult<()> {
        if value.len() > self.config.max_value_size {
            return Err(StoreError::QuotaExceeded {
                size: value.len(),
                limit: self.config.max_value_size,
            });
        }

        let path = self.path_for(key)?;
        self.write_file(&path, value.as_bytes()).await
    }

    async fn store_remove(&self, key: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;

        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_failure("delete_file", &path, e)),
        }
    }

    async fn store_clear(&self) -> StoreResult<()> {
        for (path, _) in self.entries().await? {
            match fs::remove_file(&path).await {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(io_failure("delete_file", &path, e)),
            }
        }
        Ok(())
    }

    async fn store_list_keys(&self) -> StoreResult<Vec<String>> {
        let mut keys: Vec<String> = self
            .entries()
            .await?
            .into_iter()
            .filter_map(|(_, key)| key)
            .collect();
        keys.sort();
        Ok(keys)
    }
}

impl Storage<FileStore> {
    /// Open a file store and wrap it in an adapter configured by `config`
    ///
    /// The namespace is checked before the base directory is touched.
    pub async fn open_file(file_config: FileStoreConfig, config: StorageConfig) -> Result<Self> {
        config.registry()?;
        let store = FileStore::open(file_config).await?;
        Ok(Storage::with_config(store, config)?)
    }
}

/// Key stored in `name`, only for names `path_for` would produce
fn key_from_file_name(name: &str) -> Option<String> {
    let encoded = name.strip_suffix(FILE_EXTENSION)?.strip_suffix('.')?;
    if encoded.is_empty() {
        return None;
    }

    let bytes = hex::decode(encoded).ok()?;
    // lowercase only
    if hex::encode(&bytes) != encoded {
        return None;
    }
    String::from_utf8(bytes).ok()
}

fn io_failure(operation: &str, path: &Path, e: std::io::Error) -> StoreError {
    match e.kind() {
        ErrorKind::PermissionDenied => StoreError::PermissionDenied {
            resource: path.to_string_lossy().to_string(),
        },
        _ => StoreError::OperationFailed {
            operation: operation.to_string(),
            reason: format!("{}: {}", path.display(), e),
        },
    }
}

#[cfg(unix)]
async fn set_permissions(path: &Path, mode: u32) -> StoreResult<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
        .await
        .map_err(|e| io_failure("set_permissions", path, e))
}
