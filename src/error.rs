//! Error types for the kv-persist library
//!
//! This module provides a unified error handling system using `thiserror` for
//! all layers of the library: the durable store backends, the generic storage
//! adapter and the domain wrappers built on top of it.

use thiserror::Error;

/// The main error type for the kv-persist library
#[derive(Error, Debug)]
pub enum Error {
    /// Storage adapter errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Durable store backend errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Errors reported by a durable store backend
#[derive(Error, Debug)]
pub enum StoreError {
    /// Store operation failed
    #[error("Store operation failed: {operation}: {reason}")]
    OperationFailed { operation: String, reason: String },

    /// Key cannot be addressed by this backend
    #[error("Invalid key {key:?}: {reason}")]
    InvalidKey { key: String, reason: String },

    /// Permission denied
    #[error("Permission denied: {resource}")]
    PermissionDenied { resource: String },

    /// Value exceeds the backend size limit
    #[error("Store quota exceeded: {size} bytes (limit {limit})")]
    QuotaExceeded { size: usize, limit: usize },

    /// Backend cannot serve requests
    #[error("Store unavailable: {reason}")]
    Unavailable { reason: String },

    /// Underlying I/O failure
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors surfaced by the storage adapter and its domain wrappers
#[derive(Error, Debug)]
pub enum StorageError {
    /// Value could not be encoded as JSON; nothing was written
    #[error("Failed to serialize value for {key}: {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Stored text could not be decoded into the requested type
    #[error("Failed to deserialize value for {key}: {source}")]
    Deserialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Reading from the durable store failed
    #[error("Failed to read {key} from store: {source}")]
    StoreRead {
        key: String,
        #[source]
        source: StoreError,
    },

    /// Writing to the durable store failed
    #[error("Failed to write {key} to store: {source}")]
    StoreWrite {
        key: String,
        #[source]
        source: StoreError,
    },

    /// Removing from the durable store failed
    #[error("Failed to remove {key} from store: {source}")]
    StoreRemove {
        key: String,
        #[source]
        source: StoreError,
    },

    /// Clearing the durable store failed
    #[error("Failed to clear store: {source}")]
    StoreClear {
        #[source]
        source: StoreError,
    },

    /// Listing the durable store keys failed
    #[error("Failed to list store keys: {source}")]
    StoreListKeys {
        #[source]
        source: StoreError,
    },

    /// A composed multi-key operation left the store partially mutated
    #[error("{operation} partially failed: {} failed, {} succeeded", .failures.len(), .succeeded.len())]
    PartialFailure {
        operation: String,
        /// Store keys whose sub-operation completed
        succeeded: Vec<String>,
        /// Errors of the sub-operations that did not
        failures: Vec<StorageError>,
    },

    /// Registry namespace is not usable as a key prefix
    #[error("Invalid namespace {namespace:?}: {reason}")]
    InvalidNamespace { namespace: String, reason: String },
}

impl StorageError {
    /// Store key the error refers to, when it refers to exactly one
    pub fn key(&self) -> Option<&str> {
        match self {
            StorageError::Serialization { key, .. }
            | StorageError::Deserialization { key, .. }
            | StorageError::StoreRead { key, .. }
            | StorageError::StoreWrite { key, .. }
            | StorageError::StoreRemove { key, .. } => Some(key),
            _ => None,
        }
    }

    /// Whether the store may have been left partially mutated
    pub fn is_partial(&self) -> bool {
        matches!(self, StorageError::PartialFailure { .. })
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

/// Convenience type alias for Storage Results
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Convenience type alias for durable store Results
pub type StoreResult<T> = std::result::Result<T, StoreError>;
