//! Recognized storage keys and the registry that resolves them
//!
//! The set of keys is closed: adding one means adding a [`StorageKey`] variant.
//! A [`KeyRegistry`] is handed to each adapter so that several adapters can
//! share one durable store under separate namespaces.

use crate::error::{StorageError, StorageResult};
use crate::storage::constants::{MAX_KEY_LENGTH, NAMESPACE_SEPARATOR};
use std::fmt;

/// Keys this library is allowed to read and write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StorageKey {
    /// Session bearer token
    AuthToken,
    /// Profile payload of the signed-in user
    UserData,
    /// Application preferences
    AppSettings,
}

impl StorageKey {
    /// Every registry entry, in declaration order
    pub const ALL: [StorageKey; 3] = [
        StorageKey::AuthToken,
        StorageKey::UserData,
        StorageKey::AppSettings,
    ];

    /// Stable name written to the durable store
    pub const fn as_str(self) -> &'static str {
        match self {
            StorageKey::AuthToken => "auth_token",
            StorageKey::UserData => "user_data",
            StorageKey::AppSettings => "app_settings",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps [`StorageKey`]s to the keys used in the durable store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyRegistry {
    namespace: Option<String>,
}

impl KeyRegistry {
    /// Registry resolving keys to their bare names
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry prefixing every key with `namespace` and `:`
    pub fn namespaced(namespace: impl Into<String>) -> StorageResult<Self> {
        let namespace = namespace.into();
        validate_namespace(&namespace)?;
        Ok(Self {
            namespace: Some(namespace),
        })
    }

    /// Namespace in use, if any
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Store key for `key`
    pub fn resolve(&self, key: StorageKey) -> String {
        match &self.namespace {
            Some(namespace) => format!("{}{}{}", namespace, NAMESPACE_SEPARATOR, key.as_str()),
            None => key.as_str().to_string(),
        }
    }
}

fn validate_namespace(namespace: &str) -> StorageResult<()> {
    let reason = if namespace.is_empty() {
        Some("namespace cannot be empty")
    } else if namespace.contains(NAMESPACE_SEPARATOR) {
        Some("namespace cannot contain the separator")
    } else if namespace.chars().any(char::is_control) {
        Some("namespace cannot contain control characters")
    } else if namespace.len() >= MAX_KEY_LENGTH {
        Some("namespace too long")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(StorageError::InvalidNamespace {
            namespace: namespace.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}
