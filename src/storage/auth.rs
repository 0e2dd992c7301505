//! Authentication and session storage
//!
//! Named operations over the [`StorageKey::AuthToken`] and
//! [`StorageKey::UserData`] keys. The wrapper owns no state beyond its adapter.

use crate::error::{StorageError, StorageResult};
use crate::storage::adapter::DurableStore;
use crate::storage::keys::StorageKey;
use crate::storage::storage_api::Storage;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error};

/// Session state persisted through a [`Storage`] adapter
#[derive(Debug, Clone)]
pub struct AuthStorage<S> {
    storage: Storage<S>,
}

impl<S: DurableStore> AuthStorage<S> {
    /// Wrap an adapter
    pub fn new(storage: Storage<S>) -> Self {
        Self { storage }
    }

    /// Adapter used by this wrapper
    pub fn storage(&self) -> &Storage<S> {
        &self.storage
    }

    /// Persist the session token
    pub async fn save_token(&self, token: &str) -> StorageResult<()> {
        self.storage.set(StorageKey::AuthToken, token).await
    }

    /// Load the session token
    pub async fn get_token(&self) -> StorageResult<Option<String>> {
        self.storage.get(StorageKey::AuthToken).await
    }

    /// Forget the session token
    pub async fn remove_token(&self) -> StorageResult<()> {
        self.storage.remove(StorageKey::AuthToken).await
    }

    /// Persist the signed-in user's profile
    pub async fn save_user_data<T>(&self, data: &T) -> StorageResult<()>
    where
        T: Serialize + ?Sized,
    {
        self.storage.set(StorageKey::UserData, data).await
    }

    /// Load the signed-in user's profile
    pub async fn get_user_data<T>(&self) -> StorageResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        self.storage.get(StorageKey::UserData).await
    }

    /// Forget the signed-in user's profile
    pub async fn remove_user_data(&self) -> StorageResult<()> {
        self.storage.remove(StorageKey::UserData).await
    }

    /// Whether a readable session token is stored
    pub async fn is_authenticated(&self) -> StorageResult<bool> {
        Ok(self.get_token().await?.is_some())
    }

    /// Remove the token and the user profile
    ///
    /// Both removals run concurrently. The call succeeds only when both do;
    /// otherwise [`StorageError::PartialFailure`] lists the keys that were
    /// removed anyway. There is no rollback.
    pub async fn clear_auth(&self) -> StorageResult<()> {
        let (token, user_data) = futures::join!(
            self.storage.remove(StorageKey::AuthToken),
            self.storage.remove(StorageKey::UserData),
        );

        let mut succeeded = Vec::new();
        let mut failures = Vec::new();
        for (key, result) in [(StorageKey::AuthToken, token), (StorageKey::UserData, user_data)] {
            match result {
                Ok(()) => succeeded.push(self.storage.registry().resolve(key)),
                Err(e) => failures.push(e),
            }
        }

        if failures.is_empty() {
            debug!("Cleared auth storage");
            return Ok(());
        }

        error!(
            succeeded = ?succeeded,
            failed = failures.len(),
            "Error clearing auth storage"
        );
        Err(StorageError::PartialFailure {
            operation: "clear_auth".to_string(),
            succeeded,
            failures,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct User {
        id: u32,
        name: String,
    }

    fn auth_storage() -> AuthStorage<MemoryStore> {
        AuthStorage::new(Storage::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_token_lifecycle() {
        let auth = auth_storage();

        auth.save_token("abc123").await.unwrap();
        assert_eq!(auth.get_token().await.unwrap().as_deref(), Some("abc123"));
        assert!(auth.is_authenticated().await.unwrap());

        auth.remove_token().await.unwrap();
        assert_eq!(auth.get_token().await.unwrap(), None);
        assert!(!auth.is_authenticated().await.unwrap());
    }

    #[tokio::test]
    async fn test_user_data_lifecycle() {
        let auth = auth_storage();
        let user = User {
            id: 1,
            name: "x".to_string(),
        };

        auth.save_user_data(&user).await.unwrap();
        assert_eq!(auth.get_user_data::<User>().await.unwrap(), Some(user));

        auth.remove_user_data().await.unwrap();
        assert_eq!(auth.get_user_data::<User>().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clear_auth_keeps_other_keys() {
        let auth = auth_storage();
        auth.save_token("abc123").await.unwrap();
        auth.save_user_data(&serde_json::json!({"id": 1, "name": "x"}))
            .await
            .unwrap();
        auth.storage()
            .set(StorageKey::AppSettings, &serde_json::json!({"theme": "dark"}))
            .await
            .unwrap();

        auth.clear_auth().await.unwrap();

        assert_eq!(auth.get_token().await.unwrap(), None);
        assert_eq!(auth.get_user_data::<User>().await.unwrap(), None);
        assert_eq!(auth.storage().list_keys().await.unwrap(), vec!["app_settings"]);
    }

    #[tokio::test]
    async fn test_clear_auth_on_empty_store() {
        let auth = auth_storage();
        auth.clear_auth().await.unwrap();
        assert!(auth.storage().list_keys().await.unwrap().is_empty());
    }
}
