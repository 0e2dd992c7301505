//! Sign-in/sign-out flow against a file store
//!
//! ```text
//! RUST_LOG=kv_persist=debug cargo run --example session_flow -- ./session-data
//! ```

use color_eyre::eyre::{eyre, WrapErr};
use kv_persist::storage::{
    AuthStorage, FileStore, FileStoreConfig, SettingsStorage, Storage, StorageConfig,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Serialize, Deserialize)]
struct User {
    id: u64,
    name: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Preferences {
    dark_mode: bool,
}

async fn open_session(
    base_path: PathBuf,
) -> kv_persist::Result<(AuthStorage<FileStore>, SettingsStorage<FileStore>)> {
    let file_config = FileStoreConfig {
        base_path,
        ..Default::default()
    };
    let storage = Storage::open_file(file_config, StorageConfig::default()).await?;
    Ok((AuthStorage::new(storage.clone()), SettingsStorage::new(storage)))
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let base_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("kv-persist-demo"));
    let (auth, settings) = open_session(base_path)
        .await
        .wrap_err("failed to open session storage")?;

    auth.save_token("abc123").await?;
    auth.save_user_data(&User {
        id: 1,
        name: "x".to_string(),
    })
    .await?;
    let mut prefs: Preferences = settings.get_settings_or_default().await?;
    prefs.dark_mode = !prefs.dark_mode;
    settings.save_settings(&prefs).await?;

    let user: User = auth
        .get_user_data()
        .await?
        .ok_or_else(|| eyre!("user data missing after save"))?;
    let keys = auth.storage().list_keys().await?;
    info!(user = ?user, prefs = ?prefs, keys = ?keys, "Signed in");

    auth.clear_auth().await.wrap_err("sign-out left session data behind")?;
    let authenticated = auth.is_authenticated().await?;
    let keys = auth.storage().list_keys().await?;
    info!(authenticated, keys = ?keys, "Signed out");

    Ok(())
}
