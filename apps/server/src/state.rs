//! Application state

use std::sync::Arc;

use auth::{AdminCredentials, AuthError};
use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use user_store::{SqliteUserStore, UserStore, UserStoreError};

use crate::config::{ConfigError, ServerConfig};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// User store
    pub store: Arc<dyn UserStore>,

    /// Admin credential pair guarding the users page
    pub admin: Arc<AdminCredentials>,

    /// Key signing the admin marker cookie
    pub cookie_key: Key,

    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Create a new application state backed by the configured SQLite database
    pub async fn new(config: ServerConfig) -> Result<Self, StateError> {
        config.validate()?;

        if let Some(path) = config.database_file() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let store = SqliteUserStore::connect(&config.database_url).await?;
        tracing::info!(database_url = %config.database_url, "User store ready");

        Self::with_store(config, Arc::new(store))
    }

    /// Create application state around an existing store
    pub fn with_store(config: ServerConfig, store: Arc<dyn UserStore>) -> Result<Self, StateError> {
        config.validate()?;

        let admin = AdminCredentials::new(
            config.admin_username.clone().unwrap_or_default(),
            config.admin_password.clone().unwrap_or_default(),
        )?;

        let cookie_key = match &config.cookie_secret {
            Some(secret) => Key::from(secret.as_bytes()),
            None => {
                tracing::warn!(
                    "NEWYEAR_COOKIE_SECRET is not set; using a random key, admin sessions end on restart"
                );
                Key::from(&auth::generate_signing_secret())
            }
        };

        Ok(Self {
            store,
            admin: Arc::new(admin),
            cookie_key,
            config: Arc::new(config),
        })
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

/// State initialization errors
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("Store error: {0}")]
    Store(#[from] UserStoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
