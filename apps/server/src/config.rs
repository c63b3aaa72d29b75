//! Server configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server bind address (e.g., "0.0.0.0:3000")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// SQLite connection URL
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Admin user name for the users page. Required.
    #[serde(default)]
    pub admin_username: Option<String>,

    /// Admin password for the users page. Required.
    #[serde(default)]
    pub admin_password: Option<String>,

    /// Secret used to sign the admin cookie. A random one is generated when
    /// unset, which logs every admin out on restart.
    #[serde(default)]
    pub cookie_secret: Option<String>,

    /// Whether to enable CORS
    #[serde(default = "default_enable_cors")]
    pub enable_cors: bool,

    /// Allowed CORS origins
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_bind_address() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_database_url() -> String {
    let path = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("newyear")
        .join("newyear.db");
    format!("sqlite://{}?mode=rwc", path.display())
}

fn default_enable_cors() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            database_url: default_database_url(),
            admin_username: None,
            admin_password: None,
            cookie_secret: None,
            enable_cors: default_enable_cors(),
            cors_origins: Vec::new(),
            log_level: default_log_level(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment and optional config file
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok());

        if let Some(config_path) = Self::find_config_file() {
            let contents = std::fs::read_to_string(&config_path)?;
            let file_config = toml::from_str::<ServerConfig>(&contents)?;
            tracing::debug!(path = %config_path.display(), "Loaded config file");
            config.merge_file(file_config);
        }

        config.validate()?;
        Ok(config)
    }

    /// Overrides fields from environment variables read through `lookup`.
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(addr) = lookup("NEWYEAR_BIND_ADDRESS") {
            self.bind_address = addr;
        }

        if let Some(url) = lookup("NEWYEAR_DATABASE_URL") {
            self.database_url = url;
        }

        if let Some(username) = lookup("ADMIN_USERNAME") {
            self.admin_username = Some(username);
        }

        if let Some(password) = lookup("ADMIN_PASSWORD") {
            self.admin_password = Some(password);
        }

        if let Some(secret) = lookup("NEWYEAR_COOKIE_SECRET") {
            self.cookie_secret = Some(secret);
        }

        if let Some(val) = lookup("NEWYEAR_ENABLE_CORS") {
            self.enable_cors = val.parse().unwrap_or(true);
        }

        if let Some(origins) = lookup("NEWYEAR_CORS_ORIGINS") {
            self.cors_origins = origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        if let Some(level) = lookup("NEWYEAR_LOG_LEVEL") {
            self.log_level = level;
        }
    }

    /// Fills fields still at their defaults from a config file.
    /// Environment values take precedence over the file.
    fn merge_file(&mut self, file_config: ServerConfig) {
        if self.bind_address == default_bind_address() {
            self.bind_address = file_config.bind_address;
        }
        if self.database_url == default_database_url() {
            self.database_url = file_config.database_url;
        }
        if self.admin_username.is_none() {
            self.admin_username = file_config.admin_username;
        }
        if self.admin_password.is_none() {
            self.admin_password = file_config.admin_password;
        }
        if self.cookie_secret.is_none() {
            self.cookie_secret = file_config.cookie_secret;
        }
        if self.enable_cors == default_enable_cors() {
            self.enable_cors = file_config.enable_cors;
        }
        if self.cors_origins.is_empty() {
            self.cors_origins = file_config.cors_origins;
        }
        if self.log_level == default_log_level() {
            self.log_level = file_config.log_level;
        }
    }

    /// Find the config file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let locations = [
            PathBuf::from("newyear-server.toml"),
            PathBuf::from("/etc/newyear/server.toml"),
            dirs::config_dir()
                .map(|p| p.join("newyear").join("server.toml"))
                .unwrap_or_default(),
        ];

        locations
            .into_iter()
            .find(|p| !p.as_os_str().is_empty() && p.exists())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let username = self.admin_username.as_deref().unwrap_or_default();
        let password = self.admin_password.as_deref().unwrap_or_default();
        if username.is_empty() || password.is_empty() {
            return Err(ConfigError::MissingAdminCredentials);
        }

        if let Some(secret) = &self.cookie_secret {
            if secret.len() < auth::MIN_SIGNING_SECRET_LEN {
                return Err(ConfigError::WeakCookieSecret {
                    min: auth::MIN_SIGNING_SECRET_LEN,
                    actual: secret.len(),
                });
            }
        }

        Ok(())
    }

    /// Returns the on-disk database file, or `None` for in-memory databases.
    pub fn database_file(&self) -> Option<PathBuf> {
        let rest = self
            .database_url
            .strip_prefix("sqlite://")
            .or_else(|| self.database_url.strip_prefix("sqlite:"))?;
        let path = rest.split('?').next().unwrap_or_default();
        if path.is_empty() || path == ":memory:" {
            return None;
        }
        Some(PathBuf::from(path))
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("ADMIN_USERNAME and ADMIN_PASSWORD must both be set")]
    MissingAdminCredentials,

    #[error("Cookie secret must be at least {min} bytes, got {actual}")]
    WeakCookieSecret { min: usize, actual: usize },

    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}
