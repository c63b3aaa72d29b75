//! Client configuration

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Server URL
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// File holding the session between runs
    #[serde(default = "default_session_path")]
    pub session_path: PathBuf,

    /// Pause between a mood pick and the Experience page, in milliseconds
    #[serde(default = "default_transition_delay_ms")]
    pub transition_delay_ms: u64,

    /// Year counted down to. Defaults to the year after the current one.
    #[serde(default)]
    pub target_year: Option<i32>,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_server_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_session_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("newyear")
        .join("session.json")
}

fn default_transition_delay_ms() -> u64 {
    2200
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            session_path: default_session_path(),
            transition_delay_ms: default_transition_delay_ms(),
            target_year: None,
            log_level: default_log_level(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment and optional config file
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok());

        if let Some(config_path) = Self::find_config_file() {
            let contents = std::fs::read_to_string(&config_path)?;
            let file_config = toml::from_str::<ClientConfig>(&contents)?;
            config.merge_file(file_config);
        }

        Ok(config)
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("NEWYEAR_SERVER_URL") {
            self.server_url = url;
        }

        if let Some(path) = lookup("NEWYEAR_SESSION_PATH") {
            self.session_path = PathBuf::from(path);
        }

        if let Some(delay) = lookup("NEWYEAR_TRANSITION_DELAY_MS") {
            self.transition_delay_ms = delay.parse().unwrap_or(default_transition_delay_ms());
        }

        if let Some(year) = lookup("NEWYEAR_TARGET_YEAR") {
            match year.parse() {
                Ok(year) => self.target_year = Some(year),
                Err(_) => tracing::warn!(value = %year, "Ignoring invalid NEWYEAR_TARGET_YEAR"),
            }
        }

        if let Some(level) = lookup("NEWYEAR_LOG_LEVEL") {
            self.log_level = level;
        }
    }

    /// Merge file config (env takes precedence)
    fn merge_file(&mut self, file_config: ClientConfig) {
        if self.server_url == default_server_url() {
            self.server_url = file_config.server_url;
        }
        if self.session_path == default_session_path() {
            self.session_path = file_config.session_path;
        }
        if self.transition_delay_ms == default_transition_delay_ms() {
            self.transition_delay_ms = file_config.transition_delay_ms;
        }
        if self.target_year.is_none() {
            self.target_year = file_config.target_year;
        }
        if self.log_level == default_log_level() {
            self.log_level = file_config.log_level;
        }
    }

    /// Find the config file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let locations = [
            PathBuf::from("newyear-client.toml"),
            dirs::config_dir()
                .map(|p| p.join("newyear").join("client.toml"))
                .unwrap_or_default(),
        ];

        locations
            .into_iter()
            .find(|p| !p.as_os_str().is_empty() && p.exists())
    }

    /// Returns the mood transition delay.
    pub fn transition_delay(&self) -> Duration {
        Duration::from_millis(self.transition_delay_ms)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}
