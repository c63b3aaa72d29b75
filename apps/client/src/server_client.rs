//! Client for the New Year server API

use async_trait::async_trait;
use entities::{Mood, User};
use protocol::{
    user_mood_path, ProtocolError, RegisterRequest, UpdateMoodRequest, UserEnvelope, HEALTH_PATH,
    REGISTER_PATH,
};
use session::{MoodSync, MoodSyncError};
use thiserror::Error;
use tracing::debug;

/// Client for the visitor endpoints of the server
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// Server URL
    server_url: String,
    /// HTTP client
    http_client: reqwest::Client,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(server_url: &str) -> Self {
        Self {
            server_url: server_url.trim_end_matches('/').to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Returns the server URL without a trailing slash
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Register a visitor by name
    pub async fn register(&self, name: &str) -> Result<User, ClientError> {
        debug!(name = %name, "Registering");

        let response = self
            .http_client
            .post(format!("{}{}", self.server_url, REGISTER_PATH))
            .json(&RegisterRequest {
                name: name.to_string(),
            })
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        read_user(response).await
    }

    /// Store a mood for a registered visitor
    pub async fn update_mood(&self, user_id: i64, mood: Mood) -> Result<User, ClientError> {
        debug!(user_id, mood = %mood, "Updating mood");

        let response = self
            .http_client
            .patch(format!("{}{}", self.server_url, user_mood_path(user_id)))
            .json(&UpdateMoodRequest::new(mood))
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        read_user(response).await
    }

    /// Check server health
    pub async fn health_check(&self) -> Result<(), ClientError> {
        let response = self
            .http_client
            .get(format!("{}{}", self.server_url, HEALTH_PATH))
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ClientError::ServerError(format!(
                "Health check failed with status {}",
                response.status()
            )))
        }
    }
}

/// Reads a `{success, user | error}` envelope, whatever the status code.
async fn read_user(response: reqwest::Response) -> Result<User, ClientError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ClientError::Network(e.to_string()))?;

    let envelope: UserEnvelope = match serde_json::from_str(&body) {
        Ok(envelope) => envelope,
        Err(_) if !status.is_success() => {
            return Err(ClientError::ServerError(format!(
                "Server returned status {status}"
            )));
        }
        Err(e) => return Err(ClientError::Deserialization(e.to_string())),
    };

    envelope.into_result().map_err(|e| match e {
        ProtocolError::Rejected(message) => ClientError::Rejected(message),
        other @ ProtocolError::MissingUser => ClientError::Deserialization(other.to_string()),
    })
}

#[async_trait]
impl MoodSync for ApiClient {
    async fn update_mood(&self, user_id: i64, mood: Mood) -> Result<User, MoodSyncError> {
        Ok(ApiClient::update_mood(self, user_id, mood).await?)
    }
}

/// Client errors
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// The server answered `{success: false, error}`.
    #[error("{0}")]
    Rejected(String),
}
