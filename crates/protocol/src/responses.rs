//! Response bodies.

use entities::User;
use serde::{Deserialize, Serialize};

use crate::{ProtocolError, ProtocolResult};

/// Successful response carrying a user: `{success: true, user}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub success: bool,
    pub user: User,
}

impl UserResponse {
    pub fn new(user: User) -> Self {
        Self {
            success: true,
            user,
        }
    }
}

/// Failure response: `{success: false, error}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// Either response shape, as seen by a client that has not checked `success`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserEnvelope {
    pub success: bool,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub error: Option<String>,
}

impl UserEnvelope {
    /// Converts the envelope into the user or the server-reported error.
    pub fn into_result(self) -> ProtocolResult<User> {
        if !self.success {
            return Err(ProtocolError::Rejected(
                self.error.unwrap_or_else(|| "Request failed".to_string()),
            ));
        }
        self.user.ok_or(ProtocolError::MissingUser)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_envelope() {
        let envelope: UserEnvelope =
            serde_json::from_str(r#"{"success":false,"error":"Name is required"}"#).unwrap();

        match envelope.into_result() {
            Err(ProtocolError::Rejected(message)) => assert_eq!(message, "Name is required"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_success_envelope() {
        let body = r#"{"success":true,"user":{"id":3,"name":"Ada","mood":"bold","createdAt":"2026-01-01T00:00:00Z"}}"#;
        let envelope: UserEnvelope = serde_json::from_str(body).unwrap();
        let user = envelope.into_result().unwrap();

        assert_eq!(user.id, 3);
        assert_eq!(user.mood, Some(entities::Mood::Bold));
        assert_eq!(
            user.created_at,
            "2026-01-01T00:00:00Z".parse::<chrono::DateTime<chrono::Utc>>().unwrap()
        );
    }

    #[test]
    fn test_success_without_user() {
        let envelope: UserEnvelope = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(matches!(
            envelope.into_result(),
            Err(ProtocolError::MissingUser)
        ));
    }

    #[test]
    fn test_error_response_shape() {
        let value = serde_json::to_value(ErrorResponse::new("Invalid user ID")).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["error"], "Invalid user ID");
    }
}
