//! Server error types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use protocol::ErrorResponse;
use user_store::UserStoreError;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Invalid request parameters.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Storage failure. The client only sees `context`.
    #[error("{context}: {source}")]
    Persistence {
        context: &'static str,
        #[source]
        source: UserStoreError,
    },
}

impl ServerError {
    /// Wraps a store error behind a client-facing message.
    pub fn persistence(context: &'static str, source: UserStoreError) -> Self {
        Self::Persistence { context, source }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ServerError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ServerError::Persistence { context, source } => {
                tracing::error!(error = %source, "{}", context);
                (StatusCode::INTERNAL_SERVER_ERROR, context.to_string())
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
