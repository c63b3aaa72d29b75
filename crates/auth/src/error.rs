//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The Authorization header does not use the Basic scheme.
    #[error("Unsupported authorization scheme")]
    UnsupportedScheme,

    /// The Basic payload is not valid base64 or not valid UTF-8.
    #[error("Malformed credentials: {0}")]
    MalformedCredentials(String),

    /// The admin marker could not be read.
    #[error("Invalid marker")]
    InvalidMarker,

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type for authentication operations.
pub type AuthResult<T> = Result<T, AuthError>;
