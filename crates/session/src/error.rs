//! Session error types.

use thiserror::Error;

/// Errors that can occur while reading or changing session state.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading or writing the backing file failed.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file is not a JSON object of strings.
    #[error("Storage format error: {0}")]
    Format(#[from] serde_json::Error),

    /// Storage lock poisoned.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// The transition needs a registered identity.
    #[error("No registered user in this session")]
    NotRegistered,
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
