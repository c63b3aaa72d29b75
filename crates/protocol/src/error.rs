//! Errors raised when interpreting API responses.

use thiserror::Error;

/// Errors that can occur when reading an API envelope.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The server reported a failure.
    #[error("{0}")]
    Rejected(String),

    /// The envelope claimed success but carried no user.
    #[error("Response missing user")]
    MissingUser,
}

/// Result type for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;
