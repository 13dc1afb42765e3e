//! Error types for the chat client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Family id is not accepted by the relay
    #[error("Invalid family id '{0}' (use 1-64 characters from A-Z, a-z, 0-9, '_' and '-')")]
    InvalidFamilyId(String),

    /// Could not open the connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// An established connection dropped
    #[error("Connection lost: {0}")]
    ConnectionLost(String),
}
