//! UseCase error types.

use thiserror::Error;

use crate::domain::{MessagePushError, RepositoryError, ValueObjectError};

/// Reasons a payload was not relayed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    /// Content failed validation (empty or whitespace-only)
    #[error("invalid message content: {0}")]
    InvalidContent(#[from] ValueObjectError),

    /// Message could not be prepared for broadcast
    #[error("broadcast failed: {0}")]
    BroadcastFailed(#[from] MessagePushError),
}

/// Errors raised while reading message history
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetAnonymousMessagesError {
    /// Message store failed
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
