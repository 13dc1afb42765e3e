//! Domain error types.

use thiserror::Error;

/// Validation errors raised while constructing value objects
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    /// Message content is empty after trimming whitespace
    #[error("message content must not be empty")]
    EmptyContent,

    /// Family id is empty
    #[error("family id must not be empty")]
    EmptyFamilyId,

    /// Family id exceeds the maximum length
    #[error("family id must be at most {max} characters (got {actual})")]
    FamilyIdTooLong { max: usize, actual: usize },

    /// Family id contains characters outside `[A-Za-z0-9_-]`
    #[error("family id '{0}' contains invalid characters")]
    InvalidFamilyId(String),

    /// Connection id is not a UUID
    #[error("connection id '{0}' is not a valid UUID")]
    InvalidConnectionId(String),
}

/// Errors raised while pushing messages to connected clients
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    /// Message could not be encoded for the wire
    #[error("failed to serialize message: {0}")]
    Serialization(String),
}

/// Errors raised by message stores
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// Storage backend is unavailable
    #[error("message store unavailable: {0}")]
    Unavailable(String),
}
