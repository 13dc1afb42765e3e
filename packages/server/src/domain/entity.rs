//! Domain entities.

use super::value_object::{FamilyId, MessageContent, MessageId, Timestamp};

/// One relayed anonymous chat message.
///
/// Author identity is deliberately absent. Instances are transient: the relay
/// builds one per accepted payload, broadcasts it and drops it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub content: MessageContent,
    pub created_at: Timestamp,
}

impl ChatMessage {
    pub fn new(id: MessageId, content: MessageContent, created_at: Timestamp) -> Self {
        Self {
            id,
            content,
            created_at,
        }
    }
}

/// A relayed message kept by a message store, together with the family it
/// was delivered to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMessage {
    pub family_id: FamilyId,
    pub message: ChatMessage,
}

impl StoredMessage {
    pub fn new(family_id: FamilyId, message: ChatMessage) -> Self {
        Self { family_id, message }
    }
}
