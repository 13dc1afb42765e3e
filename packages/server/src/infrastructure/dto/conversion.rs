//! Conversion logic between DTOs and domain entities.

use kinnren_shared::time::timestamp_to_iso8601;

use crate::domain::entity;
use crate::infrastructure::dto::{http, websocket};

// ========================================
// Domain Entity → DTO
// ========================================

impl From<&entity::ChatMessage> for websocket::OutboundMessage {
    fn from(model: &entity::ChatMessage) -> Self {
        Self {
            id: model.id.value(),
            content: model.content.as_str().to_string(),
            created_at: timestamp_to_iso8601(model.created_at.value()),
            r#type: websocket::MessageType::AnonymousMessage,
        }
    }
}

impl From<entity::StoredMessage> for http::AnonymousMessageDto {
    fn from(model: entity::StoredMessage) -> Self {
        Self {
            id: model.message.id.value(),
            created_at: timestamp_to_iso8601(model.message.created_at.value()),
            content: model.message.content.into_string(),
        }
    }
}
