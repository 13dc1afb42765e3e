//! HTTP API DTOs.

use serde::{Deserialize, Serialize};

/// One stored anonymous message in a history listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnonymousMessageDto {
    pub id: u64,
    pub content: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

/// Body of `POST /api/anonymous-messages`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostAnonymousMessageRequest {
    pub content: String,
    #[serde(rename = "familyId", default)]
    pub family_id: Option<String>,
}

/// Response of `POST /api/anonymous-messages`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostAnonymousMessageResponse {
    pub id: u64,
    pub message: String,
}

/// Error body returned with 4xx / 5xx responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponseDto {
    pub error: String,
}
