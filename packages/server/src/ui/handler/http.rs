//! HTTP API endpoint handlers.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::{
    domain::FamilyId,
    infrastructure::dto::http::{
        AnonymousMessageDto, ErrorResponseDto, PostAnonymousMessageRequest,
        PostAnonymousMessageResponse,
    },
    ui::state::AppState,
    usecase::RelayError,
};

type ApiError = (StatusCode, Json<ErrorResponseDto>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponseDto {
            error: message.into(),
        }),
    )
}

fn parse_family_id(raw: Option<String>) -> Result<FamilyId, ApiError> {
    match raw {
        None => Ok(FamilyId::default()),
        Some(raw) => {
            FamilyId::try_from(raw).map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))
        }
    }
}

/// Query parameters for the history endpoint
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub family_id: Option<String>,
    pub limit: Option<usize>,
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Recent anonymous messages of a family, newest first
pub async fn get_anonymous_messages(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<AnonymousMessageDto>>, ApiError> {
    let family_id = parse_family_id(query.family_id)?;

    let messages = state
        .get_anonymous_messages_usecase
        .execute(&family_id, query.limit)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load messages for family '{}': {}", family_id, e);
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "failed to load messages")
        })?;

    // Domain Model から DTO への変換
    Ok(Json(messages.into_iter().map(Into::into).collect()))
}

/// Relay an anonymous message posted over HTTP to the family's WebSocket clients
pub async fn post_anonymous_message(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PostAnonymousMessageRequest>,
) -> Result<Json<PostAnonymousMessageResponse>, ApiError> {
    let family_id = parse_family_id(request.family_id)?;

    match state
        .relay_message_usecase
        .execute(&family_id, request.content)
        .await
    {
        Ok(outcome) => Ok(Json(PostAnonymousMessageResponse {
            id: outcome.message.id.value(),
            message: "Message sent successfully".to_string(),
        })),
        Err(RelayError::InvalidContent(e)) => {
            Err(api_error(StatusCode::BAD_REQUEST, e.to_string()))
        }
        Err(e) => {
            tracing::error!("Failed to relay posted message: {}", e);
            Err(api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to relay message",
            ))
        }
    }
}

/// Debug endpoint: number of open connections per family
pub async fn debug_connections(
    State(state): State<Arc<AppState>>,
) -> Json<BTreeMap<String, usize>> {
    let counts = state.get_connection_stats_usecase.execute().await;
    Json(
        counts
            .into_iter()
            .map(|(family_id, count)| (family_id.into_string(), count))
            .collect(),
    )
}
