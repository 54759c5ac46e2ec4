//! Chat agent proxy handlers.
//!
//! Pure forwarders: the backend's JSON body is relayed verbatim on
//! success, and every failure collapses to a fixed message with the
//! cause logged server-side only.

use crate::api::ApiError;
use crate::AppState;
use axum::extract::{Extension, Json, Path};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

const INIT_FAILED: &str = "Failed to initialize chat session";
const MESSAGE_FAILED: &str = "Failed to send message";
const HISTORY_FAILED: &str = "Failed to fetch chat history";
const END_FAILED: &str = "Failed to end chat session";

/// Request body for `POST /api/agent/message`.
#[derive(Debug, Deserialize)]
pub struct AgentMessageRequest {
    pub message: String,
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

/// Handler for `POST /api/agent/init`.
pub async fn init_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<Value>, ApiError> {
    state.agent.init().await.map(Json).map_err(|e| {
        tracing::error!("chat init failed: {}", e);
        ApiError::Upstream(INIT_FAILED)
    })
}

/// Handler for `POST /api/agent/message`.
pub async fn message_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<AgentMessageRequest>,
) -> Result<Json<Value>, ApiError> {
    if payload.message.trim().is_empty() {
        return Err(ApiError::BadRequest("message is required".to_string()));
    }
    if payload.session_id.trim().is_empty() {
        return Err(ApiError::BadRequest("sessionId is required".to_string()));
    }

    state
        .agent
        .send_message(&payload.message, &payload.session_id)
        .await
        .map(Json)
        .map_err(|e| {
            tracing::error!("chat message failed: {}", e);
            ApiError::Upstream(MESSAGE_FAILED)
        })
}

/// Handler for `GET /api/agent/history/{sessionId}`.
pub async fn history_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.agent.history(&session_id).await.map(Json).map_err(|e| {
        tracing::error!("chat history fetch failed: {}", e);
        ApiError::Upstream(HISTORY_FAILED)
    })
}

/// Handler for `DELETE /api/agent/session/{sessionId}`.
pub async fn end_session_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state
        .agent
        .end_session(&session_id)
        .await
        .map(Json)
        .map_err(|e| {
            tracing::error!("chat session end failed: {}", e);
            ApiError::Upstream(END_FAILED)
        })
}
