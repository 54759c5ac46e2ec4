//! Token issuance API and the shared error envelope.

use crate::AppState;
use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use helpline_types::ConnectionDetails;
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;

/// Setup hint returned alongside configuration errors.
const CONFIG_HINT: &str = "Set LIVEKIT_URL, LIVEKIT_API_KEY, and LIVEKIT_API_SECRET in the \
     server environment, or the [livekit] section of config.toml.";

/// Request body for token issuance.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    /// Optional display name; a random identity is substituted if absent
    /// or blank.
    #[serde(rename = "participantName", default)]
    pub participant_name: Option<String>,
}

/// API error type mapping to HTTP status codes and JSON envelopes.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid input: {0}")]
    BadRequest(String),
    #[error("missing configuration: {}", .0.join(", "))]
    NotConfigured(Vec<&'static str>),
    /// Upstream failure collapsed to a fixed user-facing message; the
    /// cause is logged server-side only.
    #[error("{0}")]
    Upstream(&'static str),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": message })),
            )
                .into_response(),
            ApiError::NotConfigured(missing) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "error": "Server misconfigured",
                    "details": missing,
                    "hint": CONFIG_HINT,
                })),
            )
                .into_response(),
            ApiError::Upstream(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": message })),
            )
                .into_response(),
        }
    }
}

/// Handler for `POST /api/token`.
///
/// Fabricates a fresh room and identity and returns the signed
/// connection details. A missing LiveKit configuration is a server
/// fault and names the absent values; a signing failure is collapsed to
/// a generic error.
pub async fn issue_token_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<TokenRequest>,
) -> Result<Json<ConnectionDetails>, ApiError> {
    let missing = state.voice.missing_config();
    if !missing.is_empty() {
        tracing::error!(?missing, "token requested but LiveKit is not configured");
        return Err(ApiError::NotConfigured(missing));
    }

    state
        .voice
        .issue_session(payload.participant_name.as_deref())
        .map(Json)
        .map_err(|e| {
            tracing::error!("failed to generate access token: {}", e);
            ApiError::Upstream("Failed to generate access token")
        })
}
