//! Helpline server library logic.

pub mod api;
pub mod api_agent;
pub mod config;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use helpline_agent::AgentClient;
use helpline_voice::VoiceService;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Application state shared across all request handlers.
pub struct AppState {
    /// LiveKit session/token issuer.
    pub voice: Arc<VoiceService>,
    /// Chat agent backend client.
    pub agent: Arc<AgentClient>,
}

/// Maximum request body size (64 KiB). All bodies here are small JSON
/// control payloads.
const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;

/// Health check handler.
///
/// Returns `200 OK` with server status and version. Used by load
/// balancers, monitoring, and CI to verify the server is running.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/token", post(api::issue_token_handler))
        .route("/api/agent/init", post(api_agent::init_handler))
        .route("/api/agent/message", post(api_agent::message_handler))
        .route(
            "/api/agent/history/{sessionId}",
            get(api_agent::history_handler),
        )
        .route(
            "/api/agent/session/{sessionId}",
            delete(api_agent::end_session_handler),
        )
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(Extension(Arc::new(state)))
}
