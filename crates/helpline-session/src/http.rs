use crate::transport::{TokenError, TokenSource};
use helpline_types::ConnectionDetails;
use serde_json::json;

/// Fixed fallback shown when the server's error envelope has no message.
const TOKEN_FALLBACK_ERROR: &str = "Failed to fetch connection details";

/// [`TokenSource`] backed by the Helpline token route.
///
/// Posts `{"participantName": ...}` and expects `ConnectionDetails` on
/// success. On failure the envelope's `error` message is surfaced
/// verbatim when present, otherwise the fixed fallback.
#[derive(Debug, Clone)]
pub struct HttpTokenSource {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpTokenSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

impl TokenSource for HttpTokenSource {
    async fn issue(&self, participant_name: &str) -> Result<ConnectionDetails, TokenError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&json!({ "participantName": participant_name }))
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("token request failed: {}", e);
                TokenError::Rejected(TOKEN_FALLBACK_ERROR.to_string())
            })?;

        if !response.status().is_success() {
            let message = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|body| {
                    body.get("error")
                        .and_then(|e| e.as_str())
                        .map(str::to_string)
                })
                .unwrap_or_else(|| TOKEN_FALLBACK_ERROR.to_string());
            return Err(TokenError::Rejected(message));
        }

        response.json().await.map_err(|e| {
            tracing::warn!("token response was not valid connection details: {}", e);
            TokenError::Rejected(TOKEN_FALLBACK_ERROR.to_string())
        })
    }
}
