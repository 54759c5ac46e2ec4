use crate::error::AgentError;
use serde_json::{json, Value};

/// Default backend base address, matching the local development setup.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Client for the chat agent backend.
#[derive(Debug, Clone)]
pub struct AgentClient {
    http: reqwest::Client,
    base_url: String,
}

impl AgentClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Starts a new chat session. The backend responds with (at least) a
    /// session id and a greeting; the body is relayed as-is.
    pub async fn init(&self) -> Result<Value, AgentError> {
        let url = format!("{}/api/chat/init", self.base_url);
        let response = self.http.post(&url).json(&json!({})).send().await?;
        Self::passthrough(response).await
    }

    /// Forwards a user message to an existing session.
    pub async fn send_message(&self, message: &str, session_id: &str) -> Result<Value, AgentError> {
        let url = format!("{}/api/chat/message", self.base_url);
        let body = json!({
            "message": message,
            "sessionId": session_id,
        });
        let response = self.http.post(&url).json(&body).send().await?;
        Self::passthrough(response).await
    }

    /// Fetches the conversation history for a session.
    pub async fn history(&self, session_id: &str) -> Result<Value, AgentError> {
        let url = format!("{}/api/chat/history/{}", self.base_url, session_id);
        let response = self.http.get(&url).send().await?;
        Self::passthrough(response).await
    }

    /// Ends a chat session.
    pub async fn end_session(&self, session_id: &str) -> Result<Value, AgentError> {
        let url = format!("{}/api/chat/session/{}", self.base_url, session_id);
        let response = self.http.delete(&url).send().await?;
        Self::passthrough(response).await
    }

    async fn passthrough(response: reqwest::Response) -> Result<Value, AgentError> {
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "agent backend returned an error status");
            return Err(AgentError::Status(status.as_u16()));
        }
        Ok(response.json().await?)
    }
}

impl Default for AgentClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn init_relays_backend_body_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat/init"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "sessionId": "abc-123",
                "greeting": "Hi! How can I help?"
            })))
            .mount(&server)
            .await;

        let client = AgentClient::new(server.uri());
        let body = client.init().await.unwrap();
        assert_eq!(body["sessionId"], "abc-123");
        assert_eq!(body["greeting"], "Hi! How can I help?");
    }

    #[tokio::test]
    async fn send_message_forwards_message_and_session_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat/message"))
            .and(body_json(json!({
                "message": "where is my order?",
                "sessionId": "abc-123"
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"response": "Let me check that for you."})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = AgentClient::new(server.uri());
        let body = client
            .send_message("where is my order?", "abc-123")
            .await
            .unwrap();
        assert_eq!(body["response"], "Let me check that for you.");
    }

    #[tokio::test]
    async fn history_and_end_session_pass_through() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/chat/history/abc-123"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"sessionId": "abc-123", "history": []})),
            )
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/chat/session/abc-123"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"message": "Goodbye!"})),
            )
            .mount(&server)
            .await;

        let client = AgentClient::new(server.uri());
        assert_eq!(client.history("abc-123").await.unwrap()["sessionId"], "abc-123");
        assert_eq!(
            client.end_session("abc-123").await.unwrap()["message"],
            "Goodbye!"
        );
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat/init"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({"detail": "agent exploded"})),
            )
            .mount(&server)
            .await;

        let client = AgentClient::new(server.uri());
        match client.init().await {
            Err(AgentError::Status(500)) => {}
            other => panic!("expected Status(500), got {:?}", other),
        }
    }

    #[tokio::test]
    async fn unreachable_backend_is_an_error() {
        // Nothing listens on this port.
        let client = AgentClient::new("http://127.0.0.1:1");
        assert!(matches!(client.init().await, Err(AgentError::Request(_))));
    }

    #[test]
    fn trailing_slash_is_normalized() {
        let client = AgentClient::new("http://localhost:8000/");
        assert_eq!(client.base_url(), "http://localhost:8000");
    }
}
