use serde::{Deserialize, Serialize};
use std::fmt;

fn default_token_ttl_seconds() -> u64 {
    600
}

/// LiveKit connection and signing configuration.
///
/// All three of `url`, `api_key`, and `api_secret` must be present for
/// token issuance to work; [`LiveKitConfig::missing_values`] reports
/// which are absent.
#[derive(Clone, Serialize, Deserialize)]
pub struct LiveKitConfig {
    /// LiveKit endpoint URL handed to clients (e.g. `wss://...`).
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default, skip_serializing)]
    pub api_secret: String,
    /// JWT token TTL in seconds for join tokens. Default: 600 (10 minutes).
    #[serde(default = "default_token_ttl_seconds")]
    pub token_ttl_seconds: u64,
}

impl Default for LiveKitConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: String::new(),
            api_secret: String::new(),
            token_ttl_seconds: default_token_ttl_seconds(),
        }
    }
}

impl fmt::Debug for LiveKitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveKitConfig")
            .field("url", &self.url)
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .field("token_ttl_seconds", &self.token_ttl_seconds)
            .finish()
    }
}

impl LiveKitConfig {
    pub fn new(
        url: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            token_ttl_seconds: default_token_ttl_seconds(),
        }
    }

    /// Reads configuration from the `LIVEKIT_URL`, `LIVEKIT_API_KEY`, and
    /// `LIVEKIT_API_SECRET` environment variables. Unset variables leave
    /// the corresponding field empty.
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("LIVEKIT_URL").unwrap_or_default(),
            api_key: std::env::var("LIVEKIT_API_KEY").unwrap_or_default(),
            api_secret: std::env::var("LIVEKIT_API_SECRET").unwrap_or_default(),
            token_ttl_seconds: default_token_ttl_seconds(),
        }
    }

    /// Names of the required values that are absent, in checked order
    /// (url, key, secret). Empty when the config is complete.
    pub fn missing_values(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.url.trim().is_empty() {
            missing.push("LIVEKIT_URL");
        }
        if self.api_key.trim().is_empty() {
            missing.push("LIVEKIT_API_KEY");
        }
        if self.api_secret.trim().is_empty() {
            missing.push("LIVEKIT_API_SECRET");
        }
        missing
    }
}
