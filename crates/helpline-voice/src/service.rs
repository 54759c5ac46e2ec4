use crate::config::LiveKitConfig;
use crate::error::VoiceError;
use helpline_types::ConnectionDetails;
use livekit_api::access_token::{AccessToken, VideoGrants};
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::time::Duration;

/// Fixed namespace prefix for generated room names.
pub const ROOM_PREFIX: &str = "voice-chat-";

/// Length of the random suffix on generated room names and identities.
const SUFFIX_LEN: usize = 8;

/// Issues LiveKit session credentials.
#[derive(Debug)]
pub struct VoiceService {
    config: LiveKitConfig,
}

impl VoiceService {
    pub fn new(config: LiveKitConfig) -> Self {
        Self { config }
    }

    pub fn is_configured(&self) -> bool {
        self.config.missing_values().is_empty()
    }

    /// Names of absent required config values, in checked order.
    pub fn missing_config(&self) -> Vec<&'static str> {
        self.config.missing_values()
    }

    /// Returns the LiveKit endpoint URL handed to clients.
    pub fn url(&self) -> &str {
        &self.config.url
    }

    /// Fabricates a fresh session: a random room under [`ROOM_PREFIX`],
    /// a participant identity (the trimmed supplied name, or a random
    /// `user-*` identity when absent or blank), and a join token scoped
    /// to that room.
    pub fn issue_session(
        &self,
        participant_name: Option<&str>,
    ) -> Result<ConnectionDetails, VoiceError> {
        let missing = self.config.missing_values();
        if !missing.is_empty() {
            return Err(VoiceError::NotConfigured(missing));
        }

        let room_name = format!("{}{}", ROOM_PREFIX, random_suffix(SUFFIX_LEN));
        let identity = match participant_name.map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("user-{}", random_suffix(SUFFIX_LEN)),
        };

        let access_token = self.generate_join_token(&room_name, &identity, &identity)?;

        tracing::debug!(room = %room_name, identity = %identity, "issued session credentials");

        Ok(ConnectionDetails {
            access_token,
            url: self.config.url.clone(),
            room_name,
            identity,
        })
    }

    /// Signs a time-boxed join token for `room_name`, granting publish,
    /// subscribe, data publishing, and own-metadata updates.
    pub fn generate_join_token(
        &self,
        room_name: &str,
        participant_identity: &str,
        participant_name: &str,
    ) -> Result<String, VoiceError> {
        let token = AccessToken::with_api_key(&self.config.api_key, &self.config.api_secret)
            .with_identity(participant_identity)
            .with_name(participant_name)
            .with_grants(VideoGrants {
                room_join: true,
                room: room_name.to_string(),
                can_publish: true,
                can_subscribe: true,
                can_publish_data: true,
                can_update_own_metadata: true,
                ..Default::default()
            })
            .with_ttl(Duration::from_secs(self.config.token_ttl_seconds));

        token.to_jwt().map_err(VoiceError::LiveKit)
    }
}

/// Random lowercase alphanumeric token, the opaque suffix on room names
/// and fabricated identities.
fn random_suffix(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(|b| (b as char).to_ascii_lowercase())
        .collect()
}
