//! Data-channel wire messages.
//!
//! Small JSON control messages exchanged with the support agent over the
//! session's reliable data channel. Payloads are UTF-8 encoded JSON,
//! tagged by a `type` field.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from encoding or decoding a data-channel payload.
#[derive(Debug, Error)]
pub enum MessageError {
    #[error("malformed data-channel payload: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("failed to encode data-channel message: {0}")]
    Encode(#[source] serde_json::Error),
}

/// A control message on the reliable data channel.
///
/// The `type` tag and field names are the wire contract with the agent;
/// unknown tags or missing fields decode as errors and are dropped by
/// the receive handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DataMessage {
    /// Client asks the agent to switch to a different voice.
    VoiceChange {
        #[serde(rename = "voiceId")]
        voice_id: String,
    },
    /// Agent's asynchronous answer to a [`DataMessage::VoiceChange`].
    VoiceChangeResponse {
        success: bool,
        #[serde(rename = "currentVoice")]
        current_voice: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    /// Fire-and-forget request to speak a sample in the given voice.
    /// No response contract exists for previews.
    VoicePreview {
        #[serde(rename = "voiceId")]
        voice_id: String,
        #[serde(rename = "previewText")]
        preview_text: String,
    },
    /// Observed from the agent during development; carries no contract.
    TestMessage { message: String },
}

impl DataMessage {
    /// Encodes the message as UTF-8 JSON bytes for the data channel.
    pub fn to_bytes(&self) -> Result<Vec<u8>, MessageError> {
        serde_json::to_vec(self).map_err(MessageError::Encode)
    }

    /// Decodes a data-channel payload.
    pub fn from_bytes(payload: &[u8]) -> Result<Self, MessageError> {
        serde_json::from_slice(payload).map_err(MessageError::Decode)
    }
}
