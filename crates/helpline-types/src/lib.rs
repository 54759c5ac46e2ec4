//! Shared types for the Helpline voice-chat platform.
//!
//! This crate provides the foundational types used across all Helpline
//! crates: session connection details, the observed connection state,
//! the data-channel wire messages exchanged with the support agent, and
//! the static voice catalog.
//!
//! No crate in the workspace depends on anything *except*
//! `helpline-types` for cross-cutting type definitions. This keeps the
//! dependency graph clean and prevents circular dependencies.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Everything a client needs to join its LiveKit room.
///
/// Created once per session by the token issuer, never mutated, and
/// discarded on disconnect. Field names serialize camelCase to match the
/// wire contract (`accessToken`, `roomName`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionDetails {
    /// Signed, time-boxed LiveKit access token.
    pub access_token: String,
    /// LiveKit endpoint URL the client should connect to.
    pub url: String,
    /// Name of the room the token is scoped to.
    pub room_name: String,
    /// Participant identity the token was issued for.
    pub identity: String,
}

/// Connection state of the underlying real-time session.
///
/// Owned by the transport; Helpline code only observes these values and
/// never invents additional states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    /// No active connection.
    #[default]
    Disconnected,
    /// Connection in progress.
    Connecting,
    /// Connected and media is flowing.
    Connected,
    /// Transient network loss; the transport is retrying.
    Reconnecting,
}

impl ConnectionState {
    /// Returns the string label for this state.
    pub fn label(self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
            Self::Reconnecting => "reconnecting",
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

mod messages;
mod voice;

pub use messages::{DataMessage, MessageError};
pub use voice::{default_voice, find_voice, voices, Gender, Voice, DEFAULT_VOICE_ID};
