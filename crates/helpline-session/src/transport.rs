//! Capability boundaries between the session core and the real-time SDK.

use helpline_types::{ConnectionDetails, ConnectionState};
use thiserror::Error;

/// An inbound event from the real-time session adapter.
///
/// Adapters route `Data` to [`crate::VoiceNegotiator::handle_data`] and
/// `State` to both [`crate::SessionClient::handle_state`] and
/// [`crate::VoiceNegotiator::handle_state`].
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// A payload arrived on the reliable data channel.
    Data(Vec<u8>),
    /// The transport's connection state changed.
    State(ConnectionState),
}

/// Sends byte payloads over the session's reliable data channel.
pub trait DataChannel: Send + Sync {
    fn publish_reliable(&self, payload: &[u8]) -> Result<(), TransportError>;
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("data channel unavailable: {0}")]
    Unavailable(String),
    #[error("failed to publish payload: {0}")]
    Publish(String),
}

/// Audio output that may start suspended under browser autoplay policy.
pub trait AudioSink: Send + Sync {
    /// Attempts to resume the suspended output context.
    fn resume(&self) -> Result<(), AudioError>;
}

#[derive(Debug, Error)]
pub enum AudioError {
    /// The platform requires an explicit user gesture before audio may play.
    #[error("audio output requires a user gesture")]
    GestureRequired,
    #[error("audio output failed: {0}")]
    Output(String),
}

/// Issues session credentials for a participant.
#[allow(async_fn_in_trait)]
pub trait TokenSource {
    async fn issue(&self, participant_name: &str) -> Result<ConnectionDetails, TokenError>;
}

#[derive(Debug, Error)]
pub enum TokenError {
    /// The request failed. The message is what gets surfaced to the
    /// user: the server envelope's `error` verbatim when one exists,
    /// otherwise a fixed fallback.
    #[error("{0}")]
    Rejected(String),
}
