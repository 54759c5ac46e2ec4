use thiserror::Error;

#[derive(Error, Debug)]
pub enum VoiceError {
    #[error("LiveKit API error: {0}")]
    LiveKit(#[from] livekit_api::access_token::AccessTokenError),

    #[error("missing LiveKit configuration: {}", .0.join(", "))]
    NotConfigured(Vec<&'static str>),
}
