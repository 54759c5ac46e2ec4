use thiserror::Error;

/// Errors from the session client state machine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// Rejected locally before any network call.
    #[error("please enter your name")]
    EmptyName,

    /// One session at a time: the previous connection details must be
    /// discarded with an explicit disconnect before a new token request.
    #[error("a session is already active; disconnect first")]
    SessionActive,

    /// The token request failed; the message is user-facing.
    #[error("{0}")]
    Token(String),
}
