use crate::error::SessionError;
use crate::transport::{AudioError, AudioSink, TokenSource};
use helpline_types::{ConnectionDetails, ConnectionState};
use std::sync::Arc;

/// The session lifecycle state machine.
///
/// Idle until [`SessionClient::connect`] stores a set of
/// [`ConnectionDetails`]; from then on the connection state is whatever
/// the transport reports (the client never invents states of its own).
/// An explicit [`SessionClient::disconnect`] discards the details and
/// returns to Idle in one step.
pub struct SessionClient<T: TokenSource> {
    token_source: T,
    audio: Arc<dyn AudioSink>,
    details: Option<ConnectionDetails>,
    state: ConnectionState,
    audio_attempted: bool,
    audio_blocked: bool,
}

impl<T: TokenSource> SessionClient<T> {
    pub fn new(token_source: T, audio: Arc<dyn AudioSink>) -> Self {
        Self {
            token_source,
            audio,
            details: None,
            state: ConnectionState::Disconnected,
            audio_attempted: false,
            audio_blocked: false,
        }
    }

    /// True when no connection details are held.
    pub fn is_idle(&self) -> bool {
        self.details.is_none()
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn details(&self) -> Option<&ConnectionDetails> {
        self.details.as_ref()
    }

    /// True when audio could not start automatically and the manual
    /// "enable audio" affordance should be shown.
    pub fn audio_blocked(&self) -> bool {
        self.audio_blocked
    }

    /// Requests session credentials and begins connecting.
    ///
    /// A blank name is rejected locally, before any network call. While
    /// details are held a second connect is refused; failures surface
    /// the token source's message and leave the client Idle.
    pub async fn connect(&mut self, name: &str) -> Result<&ConnectionDetails, SessionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::EmptyName);
        }
        if self.details.is_some() {
            return Err(SessionError::SessionActive);
        }

        let details = self
            .token_source
            .issue(name)
            .await
            .map_err(|e| SessionError::Token(e.to_string()))?;

        tracing::info!(room = %details.room_name, identity = %details.identity, "session credentials received");

        self.state = ConnectionState::Connecting;
        Ok(self.details.insert(details))
    }

    /// Discards the connection details and returns to Idle, tearing the
    /// session down as a single atomic action.
    pub fn disconnect(&mut self) {
        if self.details.take().is_some() {
            tracing::info!("session disconnected");
        }
        self.state = ConnectionState::Disconnected;
        self.audio_attempted = false;
        self.audio_blocked = false;
    }

    /// Mirrors a connection-state change reported by the transport.
    ///
    /// On the first transition into Connected, attempts to resume the
    /// audio output; if that fails (autoplay policy), the manual
    /// affordance flag is raised instead.
    pub fn handle_state(&mut self, state: ConnectionState) {
        if self.details.is_none() {
            // Stale event from a torn-down transport.
            return;
        }

        let entering_connected = state == ConnectionState::Connected && self.state != state;
        self.state = state;

        if entering_connected && !self.audio_attempted {
            self.audio_attempted = true;
            match self.audio.resume() {
                Ok(()) => {}
                Err(e) => {
                    tracing::warn!("audio output did not start automatically: {}", e);
                    self.audio_blocked = true;
                }
            }
        }
    }

    /// Retries the same audio resume behind the manual affordance.
    pub fn enable_audio(&mut self) -> Result<(), AudioError> {
        match self.audio.resume() {
            Ok(()) => {
                self.audio_blocked = false;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::TokenError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct FakeTokens {
        calls: AtomicUsize,
        response: Result<ConnectionDetails, String>,
    }

    impl FakeTokens {
        fn ok() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                response: Ok(ConnectionDetails {
                    access_token: "t1".into(),
                    url: "wss://x".into(),
                    room_name: "voice-chat-abc123".into(),
                    identity: "Ava".into(),
                }),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                response: Err(message.to_string()),
            }
        }
    }

    impl TokenSource for &FakeTokens {
        async fn issue(&self, _name: &str) -> Result<ConnectionDetails, TokenError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response.clone().map_err(TokenError::Rejected)
        }
    }

    #[derive(Default)]
    struct FakeAudio {
        // Results consumed front-to-back on each resume attempt.
        outcomes: Mutex<Vec<Result<(), AudioError>>>,
        resumes: AtomicUsize,
    }

    impl AudioSink for FakeAudio {
        fn resume(&self) -> Result<(), AudioError> {
            self.resumes.fetch_add(1, Ordering::SeqCst);
            let mut outcomes = self.outcomes.lock().unwrap();
            if outcomes.is_empty() {
                Ok(())
            } else {
                outcomes.remove(0)
            }
        }
    }

    #[tokio::test]
    async fn blank_name_is_rejected_without_a_token_request() {
        let tokens = FakeTokens::ok();
        let mut client = SessionClient::new(&tokens, Arc::new(FakeAudio::default()));

        assert_eq!(client.connect("   ").await, Err(SessionError::EmptyName));
        assert_eq!(tokens.calls.load(Ordering::SeqCst), 0);
        assert!(client.is_idle());
    }

    #[tokio::test]
    async fn connect_stores_details_and_enters_connecting() {
        let tokens = FakeTokens::ok();
        let mut client = SessionClient::new(&tokens, Arc::new(FakeAudio::default()));

        let details = client.connect("Ava").await.unwrap().clone();
        assert_eq!(details.access_token, "t1");
        assert_eq!(details.url, "wss://x");
        assert_eq!(details.room_name, "voice-chat-abc123");
        assert_eq!(details.identity, "Ava");

        assert!(!client.is_idle());
        assert_eq!(client.state(), ConnectionState::Connecting);
    }

    #[tokio::test]
    async fn second_connect_requires_disconnect_first() {
        let tokens = FakeTokens::ok();
        let mut client = SessionClient::new(&tokens, Arc::new(FakeAudio::default()));

        client.connect("Ava").await.unwrap();
        assert_eq!(
            client.connect("Ben").await,
            Err(SessionError::SessionActive)
        );
        assert_eq!(tokens.calls.load(Ordering::SeqCst), 1);

        client.disconnect();
        assert!(client.is_idle());
        assert_eq!(client.state(), ConnectionState::Disconnected);
        client.connect("Ben").await.unwrap();
        assert_eq!(tokens.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn token_failure_surfaces_message_and_stays_idle() {
        let tokens = FakeTokens::failing("LiveKit is not configured");
        let mut client = SessionClient::new(&tokens, Arc::new(FakeAudio::default()));

        assert_eq!(
            client.connect("Ava").await,
            Err(SessionError::Token("LiveKit is not configured".into()))
        );
        assert!(client.is_idle());
        assert_eq!(client.state(), ConnectionState::Disconnected);
    }

    #[tokio::test]
    async fn state_changes_are_mirrored() {
        let tokens = FakeTokens::ok();
        let mut client = SessionClient::new(&tokens, Arc::new(FakeAudio::default()));
        client.connect("Ava").await.unwrap();

        client.handle_state(ConnectionState::Connected);
        assert_eq!(client.state(), ConnectionState::Connected);
        client.handle_state(ConnectionState::Reconnecting);
        assert_eq!(client.state(), ConnectionState::Reconnecting);
    }

    #[tokio::test]
    async fn stale_state_events_while_idle_are_ignored() {
        let tokens = FakeTokens::ok();
        let mut client = SessionClient::new(&tokens, Arc::new(FakeAudio::default()));

        client.handle_state(ConnectionState::Connected);
        assert_eq!(client.state(), ConnectionState::Disconnected);
    }

    #[tokio::test]
    async fn audio_resumes_once_on_first_connected() {
        let tokens = FakeTokens::ok();
        let audio = Arc::new(FakeAudio::default());
        let mut client = SessionClient::new(&tokens, Arc::clone(&audio) as Arc<dyn AudioSink>);
        client.connect("Ava").await.unwrap();

        client.handle_state(ConnectionState::Connected);
        assert!(!client.audio_blocked());
        assert_eq!(audio.resumes.load(Ordering::SeqCst), 1);

        // Reconnect cycle does not retry automatically.
        client.handle_state(ConnectionState::Reconnecting);
        client.handle_state(ConnectionState::Connected);
        assert_eq!(audio.resumes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn blocked_audio_exposes_affordance_and_retry_clears_it() {
        let tokens = FakeTokens::ok();
        let audio = Arc::new(FakeAudio::default());
        audio
            .outcomes
            .lock()
            .unwrap()
            .push(Err(AudioError::GestureRequired));
        let mut client = SessionClient::new(&tokens, Arc::clone(&audio) as Arc<dyn AudioSink>);
        client.connect("Ava").await.unwrap();

        client.handle_state(ConnectionState::Connected);
        assert!(client.audio_blocked());

        // The affordance retries the same resume; the next attempt succeeds.
        client.enable_audio().unwrap();
        assert!(!client.audio_blocked());
        assert_eq!(audio.resumes.load(Ordering::SeqCst), 2);
    }
}
