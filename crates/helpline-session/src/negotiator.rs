use crate::prefs::PreferenceStore;
use crate::transport::{DataChannel, TransportError};
use helpline_types::{find_voice, ConnectionState, DataMessage, DEFAULT_VOICE_ID};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::broadcast;
use tokio::time::Duration;

/// How long the change-in-flight flag stays set without a confirmation.
pub const CHANGE_TIMEOUT: Duration = Duration::from_secs(5);

/// How long the preview-in-flight flag stays set. Previews have no
/// response contract at all; this is the only thing that clears it.
pub const PREVIEW_TIMEOUT: Duration = Duration::from_secs(4);

/// Capacity for the notification broadcast channel.
const EVENT_CAPACITY: usize = 16;

/// Sample sentence for catalog entries without their own preview text.
const FALLBACK_PREVIEW_TEXT: &str = "Hi! This is a quick preview of how I sound.";

/// Notification of a negotiation outcome, for whatever renders state.
#[derive(Debug, Clone)]
pub enum VoiceEvent {
    /// The agent confirmed a change; `voice_id` is now current.
    Changed { voice_id: String },
    /// The agent rejected a change; the message is user-facing.
    Rejected { message: String },
}

#[derive(Debug)]
struct Inner {
    current_voice: String,
    changing: bool,
    previewing: bool,
    connected: bool,
}

/// Speaks the voice-change protocol over the reliable data channel.
///
/// The busy-flag timers are deliberately uncorrelated with responses:
/// a request fires, a timer independently clears the local flag, and a
/// confirmation that arrives after the timer still applies. Nothing is
/// ever cancelled.
pub struct VoiceNegotiator {
    inner: Arc<Mutex<Inner>>,
    channel: Arc<dyn DataChannel>,
    prefs: Arc<dyn PreferenceStore>,
    events: broadcast::Sender<VoiceEvent>,
}

impl VoiceNegotiator {
    /// Creates a negotiator seeded from the persisted preference when it
    /// names a catalog voice, else the default catalog entry.
    pub fn new(channel: Arc<dyn DataChannel>, prefs: Arc<dyn PreferenceStore>) -> Self {
        let current_voice = prefs
            .load_voice()
            .filter(|id| find_voice(id).is_some())
            .unwrap_or_else(|| DEFAULT_VOICE_ID.to_string());

        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        Self {
            inner: Arc::new(Mutex::new(Inner {
                current_voice,
                changing: false,
                previewing: false,
                connected: false,
            })),
            channel,
            prefs,
            events,
        }
    }

    pub fn current_voice(&self) -> String {
        lock(&self.inner).current_voice.clone()
    }

    /// True while a change request is in flight.
    pub fn is_changing(&self) -> bool {
        lock(&self.inner).changing
    }

    /// True while a preview request is in flight.
    pub fn is_previewing(&self) -> bool {
        lock(&self.inner).previewing
    }

    /// Subscribes to negotiation outcome notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<VoiceEvent> {
        self.events.subscribe()
    }

    /// Mirrors connection-state changes; requests are only sent while
    /// Connected.
    pub fn handle_state(&self, state: ConnectionState) {
        lock(&self.inner).connected = state == ConnectionState::Connected;
    }

    /// Requests a switch to `voice_id`.
    ///
    /// No-op when a change is already in flight, the target equals the
    /// current voice, the session is not connected, or the id is not in
    /// the catalog. Otherwise publishes a `voice_change` message and
    /// arms the 5-second flag timer.
    pub fn request_change(&self, voice_id: &str) -> Result<(), TransportError> {
        {
            let mut inner = lock(&self.inner);
            if inner.changing || !inner.connected || inner.current_voice == voice_id {
                return Ok(());
            }
            if find_voice(voice_id).is_none() {
                tracing::warn!(voice_id, "ignoring change request for unknown voice");
                return Ok(());
            }

            let payload = encode(&DataMessage::VoiceChange {
                voice_id: voice_id.to_string(),
            })?;
            self.channel.publish_reliable(&payload)?;
            inner.changing = true;
        }

        tracing::debug!(voice_id, "voice change requested");
        self.arm_timer(CHANGE_TIMEOUT, |inner| inner.changing = false);
        Ok(())
    }

    /// Fire-and-forget preview of `voice_id` using its catalog sample.
    pub fn request_preview(&self, voice_id: &str) -> Result<(), TransportError> {
        {
            let mut inner = lock(&self.inner);
            if inner.previewing || !inner.connected {
                return Ok(());
            }
            let Some(voice) = find_voice(voice_id) else {
                tracing::warn!(voice_id, "ignoring preview request for unknown voice");
                return Ok(());
            };

            let payload = encode(&DataMessage::VoicePreview {
                voice_id: voice.id.to_string(),
                preview_text: voice
                    .preview_text
                    .unwrap_or(FALLBACK_PREVIEW_TEXT)
                    .to_string(),
            })?;
            self.channel.publish_reliable(&payload)?;
            inner.previewing = true;
        }

        tracing::debug!(voice_id, "voice preview requested");
        self.arm_timer(PREVIEW_TIMEOUT, |inner| inner.previewing = false);
        Ok(())
    }

    /// Receive handler for inbound data-channel payloads.
    ///
    /// Malformed payloads are logged and dropped; they never escape this
    /// method.
    pub fn handle_data(&self, payload: &[u8]) {
        let message = match DataMessage::from_bytes(payload) {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!("dropping malformed data-channel payload: {}", e);
                return;
            }
        };

        match message {
            DataMessage::VoiceChangeResponse {
                success: true,
                current_voice,
                ..
            } => {
                {
                    let mut inner = lock(&self.inner);
                    inner.current_voice = current_voice.clone();
                    inner.changing = false;
                }
                if let Err(e) = self.prefs.store_voice(&current_voice) {
                    tracing::warn!("failed to persist voice preference: {}", e);
                }
                tracing::info!(voice_id = %current_voice, "voice change confirmed");
                let _ = self.events.send(VoiceEvent::Changed {
                    voice_id: current_voice,
                });
            }
            DataMessage::VoiceChangeResponse {
                success: false,
                message,
                ..
            } => {
                lock(&self.inner).changing = false;
                let message =
                    message.unwrap_or_else(|| "The agent could not change voices".to_string());
                tracing::info!(%message, "voice change rejected");
                let _ = self.events.send(VoiceEvent::Rejected { message });
            }
            DataMessage::TestMessage { message } => {
                tracing::debug!(%message, "test message from agent");
            }
            other => {
                tracing::debug!(?other, "ignoring unexpected data-channel message");
            }
        }
    }

    /// Arms a flag-reset timer. The reset is unconditional; it does not
    /// cancel the request it was armed for.
    fn arm_timer(&self, after: Duration, reset: impl FnOnce(&mut Inner) + Send + 'static) {
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            tokio::time::sleep(after).await;
            reset(&mut *lock(&inner));
        });
    }
}

fn encode(message: &DataMessage) -> Result<Vec<u8>, TransportError> {
    message
        .to_bytes()
        .map_err(|e| TransportError::Publish(e.to_string()))
}

fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    match inner.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            // A panicked holder can only have left flag state behind;
            // recovering beats wedging every voice control.
            tracing::error!("negotiator state lock poisoned, recovering");
            poisoned.into_inner()
        }
    }
}
