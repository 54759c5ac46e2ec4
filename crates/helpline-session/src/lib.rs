//! Session lifecycle and voice-preference negotiation for Helpline.
//!
//! This crate is the client-side core, independent of any UI framework
//! or concrete real-time SDK. The SDK sits behind three narrow
//! capability boundaries: a [`TokenSource`] that issues connection
//! details, a [`DataChannel`] that sends a byte payload reliably, and an
//! [`AudioSink`] that can resume a suspended audio output. Inbound
//! traffic arrives as plain callbacks (`handle_state`, `handle_data`),
//! so an adapter for any transport is a few lines of glue.
//!
//! [`SessionClient`] owns the connect/disconnect lifecycle and the
//! autoplay-unlock affordance; [`VoiceNegotiator`] speaks the
//! voice-change protocol over the data channel, with deliberately
//! uncorrelated busy-flag timers (a timer expiry cancels nothing — a
//! late confirmation still applies).

mod client;
mod error;
mod http;
mod negotiator;
mod prefs;
mod transport;

pub use client::SessionClient;
pub use error::SessionError;
pub use http::HttpTokenSource;
pub use negotiator::{VoiceEvent, VoiceNegotiator, CHANGE_TIMEOUT, PREVIEW_TIMEOUT};
pub use prefs::{FilePreferences, PreferenceStore, PrefsError};
pub use transport::{
    AudioError, AudioSink, DataChannel, SessionEvent, TokenError, TokenSource, TransportError,
};
