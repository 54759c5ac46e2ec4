//! LiveKit integration for the Helpline platform.
//!
//! Mints the short-lived credentials a browser client needs to join its
//! voice-chat room: a random room name under a fixed namespace, a
//! participant identity, and a signed LiveKit access token scoped to
//! that room.
//!
//! Rooms are created implicitly by LiveKit when the first participant
//! joins, so this crate never talks to the Room Service API — token
//! signing is a purely local operation.

pub mod config;
pub mod error;
pub mod service;

pub use config::LiveKitConfig;
pub use error::VoiceError;
pub use service::{VoiceService, ROOM_PREFIX};
