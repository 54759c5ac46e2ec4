//! The static voice catalog.
//!
//! Voices are fixed at build time; the only persistence is the
//! client-side "last confirmed" preference handled elsewhere.

use serde::Serialize;

/// Gender tag attached to a catalog voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Female,
    Male,
    Neutral,
}

/// A selectable agent voice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Voice {
    /// Catalog identifier sent over the wire (`voiceId`).
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    pub gender: Gender,
    /// Short description shown in the picker.
    pub description: &'static str,
    /// TTS provider identifier.
    pub provider: &'static str,
    /// Provider model identifier.
    pub model: &'static str,
    pub accent: Option<&'static str>,
    pub personality: Option<&'static str>,
    /// Sample sentence used for previews.
    pub preview_text: Option<&'static str>,
}

/// Identifier of the voice used when no preference is persisted.
pub const DEFAULT_VOICE_ID: &str = "luna";

const CATALOG: &[Voice] = &[
    Voice {
        id: "luna",
        name: "Luna",
        gender: Gender::Female,
        description: "Warm and attentive, the default support voice",
        provider: "cartesia",
        model: "sonic-english",
        accent: Some("american"),
        personality: Some("friendly"),
        preview_text: Some("Hi, I'm Luna. How can I help you today?"),
    },
    Voice {
        id: "stella",
        name: "Stella",
        gender: Gender::Female,
        description: "Bright and upbeat",
        provider: "cartesia",
        model: "sonic-english",
        accent: Some("british"),
        personality: Some("cheerful"),
        preview_text: Some("Hello! Stella here, ready to sort things out."),
    },
    Voice {
        id: "marcus",
        name: "Marcus",
        gender: Gender::Male,
        description: "Calm and measured",
        provider: "cartesia",
        model: "sonic-english",
        accent: Some("american"),
        personality: Some("reassuring"),
        preview_text: Some("Good day, this is Marcus speaking."),
    },
    Voice {
        id: "felix",
        name: "Felix",
        gender: Gender::Male,
        description: "Quick and energetic",
        provider: "cartesia",
        model: "sonic-english",
        accent: Some("australian"),
        personality: Some("enthusiastic"),
        preview_text: Some("Hey! Felix on the line, what do you need?"),
    },
    Voice {
        id: "sage",
        name: "Sage",
        gender: Gender::Neutral,
        description: "Even-toned and precise",
        provider: "cartesia",
        model: "sonic-english",
        accent: None,
        personality: Some("matter-of-fact"),
        preview_text: None,
    },
];

/// Returns the full build-time voice catalog.
pub fn voices() -> &'static [Voice] {
    CATALOG
}

/// Looks up a catalog voice by id.
pub fn find_voice(id: &str) -> Option<&'static Voice> {
    CATALOG.iter().find(|v| v.id == id)
}

/// Returns the default catalog voice.
pub fn default_voice() -> &'static Voice {
    // The default id always names a catalog entry; checked by tests.
    find_voice(DEFAULT_VOICE_ID).unwrap_or(&CATALOG[0])
}
