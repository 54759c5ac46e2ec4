//! Client-side persistence for the last-confirmed voice.
//!
//! A single key, read once at construction and written only when the
//! agent confirms a change.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("failed to write preferences: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode preferences: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// Storage for the voice preference.
pub trait PreferenceStore: Send + Sync {
    /// Last confirmed voice id, if one was ever persisted.
    fn load_voice(&self) -> Option<String>;

    /// Persists a confirmed voice id.
    fn store_voice(&self, voice_id: &str) -> Result<(), PrefsError>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PrefsFile {
    voice: Option<String>,
}

/// TOML-file-backed preference store.
///
/// A missing or unreadable file just means "no preference"; corruption
/// is logged and treated the same way.
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
}

impl FilePreferences {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PreferenceStore for FilePreferences {
    fn load_voice(&self) -> Option<String> {
        let contents = std::fs::read_to_string(&self.path).ok()?;
        match toml::from_str::<PrefsFile>(&contents) {
            Ok(prefs) => prefs.voice,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "ignoring corrupt preferences file: {}", e);
                None
            }
        }
    }

    fn store_voice(&self, voice_id: &str) -> Result<(), PrefsError> {
        let prefs = PrefsFile {
            voice: Some(voice_id.to_string()),
        };
        std::fs::write(&self.path, toml::to_string(&prefs)?)?;
        Ok(())
    }
}
