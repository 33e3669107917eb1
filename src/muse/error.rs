//! Error types for remote generation.

use thiserror::Error;

/// Which request failed; picks the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MuseTask {
    Inspiration,
    Poem,
}

#[derive(Debug, Error)]
pub enum GenerationError {
    /// No credential; raised before any network attempt.
    #[error("Model not configured: {reason}")]
    NotConfigured { reason: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl GenerationError {
    /// Short, friendly text for the error banner.
    pub fn user_message(&self, task: MuseTask) -> String {
        match (self, task) {
            (GenerationError::NotConfigured { .. }, _) => "API key is not configured.".to_string(),
            (_, MuseTask::Inspiration) => "Could not glean inspiration from this image.".to_string(),
            (_, MuseTask::Poem) => "The muses are silent. Please try again.".to_string(),
        }
    }
}
