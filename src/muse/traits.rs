//! The seam between the session and whichever model writes the poems.

use async_trait::async_trait;

use crate::session::{ImageSelection, PoemStyle};

use super::error::GenerationError;

/// A multimodal model able to look at a photograph and write about it.
///
/// No retries and no cancellation: a call runs until the transport settles.
#[async_trait]
pub trait PoetryModel: Send + Sync {
    /// Short evocative description of the scene. Never empty on success.
    async fn describe_image(&self, image: &ImageSelection) -> Result<String, GenerationError>;

    /// Poem text in the requested form. May be empty.
    async fn compose_poem(
        &self,
        image: &ImageSelection,
        style: PoemStyle,
    ) -> Result<String, GenerationError>;
}

/// Stand-in used when no credential is available.
///
/// Lets the interface start normally and reports the configuration problem
/// the first time a request is attempted, without touching the network.
#[derive(Debug, Clone)]
pub struct UnconfiguredModel {
    reason: String,
}

impl UnconfiguredModel {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl PoetryModel for UnconfiguredModel {
    async fn describe_image(&self, _image: &ImageSelection) -> Result<String, GenerationError> {
        Err(GenerationError::NotConfigured {
            reason: self.reason.clone(),
        })
    }

    async fn compose_poem(
        &self,
        _image: &ImageSelection,
        _style: PoemStyle,
    ) -> Result<String, GenerationError> {
        Err(GenerationError::NotConfigured {
            reason: self.reason.clone(),
        })
    }
}
