//! Remote generation: inspiration and poems from a multimodal model.

mod error;
mod gemini;
mod prompts;
mod traits;

use std::sync::Arc;

use crate::config::GeminiConfig;

pub use error::{GenerationError, MuseTask};
pub use gemini::GeminiClient;
pub use prompts::{poem_prompt, FALLBACK_INSPIRATION, INSPIRATION_PROMPT};
pub use traits::{PoetryModel, UnconfiguredModel};

/// The configured model, or a stand-in that reports why it is unavailable.
pub fn build_model(config: &GeminiConfig) -> Arc<dyn PoetryModel> {
    match GeminiClient::new(config) {
        Ok(client) => {
            tracing::info!(model = client.model(), "Gemini client ready");
            Arc::new(client)
        }
        Err(err) => {
            tracing::warn!(error = %err, "Generation disabled");
            Arc::new(UnconfiguredModel::new(err.to_string()))
        }
    }
}
