//! Client for the Gemini `generateContent` endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::config::{ConfigError, GeminiConfig, SecureString};
use crate::session::{ImageSelection, PoemStyle};

use super::error::GenerationError;
use super::prompts::{poem_prompt, FALLBACK_INSPIRATION, INSPIRATION_PROMPT};
use super::traits::PoetryModel;

/// Sampling knobs for one kind of request.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Sampling {
    temperature: f32,
    thinking_budget: u32,
}

pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: SecureString,
    inspiration: Sampling,
    poem: Sampling,
}

impl GeminiClient {
    /// Build a client from config.
    ///
    /// Fails with `ConfigError::MissingApiKey` when no credential resolves.
    pub fn new(config: &GeminiConfig) -> Result<Self, ConfigError> {
        let api_key = config.require_api_key()?;
        Self::with_api_key(config, api_key)
    }

    pub fn with_api_key(config: &GeminiConfig, api_key: SecureString) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds as u64))
            .build()
            .map_err(|e| ConfigError::ValidationError {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
            inspiration: Sampling {
                temperature: config.inspiration_temperature,
                thinking_budget: config.inspiration_thinking_budget,
            },
            poem: Sampling {
                temperature: config.poem_temperature,
                thinking_budget: config.poem_thinking_budget,
            },
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// One image + one instruction in, concatenated text parts out (trimmed).
    async fn generate(
        &self,
        operation: &'static str,
        image: &ImageSelection,
        prompt: String,
        sampling: Sampling,
    ) -> Result<String, GenerationError> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: image.mime_type.clone(),
                            data: image.encoded_bytes.clone(),
                        },
                    },
                    Part::Text { text: prompt },
                ],
            }],
            generation_config: GenerationConfig {
                temperature: sampling.temperature,
                thinking_config: ThinkingConfig {
                    thinking_budget: sampling.thinking_budget,
                },
            },
        };

        let url = self.endpoint();
        tracing::debug!(
            operation,
            url = %url,
            mime_type = %image.mime_type,
            image_bytes = image.byte_len(),
            "Sending generation request"
        );

        let start = Instant::now();
        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", self.api_key.expose())
            .json(&body)
            .send()
            .await?;

        let latency_ms = start.elapsed().as_millis() as u64;
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());

            tracing::error!(
                operation,
                status = %status,
                latency_ms,
                error = %error_text,
                "Generation API error"
            );

            return Err(GenerationError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let response_text = response.text().await?;
        let parsed: GenerateResponse = serde_json::from_str(&response_text).map_err(|e| {
            GenerationError::Parse(format!("Failed to parse response JSON: {}", e))
        })?;

        let text = parsed.text();
        tracing::debug!(operation, latency_ms, text_len = text.len(), "Generation finished");
        Ok(text.trim().to_string())
    }
}

#[async_trait]
impl PoetryModel for GeminiClient {
    async fn describe_image(&self, image: &ImageSelection) -> Result<String, GenerationError> {
        let text = self
            .generate(
                "inspiration",
                image,
                INSPIRATION_PROMPT.to_string(),
                self.inspiration,
            )
            .await?;
        if text.is_empty() {
            return Ok(FALLBACK_INSPIRATION.to_string());
        }
        Ok(text)
    }

    async fn compose_poem(
        &self,
        image: &ImageSelection,
        style: PoemStyle,
    ) -> Result<String, GenerationError> {
        self.generate("poem", image, poem_prompt(style), self.poem)
            .await
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    #[serde(rename_all = "camelCase")]
    InlineData { inline_data: InlineData },
    Text { text: String },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    thinking_config: ThinkingConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
    /// Thought summaries are not part of the answer.
    #[serde(default)]
    thought: Option<bool>,
}

impl GenerateResponse {
    /// Text of the first candidate, thought parts excluded.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter(|p| !p.thought.unwrap_or(false))
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_uses_camel_case_wire_names() {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: "image/png".into(),
                            data: "AAAA".into(),
                        },
                    },
                    Part::Text {
                        text: "hello".into(),
                    },
                ],
            }],
            generation_config: GenerationConfig {
                temperature: 0.5,
                thinking_config: ThinkingConfig {
                    thinking_budget: 1000,
                },
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json["contents"][0]["parts"][0]["inlineData"]["mimeType"],
            "image/png"
        );
        assert_eq!(json["contents"][0]["parts"][1]["text"], "hello");
        assert_eq!(
            json["generationConfig"]["thinkingConfig"]["thinkingBudget"],
            1000
        );
    }

    #[test]
    fn response_text_joins_parts_and_skips_thoughts() {
        let raw = r#"{
            "candidates": [{
                "content": {
                    "parts": [
                        {"text": "planning...", "thought": true},
                        {"text": "Morning "},
                        {"text": "light"}
                    ]
                }
            }]
        }"#;
        let parsed: GenerateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.text(), "Morning light");
    }

    #[test]
    fn response_without_candidates_is_empty() {
        let parsed: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.text(), "");
        let parsed: GenerateResponse =
            serde_json::from_str(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#).unwrap();
        assert_eq!(parsed.text(), "");
    }

    #[test]
    fn endpoint_strips_trailing_slash() {
        let config = GeminiConfig {
            base_url: "http://localhost:9999/".into(),
            model: "test-model".into(),
            ..GeminiConfig::default()
        };
        let client = GeminiClient::with_api_key(&config, SecureString::new("k".into())).unwrap();
        assert_eq!(
            client.endpoint(),
            "http://localhost:9999/v1beta/models/test-model:generateContent"
        );
    }
}
