use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::session::{PoemStyle, VisualTheme};

/// Root configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Remote model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API root (e.g., "https://generativelanguage.googleapis.com").
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Direct API key. Takes precedence over `api_key_env`.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Environment variable consulted when `api_key` is unset.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Request timeout in seconds (default: 60).
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u32,
    #[serde(default = "default_inspiration_temperature")]
    pub inspiration_temperature: f32,
    #[serde(default = "default_poem_temperature")]
    pub poem_temperature: f32,
    #[serde(default = "default_inspiration_thinking_budget")]
    pub inspiration_thinking_budget: u32,
    #[serde(default = "default_poem_thinking_budget")]
    pub poem_thinking_budget: u32,
}

/// Where saved poems, settings and exported documents live.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Key-value store directory (default: `<data_dir>/photopoet`).
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Exported documents (default: `<document_dir>/PhotoPoet`).
    #[serde(default)]
    pub export_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub default_style: PoemStyle,
    #[serde(default)]
    pub default_theme: VisualTheme,
    /// Redraw/animation tick in milliseconds (default: 250).
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    /// Link included in shared posts.
    #[serde(default = "default_share_url")]
    pub share_url: String,
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_timeout_seconds() -> u32 {
    60
}

fn default_inspiration_temperature() -> f32 {
    0.7
}

fn default_poem_temperature() -> f32 {
    0.9
}

fn default_inspiration_thinking_budget() -> u32 {
    1000
}

fn default_poem_thinking_budget() -> u32 {
    2000
}

fn default_tick_rate_ms() -> u64 {
    250
}

fn default_share_url() -> String {
    "https://github.com/photopoet/photopoet".to_string()
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            api_key: None,
            api_key_env: default_api_key_env(),
            timeout_seconds: default_timeout_seconds(),
            inspiration_temperature: default_inspiration_temperature(),
            poem_temperature: default_poem_temperature(),
            inspiration_thinking_budget: default_inspiration_thinking_budget(),
            poem_thinking_budget: default_poem_thinking_budget(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_style: PoemStyle::default(),
            default_theme: VisualTheme::default(),
            tick_rate_ms: default_tick_rate_ms(),
            share_url: default_share_url(),
        }
    }
}

impl StorageConfig {
    /// Resolved key-value store directory.
    ///
    /// Falls back to the current directory if the platform has no data dir.
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("photopoet")
        })
    }

    pub fn resolved_export_dir(&self) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(|| {
            dirs::document_dir()
                .or_else(dirs::home_dir)
                .unwrap_or_else(|| PathBuf::from("."))
                .join("PhotoPoet")
        })
    }
}
