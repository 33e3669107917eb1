//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_gemini;

use async_trait::async_trait;
use parking_lot::Mutex;
use photopoet::muse::{GenerationError, PoetryModel};
use photopoet::session::{ImageSelection, PoemStyle, VisualTheme};
use photopoet::storage::{KvStore, Library, PlaybackSettings};
use photopoet::ui::app::{App, AppSettings};
use std::collections::VecDeque;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const INSPIRATION: &str = "A quiet dawn over still water.";
pub const HAIKU: &str = "Morning mist rises\nover the silent water\na heron takes flight";

/// Encoded PNG of the given size.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 120, 40, 255]));
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, image::ImageFormat::Png)
        .expect("encode png");
    out.into_inner()
}

pub fn test_image() -> ImageSelection {
    ImageSelection::from_bytes(&png_bytes(4, 3), None).expect("valid png")
}

/// Write a PNG into `dir` and return its path.
pub fn write_png(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, png_bytes(4, 3)).expect("write png");
    path
}

pub fn temp_library() -> (TempDir, Library) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = KvStore::open(dir.path().join("data")).expect("open store");
    (dir, Library::new(store))
}

pub fn make_app(dir: &TempDir) -> App {
    let store = KvStore::open(dir.path().join("data")).expect("open store");
    let settings = AppSettings {
        export_dir: dir.path().join("exports"),
        share_url: "https://example.invalid/photopoet".to_string(),
        default_style: PoemStyle::default(),
        default_theme: VisualTheme::default(),
    };
    App::new(settings, Library::new(store), PlaybackSettings::in_memory())
}

/// Write a config file pointing storage and the model at test locations.
pub fn temp_config(dir: &Path, base_url: &str) -> PathBuf {
    let path = dir.join("config.toml");
    let content = format!(
        r#"[gemini]
base_url = "{}"
api_key = "test-key"
timeout_seconds = 5

[storage]
data_dir = "{}"
export_dir = "{}"
"#,
        base_url,
        dir.join("data").display(),
        dir.join("exports").display()
    );
    std::fs::write(&path, content).expect("Failed to write config");
    path
}

/// Scripted model. Unscripted calls succeed with [`INSPIRATION`] / [`HAIKU`].
#[derive(Default)]
pub struct MockModel {
    inspirations: Mutex<VecDeque<Result<String, GenerationError>>>,
    poems: Mutex<VecDeque<Result<String, GenerationError>>>,
    styles: Mutex<Vec<PoemStyle>>,
    describe_calls: Mutex<usize>,
}

impl MockModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_inspiration(&self, result: Result<String, GenerationError>) {
        self.inspirations.lock().push_back(result);
    }

    pub fn push_poem(&self, result: Result<String, GenerationError>) {
        self.poems.lock().push_back(result);
    }

    pub fn describe_calls(&self) -> usize {
        *self.describe_calls.lock()
    }

    /// Styles requested so far, in call order.
    pub fn requested_styles(&self) -> Vec<PoemStyle> {
        self.styles.lock().clone()
    }
}

#[async_trait]
impl PoetryModel for MockModel {
    async fn describe_image(&self, _image: &ImageSelection) -> Result<String, GenerationError> {
        *self.describe_calls.lock() += 1;
        self.inspirations
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(INSPIRATION.to_string()))
    }

    async fn compose_poem(
        &self,
        _image: &ImageSelection,
        style: PoemStyle,
    ) -> Result<String, GenerationError> {
        self.styles.lock().push(style);
        self.poems
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(HAIKU.to_string()))
    }
}

pub fn api_error() -> GenerationError {
    GenerationError::Api {
        status: 500,
        message: "internal".to_string(),
    }
}
