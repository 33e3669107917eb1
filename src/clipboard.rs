//! System clipboard: copy poem text out, paste photographs in.

use arboard::Clipboard;
use thiserror::Error;

use crate::session::{ImageError, ImageSelection};

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(#[source] arboard::Error),

    #[error("Failed to set clipboard text: {0}")]
    Write(#[source] arboard::Error),

    #[error("No image on the clipboard")]
    NoImage,

    #[error("Failed to read clipboard image: {0}")]
    Read(#[source] arboard::Error),

    #[error(transparent)]
    Image(#[from] ImageError),
}

/// Handler for clipboard operations.
pub struct ClipboardHandler {
    clipboard: Clipboard,
}

impl ClipboardHandler {
    pub fn new() -> Result<Self, ClipboardError> {
        let clipboard = Clipboard::new().map_err(ClipboardError::Unavailable)?;
        Ok(Self { clipboard })
    }

    /// Write text to the system clipboard.
    pub fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.clipboard
            .set_text(text.to_string())
            .map_err(ClipboardError::Write)
    }

    /// Current clipboard image, re-encoded as PNG.
    pub fn get_image(&mut self) -> Result<ImageSelection, ClipboardError> {
        let data = self.clipboard.get_image().map_err(|e| match e {
            arboard::Error::ContentNotAvailable => ClipboardError::NoImage,
            other => ClipboardError::Read(other),
        })?;
        let width = u32::try_from(data.width).map_err(|_| ClipboardError::NoImage)?;
        let height = u32::try_from(data.height).map_err(|_| ClipboardError::NoImage)?;
        Ok(ImageSelection::from_rgba(
            width,
            height,
            data.bytes.into_owned(),
        )?)
    }
}

/// One-shot copy; opens the clipboard just for this call.
pub fn copy_text(text: &str) -> Result<(), ClipboardError> {
    ClipboardHandler::new()?.set_text(text)
}
