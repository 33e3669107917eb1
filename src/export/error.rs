use std::path::PathBuf;
use thiserror::Error;

use crate::clipboard::ClipboardError;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),

    #[error("Failed to write document {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to open {url}: {reason}")]
    Open { url: String, reason: String },

    #[error("Invalid share link: {0}")]
    Url(String),
}
