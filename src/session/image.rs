//! Image ingestion: file or clipboard bytes → base64 payload + data URI preview.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Longest edge of the thumbnail stored with saved poems.
pub const PREVIEW_MAX_DIMENSION: u32 = 512;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Failed to read image '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Not a supported image: {0}")]
    Unsupported(String),

    #[error("Failed to encode image: {0}")]
    Encode(String),
}

/// The photograph the current session is working on.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageSelection {
    /// Base64 (standard alphabet, padded) of the raw file bytes.
    pub encoded_bytes: String,
    pub mime_type: String,
    /// `data:` URI of the same bytes.
    pub preview_reference: String,
}

impl std::fmt::Debug for ImageSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageSelection")
            .field("mime_type", &self.mime_type)
            .field("encoded_len", &self.encoded_bytes.len())
            .finish()
    }
}

impl ImageSelection {
    pub fn from_path(path: &Path) -> Result<Self, ImageError> {
        let bytes = std::fs::read(path).map_err(|source| ImageError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(&bytes, Some(path))
    }

    /// Sniffs the format from magic bytes. The file extension is only
    /// trusted when the bytes actually decode in that format.
    pub fn from_bytes(bytes: &[u8], hint: Option<&Path>) -> Result<Self, ImageError> {
        if bytes.is_empty() {
            return Err(ImageError::Unsupported("file is empty".to_string()));
        }

        let format = image::guess_format(bytes)
            .ok()
            .or_else(|| {
                hint.and_then(|p| ImageFormat::from_path(p).ok())
                    .filter(|format| image::load_from_memory_with_format(bytes, *format).is_ok())
            })
            .ok_or_else(|| {
                let name = hint
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "<clipboard>".to_string());
                ImageError::Unsupported(name)
            })?;

        Ok(Self::from_encoded(
            STANDARD.encode(bytes),
            format.to_mime_type().to_string(),
        ))
    }

    /// Builds a PNG selection from raw RGBA pixels (clipboard images).
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, ImageError> {
        let image = RgbaImage::from_raw(width, height, pixels).ok_or_else(|| {
            ImageError::Encode(format!("pixel buffer does not match {width}x{height}"))
        })?;
        let mut png = Cursor::new(Vec::new());
        image
            .write_to(&mut png, ImageFormat::Png)
            .map_err(|e| ImageError::Encode(e.to_string()))?;
        Ok(Self::from_encoded(
            STANDARD.encode(png.into_inner()),
            "image/png".to_string(),
        ))
    }

    fn from_encoded(encoded_bytes: String, mime_type: String) -> Self {
        let preview_reference = format!("data:{};base64,{}", mime_type, encoded_bytes);
        Self {
            encoded_bytes,
            mime_type,
            preview_reference,
        }
    }

    /// Approximate decoded size in bytes.
    pub fn byte_len(&self) -> usize {
        self.encoded_bytes.len() / 4 * 3
    }

    /// Pixel dimensions, when the format can be decoded.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        let bytes = STANDARD.decode(&self.encoded_bytes).ok()?;
        image::load_from_memory(&bytes)
            .ok()
            .map(|img| (img.width(), img.height()))
    }

    /// Down-scaled PNG data URI for persistence; the full preview if decoding fails.
    pub fn thumbnail_data_uri(&self, max_dimension: u32) -> String {
        let thumbnail = STANDARD
            .decode(&self.encoded_bytes)
            .ok()
            .and_then(|bytes| image::load_from_memory(&bytes).ok())
            .and_then(|img| {
                if img.width() <= max_dimension && img.height() <= max_dimension {
                    return None;
                }
                let mut png = Cursor::new(Vec::new());
                img.thumbnail(max_dimension, max_dimension)
                    .write_to(&mut png, ImageFormat::Png)
                    .ok()?;
                Some(format!(
                    "data:image/png;base64,{}",
                    STANDARD.encode(png.into_inner())
                ))
            });

        thumbnail.unwrap_or_else(|| self.preview_reference.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, image::Rgba([10, 120, 80, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn sniffs_png_from_magic_bytes() {
        let selection = ImageSelection::from_bytes(&png_bytes(4, 4), None).unwrap();
        assert_eq!(selection.mime_type, "image/png");
        assert!(selection
            .preview_reference
            .starts_with("data:image/png;base64,"));
        assert!(selection.preview_reference.ends_with(&selection.encoded_bytes));
    }

    #[test]
    fn renamed_text_file_is_rejected() {
        let err = ImageSelection::from_bytes(b"not really a jpeg", Some(Path::new("shot.jpg")))
            .unwrap_err();
        assert!(matches!(err, ImageError::Unsupported(_)));
    }

    #[test]
    fn content_wins_over_extension() {
        let selection =
            ImageSelection::from_bytes(&png_bytes(4, 4), Some(Path::new("shot.jpg"))).unwrap();
        assert_eq!(selection.mime_type, "image/png");
    }

    #[test]
    fn rejects_non_images() {
        let err = ImageSelection::from_bytes(b"hello", Some(Path::new("notes.txt"))).unwrap_err();
        assert!(matches!(err, ImageError::Unsupported(_)));
        assert!(matches!(
            ImageSelection::from_bytes(&[], None),
            Err(ImageError::Unsupported(_))
        ));
    }

    #[test]
    fn rgba_buffer_becomes_png() {
        let selection = ImageSelection::from_rgba(2, 2, vec![255; 16]).unwrap();
        assert_eq!(selection.mime_type, "image/png");
        assert_eq!(selection.dimensions(), Some((2, 2)));
        assert!(ImageSelection::from_rgba(3, 3, vec![0; 4]).is_err());
    }

    #[test]
    fn thumbnail_shrinks_large_images_only() {
        let small = ImageSelection::from_bytes(&png_bytes(8, 8), None).unwrap();
        assert_eq!(small.thumbnail_data_uri(16), small.preview_reference);

        let large = ImageSelection::from_bytes(&png_bytes(64, 32), None).unwrap();
        let thumb = large.thumbnail_data_uri(16);
        assert!(thumb.starts_with("data:image/png;base64,"));
        assert_ne!(thumb, large.preview_reference);
    }

    #[test]
    fn debug_does_not_dump_payload() {
        let selection = ImageSelection::from_bytes(&png_bytes(4, 4), None).unwrap();
        let debug = format!("{:?}", selection);
        assert!(!debug.contains(&selection.encoded_bytes));
    }
}
