//! Image reference handed to the editor by the image loader.
//!
//! The editor never decodes or draws pixels. It only keeps an opaque handle
//! that the renderer understands, plus the natural size of the image.

use serde::{Deserialize, Serialize};
use std::io::Cursor;
use thiserror::Error;

/// Opaque identifier for a loaded image (file name, object URL, texture key...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageHandle(pub String);

impl ImageHandle {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The currently loaded image and its natural pixel dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub handle: ImageHandle,
    pub natural_width: u32,
    pub natural_height: u32,
}

/// Errors that can occur while probing an image's dimensions.
#[derive(Error, Debug)]
pub enum ImageError {
    /// I/O error while reading the file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The data could not be decoded as a known image format
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// The image decoded, but has no pixels
    #[error("Image has zero size")]
    EmptyImage,
}

impl ImageRef {
    pub fn new(handle: ImageHandle, natural_width: u32, natural_height: u32) -> Self {
        Self {
            handle,
            natural_width,
            natural_height,
        }
    }

    /// Build a reference from encoded image bytes, reading only the header.
    pub fn from_bytes(handle: ImageHandle, data: &[u8]) -> Result<Self, ImageError> {
        let (width, height) = image::ImageReader::new(Cursor::new(data))
            .with_guessed_format()?
            .into_dimensions()?;
        Self::checked(handle, width, height)
    }

    /// Build a reference from an image file on disk, using the file name as handle.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_path(path: &std::path::Path) -> Result<Self, ImageError> {
        let (width, height) = image::image_dimensions(path)?;
        let handle = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        log::debug!("🖼️ Probed {:?}: {}x{}", path, width, height);
        Self::checked(ImageHandle::new(handle), width, height)
    }

    fn checked(handle: ImageHandle, width: u32, height: u32) -> Result<Self, ImageError> {
        if width == 0 || height == 0 {
            return Err(ImageError::EmptyImage);
        }
        Ok(Self::new(handle, width, height))
    }

    /// Natural size as `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.natural_width, self.natural_height)
    }
}
