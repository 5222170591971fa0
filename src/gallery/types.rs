//! Gallery use case inputs and errors.

use serde::Deserialize;
use thiserror::Error;

use crate::domain::{BatchSizeError, DomainError};

/// Payload for a new image.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateImage {
    /// Base64-encoded image bytes.
    pub image: String,
    /// Extension with leading dot: `.png`, `.jpg` or `.jpeg`.
    #[serde(rename = "imageExtension")]
    pub image_extension: String,
}

/// Failures of the gallery use cases.
#[derive(Debug, Error)]
pub enum GalleryError {
    /// Not enough images stored to fill a page.
    #[error("insufficient images: {available} available, {required} required")]
    InsufficientImages { available: usize, required: usize },

    #[error("unsupported image extension: {0}")]
    InvalidExtension(String),

    #[error("image is not valid base64: {0}")]
    InvalidImageData(#[from] base64::DecodeError),

    #[error(transparent)]
    InvalidBatch(#[from] BatchSizeError),

    #[error(transparent)]
    Repository(#[from] DomainError),
}
