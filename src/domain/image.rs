//! Image records and the fixed-width id batch.

use serde::Serialize;
use thiserror::Error;

/// Database identifier of an image.
pub type ImageId = i32;

/// Number of images in one gallery page (a 3×3 grid).
pub const GALLERY_PAGE_SIZE: usize = 9;

/// A stored image as the catalog knows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    pub id: ImageId,
    /// Directory-like path inside the image bucket.
    pub storage_path: String,
    pub filename: String,
}

impl ImageRecord {
    /// Public view of this record, served from `base_url`.
    pub fn to_image(&self, base_url: &str) -> Image {
        Image {
            id: self.id.to_string(),
            url: format!("https://{}/{}/{}", base_url, self.storage_path, self.filename),
        }
    }
}

/// Image as exposed to API clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Image {
    pub id: String,
    pub url: String,
}

/// Rejected batch construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("image id batch must contain exactly {expected} ids, got {actual}")]
pub struct BatchSizeError {
    pub expected: usize,
    pub actual: usize,
}

/// Exactly [`GALLERY_PAGE_SIZE`] image ids resolved in a single query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageIdBatch([ImageId; GALLERY_PAGE_SIZE]);

impl ImageIdBatch {
    pub fn new(ids: &[ImageId]) -> Result<Self, BatchSizeError> {
        let ids: [ImageId; GALLERY_PAGE_SIZE] = ids.try_into().map_err(|_| BatchSizeError {
            expected: GALLERY_PAGE_SIZE,
            actual: ids.len(),
        })?;
        Ok(Self(ids))
    }

    pub fn as_slice(&self) -> &[ImageId] {
        &self.0
    }
}

impl TryFrom<Vec<ImageId>> for ImageIdBatch {
    type Error = BatchSizeError;

    fn try_from(ids: Vec<ImageId>) -> Result<Self, Self::Error> {
        Self::new(&ids)
    }
}
