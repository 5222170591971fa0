//! Gallery use cases: random page, newest page, new upload.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use bytes::Bytes;
use chrono::Utc;
use rand::seq::SliceRandom;
use uuid::Uuid;

use crate::domain::upload::{is_supported_extension, object_prefix};
use crate::domain::{Image, ImageIdBatch, UploadRequest, UploadedImage, GALLERY_PAGE_SIZE};
use crate::gallery::types::{CreateImage, GalleryError};
use crate::repository::{ImageCatalogRepository, ObjectStoreRepository};

/// Entry point for the gallery routes.
#[derive(Clone)]
pub struct GalleryService {
    catalog: ImageCatalogRepository,
    store: ObjectStoreRepository,
    base_url: String,
}

impl GalleryService {
    pub fn new(catalog: ImageCatalogRepository, store: ObjectStoreRepository, base_url: impl Into<String>) -> Self {
        Self {
            catalog,
            store,
            base_url: base_url.into(),
        }
    }

    /// One page of distinct images picked at random.
    pub async fn random_images(&self) -> Result<Vec<Image>, GalleryError> {
        let ids = self.catalog.find_all_ids().await?;
        if ids.len() < GALLERY_PAGE_SIZE {
            return Err(GalleryError::InsufficientImages {
                available: ids.len(),
                required: GALLERY_PAGE_SIZE,
            });
        }

        let picked: Vec<_> = {
            let mut rng = rand::thread_rng();
            ids.choose_multiple(&mut rng, GALLERY_PAGE_SIZE).copied().collect()
        };
        let batch = ImageIdBatch::try_from(picked)?;

        let records = self.catalog.find_by_ids(&batch).await?;
        tracing::debug!(count = records.len(), "Random images resolved");
        Ok(records.iter().map(|r| r.to_image(&self.base_url)).collect())
    }

    /// The newest page of images.
    pub async fn recently_created_images(&self) -> Result<Vec<Image>, GalleryError> {
        let records = self.catalog.find_recently_created(GALLERY_PAGE_SIZE as u32).await?;
        if records.len() < GALLERY_PAGE_SIZE {
            return Err(GalleryError::InsufficientImages {
                available: records.len(),
                required: GALLERY_PAGE_SIZE,
            });
        }
        Ok(records.iter().map(|r| r.to_image(&self.base_url)).collect())
    }

    /// Store a new image. The returned URL points at the converted `.webp`
    /// that the downstream conversion job publishes.
    pub async fn create_image(&self, input: CreateImage) -> Result<UploadedImage, GalleryError> {
        if !is_supported_extension(&input.image_extension) {
            return Err(GalleryError::InvalidExtension(input.image_extension));
        }
        let body = STANDARD.decode(input.image.as_bytes())?;

        let prefix = object_prefix(Utc::now());
        let name = Uuid::new_v4().simple().to_string();
        let request = UploadRequest::new(&prefix, &name, &input.image_extension, Bytes::from(body));

        self.store.upload(&request).await?;

        let uploaded = UploadedImage::new(&self.base_url, &prefix, &name);
        tracing::info!(key = %request.key, url = %uploaded.url, "Image uploaded");
        Ok(uploaded)
    }
}
