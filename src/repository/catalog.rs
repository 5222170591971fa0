//! Read-only image catalog with bounded calls.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::{DomainError, ImageId, ImageIdBatch, ImageRecord, Operation};
use crate::repository::{ImageSource, DEFAULT_CALL_TIMEOUT};
use crate::resilience::timeouts::bounded;

/// Image catalog over a relational [`ImageSource`].
#[derive(Clone)]
pub struct ImageCatalogRepository {
    source: Arc<dyn ImageSource>,
    call_timeout: Duration,
}

impl ImageCatalogRepository {
    pub fn new(source: Arc<dyn ImageSource>) -> Self {
        Self {
            source,
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    pub async fn find_all_ids(&self) -> Result<Vec<ImageId>, DomainError> {
        bounded(Operation::FindAllIds, self.call_timeout, self.source.list_image_ids()).await
    }

    /// Resolve one gallery page. The batch type guarantees the width, so an
    /// undersized id list is rejected before any query is built.
    pub async fn find_by_ids(&self, ids: &ImageIdBatch) -> Result<Vec<ImageRecord>, DomainError> {
        bounded(Operation::FindByIds, self.call_timeout, self.source.list_images(ids.as_slice())).await
    }

    pub async fn find_recently_created(&self, count: u32) -> Result<Vec<ImageRecord>, DomainError> {
        bounded(
            Operation::FindRecentlyCreated,
            self.call_timeout,
            self.source.list_recently_created(count),
        )
        .await
    }
}
