//! Data-access boundary.
//!
//! # Data Flow
//! ```text
//! use case
//!     → catalog.rs / object_store.rs (repository)
//!         → resilience::timeouts::bounded (fresh per-call deadline)
//!             → ImageSource / ObjectStorageClient (storage adapter)
//!         ← DataAccessError wrapped into DomainError
//! ```
//!
//! # Design Decisions
//! - Adapters are traits so the repositories can run against in-memory fakes
//! - Adapters return `DataAccessError`; repositories return only `DomainError`
//! - Repositories hold no per-request state and are shared via `Arc`

pub mod catalog;
pub mod object_store;

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::{DataAccessError, ImageId, ImageRecord};

pub use catalog::ImageCatalogRepository;
pub use object_store::ObjectStoreRepository;

/// Per-call deadline used when configuration does not override it.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(10);

/// Relational source of image records.
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// All image ids, ascending.
    async fn list_image_ids(&self) -> Result<Vec<ImageId>, DataAccessError>;

    /// Records for `ids`, in store order.
    async fn list_images(&self, ids: &[ImageId]) -> Result<Vec<ImageRecord>, DataAccessError>;

    /// At most `limit` records, newest first.
    async fn list_recently_created(&self, limit: u32) -> Result<Vec<ImageRecord>, DataAccessError>;
}

/// Single-object writer into a bucket.
#[async_trait]
pub trait ObjectStorageClient: Send + Sync {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        body: Bytes,
    ) -> Result<(), DataAccessError>;
}
