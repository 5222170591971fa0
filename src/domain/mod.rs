//! Domain types shared by repositories, use cases and handlers.
//!
//! # Data Flow
//! ```text
//! storage rows
//!     → image.rs (ImageRecord, ImageIdBatch)
//!     → gallery use cases (Image with public URL)
//!
//! upload payload
//!     → upload.rs (UploadRequest, content type, object key)
//!     → object store repository
//!
//! any data-access failure
//!     → error.rs (DomainError tagged with Operation)
//! ```

pub mod error;
pub mod image;
pub mod upload;

pub use error::{DataAccessError, DomainError, Operation};
pub use image::{BatchSizeError, Image, ImageId, ImageIdBatch, ImageRecord, GALLERY_PAGE_SIZE};
pub use upload::{content_type_for, UploadRequest, UploadedImage};
