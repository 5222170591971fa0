//! Gallery use cases.
//!
//! # Data Flow
//! ```text
//! GET  /lgtm-images                  → random_images (ids → sample 9 → batch lookup)
//! GET  /lgtm-images/recently-created → recently_created_images
//! POST /lgtm-images                  → create_image (validate → decode → upload)
//! ```

pub mod service;
pub mod types;

pub use service::GalleryService;
pub use types::{CreateImage, GalleryError};
