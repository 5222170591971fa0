//! Upload payloads and object naming.

use bytes::Bytes;
use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

/// Extensions accepted from clients.
pub const SUPPORTED_EXTENSIONS: [&str; 3] = [".png", ".jpg", ".jpeg"];

/// Object prefixes are bucketed by the hour in Japan Standard Time.
const JST_OFFSET_HOURS: i64 = 9;

/// One object to put into the image bucket.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub key: String,
    pub body: Bytes,
    /// Extension including the leading dot, e.g. `.png`.
    pub extension: String,
}

impl UploadRequest {
    /// Build the request for `name` under `prefix`. The key is `prefix + name + extension`.
    pub fn new(prefix: &str, name: &str, extension: &str, body: Bytes) -> Self {
        Self {
            key: format!("{prefix}{name}{extension}"),
            body,
            extension: extension.to_string(),
        }
    }

    /// Short description used in error context. Never includes the body.
    pub fn summary(&self) -> String {
        format!("key={}, extension={}, size={}", self.key, self.extension, self.body.len())
    }

    pub fn content_type(&self) -> &'static str {
        content_type_for(&self.extension)
    }
}

/// Content type stored with an object.
///
/// Fixed two-way classification: `.png` is `image/png`, anything else
/// (including unknown or empty extensions) is `image/jpeg`.
pub fn content_type_for(extension: &str) -> &'static str {
    match extension {
        ".png" => "image/png",
        _ => "image/jpeg",
    }
}

pub fn is_supported_extension(extension: &str) -> bool {
    SUPPORTED_EXTENSIONS.contains(&extension)
}

/// `YYYY/MM/DD/HH/` of `now` in JST.
pub fn object_prefix(now: DateTime<Utc>) -> String {
    let jst = now.naive_utc() + TimeDelta::hours(JST_OFFSET_HOURS);
    jst.format("%Y/%m/%d/%H/").to_string()
}

/// Result of a successful upload, pointing at the converted image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadedImage {
    #[serde(rename = "imageUrl")]
    pub url: String,
}

impl UploadedImage {
    pub fn new(base_url: &str, prefix: &str, name: &str) -> Self {
        Self {
            url: format!("https://{base_url}/{prefix}{name}.webp"),
        }
    }
}
