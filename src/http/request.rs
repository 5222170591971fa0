//! Request identification and the request-scoped context.
//!
//! # Responsibilities
//! - Read the inbound `X-Request-Id` (absent means empty string)
//! - Carry the request's derived logger to handlers as a typed value
//!
//! # Design Decisions
//! - The context lives in request extensions under its own type, so
//!   retrieval is type-checked; handlers receive it as an extractor argument
//! - A missing context means the logger injection layer is not installed:
//!   extraction fails loudly with an error log and a 500

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderName};

use crate::http::response::ErrorResponse;
use crate::observability::Logger;

/// Header carrying the caller's request id.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Request id from `headers`, or an empty string.
pub fn request_id_from(headers: &HeaderMap) -> String {
    headers
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Per-request values shared down the middleware chain.
#[derive(Clone)]
pub struct RequestContext {
    pub request_id: String,
    /// Base logger with `x_request_id` fixed.
    pub logger: Arc<dyn Logger>,
}

impl RequestContext {
    pub fn new(request_id: String, logger: Arc<dyn Logger>) -> Self {
        Self { request_id, logger }
    }
}

impl std::fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestContext")
            .field("request_id", &self.request_id)
            .field("logger_fields", &self.logger.fields())
            .finish()
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = ErrorResponse;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<RequestContext>().cloned().ok_or_else(|| {
            tracing::error!(
                path = %parts.uri.path(),
                "Request context missing; logger injection layer is not installed"
            );
            ErrorResponse::InternalServerError
        })
    }
}
