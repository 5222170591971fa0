//! Panic recovery.
//!
//! Guards the rest of the chain. A panic in a handler becomes a logged
//! [`RecoveredPanic`] and the fixed 500 response, so a worker task never dies
//! on handler logic. The one exception is [`AbortRequest`]: it is re-raised
//! unchanged so the transport drops the connection.

use std::any::Any;
use std::error::Error;
use std::panic::AssertUnwindSafe;

use axum::{
    body::Body,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use futures_util::FutureExt;
use thiserror::Error;

use crate::http::request::RequestContext;
use crate::http::response::ErrorResponse;
use crate::observability::{metrics, Field};

/// Panic payload asking to abandon the connection instead of answering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbortRequest;

/// Abandon the current request without a response.
pub fn abort_request() -> ! {
    std::panic::resume_unwind(Box::new(AbortRequest))
}

/// A panic converted into an error value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("panic recovered: {message}")]
pub struct RecoveredPanic {
    pub message: String,
}

impl RecoveredPanic {
    pub fn from_payload(payload: &(dyn Any + Send)) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else if let Some(e) = payload.downcast_ref::<Box<dyn Error + Send + Sync>>() {
            e.to_string()
        } else {
            "non-string panic payload".to_string()
        };
        Self { message }
    }
}

pub async fn recover_panics(request: Request<Body>, next: Next) -> Response {
    let ctx = request.extensions().get::<RequestContext>().cloned();

    let payload = match AssertUnwindSafe(next.run(request)).catch_unwind().await {
        Ok(response) => return response,
        Err(payload) => payload,
    };
    if payload.is::<AbortRequest>() {
        std::panic::resume_unwind(payload);
    }

    let err = RecoveredPanic::from_payload(&*payload);
    metrics::record_panic_recovered();
    match ctx {
        Some(ctx) => ctx
            .logger
            .error(&err.to_string(), &[Field::new("error_type", "panic")]),
        None => tracing::error!(error = %err, "Panic recovered without request context"),
    }

    ErrorResponse::InternalServerError.into_response()
}
