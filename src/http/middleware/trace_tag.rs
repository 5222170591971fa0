//! Trace tagging: outermost interceptor of the chain.
//!
//! Records the inbound request id on the request's monitoring scope (the
//! `TraceLayer` span) so every event and error report under it carries the
//! tag. Side effect only; the request always continues.

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use tracing::Span;

use crate::http::request::request_id_from;
use crate::observability::tracing::tag_request_id;

pub async fn tag_trace(request: Request<Body>, next: Next) -> Response {
    let request_id = request_id_from(request.headers());
    if !tag_request_id(&Span::current(), &request_id) {
        tracing::trace!("No active span; request id not tagged");
    }
    next.run(request).await
}
