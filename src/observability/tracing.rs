//! Per-request tracing spans.
//!
//! # Responsibilities
//! - Open one span per request (the request's monitoring scope)
//! - Let trace tagging record the request id on that span
//!
//! # Design Decisions
//! - The `x_request_id` field is declared empty and filled in later
//! - A disabled span (filtered out) is not an active scope; tagging skips it

use axum::http::Request;
use tower_http::trace::MakeSpan;
use tracing::Span;

/// Name of the span field carrying the request id.
pub const REQUEST_ID_FIELD: &str = "x_request_id";

/// Builds the per-request span used by `TraceLayer`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestSpan;

impl<B> MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        tracing::info_span!(
            "request",
            method = %request.method(),
            path = %request.uri().path(),
            x_request_id = tracing::field::Empty,
        )
    }
}

/// Tag `span` with the request id. Returns false when no scope is active.
pub fn tag_request_id(span: &Span, request_id: &str) -> bool {
    if span.is_disabled() {
        return false;
    }
    span.record(REQUEST_ID_FIELD, request_id);
    true
}
