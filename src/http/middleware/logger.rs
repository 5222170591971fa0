//! Logger injection.
//!
//! Derives a child of the base logger with the request id fixed and attaches
//! it to the request as a [`RequestContext`]. The child is always derived
//! from the base logger, so running this twice leaves exactly one context
//! with one `x_request_id` field (the last one inserted).

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::http::request::{request_id_from, RequestContext};
use crate::observability::tracing::REQUEST_ID_FIELD;
use crate::observability::{Field, Logger};

pub async fn inject_logger(
    State(base): State<Arc<dyn Logger>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let request_id = request_id_from(request.headers());
    let logger = base.with(vec![Field::new(REQUEST_ID_FIELD, &request_id)]);

    request
        .extensions_mut()
        .insert(RequestContext::new(request_id, logger));
    next.run(request).await
}
