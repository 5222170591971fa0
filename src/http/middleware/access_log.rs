//! Access logging through the injected logger.

use std::time::Instant;

use axum::{body::Body, http::Request, middleware::Next, response::Response};

use crate::http::request::RequestContext;
use crate::observability::{metrics, Field};

pub async fn log_access(ctx: RequestContext, request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    ctx.logger.info(
        "Request received",
        &[Field::new("method", &method), Field::new("path", &path)],
    );

    let response = next.run(request).await;
    let status = response.status().as_u16();

    ctx.logger.info(
        "Request completed",
        &[
            Field::new("method", &method),
            Field::new("path", &path),
            Field::new("status_code", status),
            Field::new("duration_ms", start.elapsed().as_millis()),
        ],
    );
    metrics::record_request(&method, status, start);

    response
}
