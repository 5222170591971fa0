//! Request-handling middleware chain.
//!
//! # Order (outer → inner)
//! ```text
//! PropagateRequestId  echo X-Request-Id on the response
//! TraceLayer          open the per-request span (monitoring scope)
//! Timeout             whole-request deadline
//! trace_tag.rs        tag the span with the request id
//! logger.rs           derive the request logger → RequestContext
//! access_log.rs       received/completed records via that logger
//! recovery.rs         panic → logged error + fixed 500
//!     → route handler
//! ```
//!
//! # Design Decisions
//! - Tagging and logger injection sit outside recovery, so a panic anywhere
//!   below still finds a logger and a tagged span
//! - Each interceptor is a plain `from_fn` function; composition is the
//!   `ServiceBuilder` stack in [`apply`], nothing else decides the order

pub mod access_log;
pub mod logger;
pub mod recovery;
pub mod trace_tag;

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, Router};
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::http::request::X_REQUEST_ID;
use crate::observability::tracing::RequestSpan;
use crate::observability::Logger;

pub use recovery::{abort_request, AbortRequest, RecoveredPanic};

/// Wrap every route of `router` in the full chain.
#[allow(deprecated)]
pub fn apply(router: Router, base_logger: Arc<dyn Logger>, request_timeout: Duration) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(TraceLayer::new_for_http().make_span_with(RequestSpan))
            .layer(TimeoutLayer::new(request_timeout))
            .layer(middleware::from_fn(trace_tag::tag_trace))
            .layer(middleware::from_fn_with_state(base_logger, logger::inject_logger))
            .layer(middleware::from_fn(access_log::log_access))
            .layer(middleware::from_fn(recovery::recover_panics)),
    )
}
