//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum router with the gallery routes
//! - Wrap every route in the middleware chain
//! - Serve on a bound listener until shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    routing::get,
    Router,
};
use tokio::net::TcpListener;

use crate::config::AppConfig;
use crate::gallery::GalleryService;
use crate::http::{handlers, middleware};
use crate::lifecycle::ShutdownListener;
use crate::observability::{ErrorReporter, Logger};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub gallery: GalleryService,
    pub reporter: Arc<dyn ErrorReporter>,
}

impl AppState {
    pub fn new(gallery: GalleryService, reporter: Arc<dyn ErrorReporter>) -> Self {
        Self { gallery, reporter }
    }
}

/// Build the full application router.
pub fn build_router(
    state: AppState,
    base_logger: Arc<dyn Logger>,
    request_timeout: Duration,
    max_body_size: usize,
) -> Router {
    let routes = Router::new()
        .route(
            "/lgtm-images",
            get(handlers::random_images).post(handlers::create_image),
        )
        .route(
            "/lgtm-images/recently-created",
            get(handlers::recently_created_images),
        )
        .route("/health-checks", get(handlers::health_check))
        .layer(DefaultBodyLimit::max(max_body_size))
        .with_state(state);

    middleware::apply(routes, base_logger, request_timeout)
}

/// HTTP server for the image API.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(config: &AppConfig, state: AppState, base_logger: Arc<dyn Logger>) -> Self {
        let router = build_router(
            state,
            base_logger,
            Duration::from_secs(config.timeouts.request_secs),
            config.security.max_body_size,
        );
        Self { router }
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve on `listener` until `shutdown` resolves, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: ShutdownListener,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown.wait())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
