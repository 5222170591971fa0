//! LGTM image API
//!
//! Serves the approval-stamp image gallery: random and newest pages from the
//! MySQL catalog, and uploads into the S3 bucket.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ─────────────▶ middleware chain ──▶ handlers ──▶ gallery service
//!                    (trace tag, logger,                 │
//!                     access log, recovery)              ├─▶ ImageCatalogRepository ─▶ MySQL
//!                                                        └─▶ ObjectStoreRepository  ─▶ S3
//!                                                                 │
//!                                                                 └─▶ error reporter
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::net::TcpListener;

use lgtm_image_api::config::load_config;
use lgtm_image_api::gallery::GalleryService;
use lgtm_image_api::http::{AppState, HttpServer};
use lgtm_image_api::lifecycle::Shutdown;
use lgtm_image_api::observability::{
    self, ChannelReporter, ErrorReporter, Logger, NoopReporter, TracingLogger,
};
use lgtm_image_api::repository::{ImageCatalogRepository, ObjectStoreRepository};
use lgtm_image_api::storage::{MySqlImageSource, S3ObjectStorage};

/// How long queued error reports get to flush on shutdown.
const REPORT_DRAIN_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Parser)]
#[command(name = "lgtm-image-api")]
#[command(about = "LGTM image gallery API", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    observability::logging::init(&config.observability);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "lgtm-image-api starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        bucket = %config.storage.bucket,
        images_base_url = %config.images.base_url,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => observability::metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let (reporter, report_worker): (Arc<dyn ErrorReporter>, _) = if config.reporting.enabled {
        let (reporter, worker) = ChannelReporter::spawn(
            config.reporting.queue_capacity,
            config.reporting.release.clone(),
        );
        (Arc::new(reporter), Some(worker))
    } else {
        (Arc::new(NoopReporter), None)
    };

    let source = MySqlImageSource::connect_lazy(&config.database)?;
    let storage = S3ObjectStorage::from_config(&config.storage).await;

    let catalog = ImageCatalogRepository::new(Arc::new(source))
        .with_timeout(Duration::from_secs(config.database.query_timeout_secs));
    let store = ObjectStoreRepository::new(
        Arc::new(storage),
        config.storage.bucket.clone(),
        reporter.clone(),
    )
    .with_timeout(Duration::from_secs(config.storage.upload_timeout_secs));
    let gallery = GalleryService::new(catalog, store, config.images.base_url.clone());

    let base_logger: Arc<dyn Logger> = Arc::new(TracingLogger::new());
    let server = HttpServer::new(&config, AppState::new(gallery, reporter), base_logger);

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.listener();
    let signals = shutdown.trigger_on_signal();
    server.run(listener, server_shutdown).await?;
    signals.abort();

    // The server owned the last reporter handles; the worker now drains.
    if let Some(worker) = report_worker {
        if tokio::time::timeout(REPORT_DRAIN_TIMEOUT, worker).await.is_err() {
            tracing::warn!("Error reports not flushed before shutdown deadline");
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
