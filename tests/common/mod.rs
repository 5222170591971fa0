//! Shared fakes and server helpers for integration tests.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use bytes::Bytes;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::Level;

use lgtm_image_api::config::AppConfig;
use lgtm_image_api::domain::{DataAccessError, ImageId, ImageRecord};
use lgtm_image_api::gallery::GalleryService;
use lgtm_image_api::http::{build_router, AppState, HttpServer};
use lgtm_image_api::lifecycle::Shutdown;
use lgtm_image_api::observability::logging::merge_fields;
use lgtm_image_api::observability::{ErrorReporter, Field, Logger, ReportContext};
use lgtm_image_api::repository::{
    ImageCatalogRepository, ImageSource, ObjectStorageClient, ObjectStoreRepository,
};

pub const BASE_URL: &str = "lgtm-images.example.com";

pub fn record(id: ImageId) -> ImageRecord {
    ImageRecord {
        id,
        storage_path: "2024/01/01/00".to_string(),
        filename: format!("{id}.webp"),
    }
}

pub fn records(count: i32) -> Vec<ImageRecord> {
    (1..=count).map(record).collect()
}

/// Catalog held in memory, oldest first.
#[derive(Default)]
pub struct InMemoryImageSource {
    records: Vec<ImageRecord>,
    delay: Option<Duration>,
    failure: Option<String>,
    pub calls: AtomicUsize,
    pub completed: AtomicBool,
}

impl InMemoryImageSource {
    pub fn new(records: Vec<ImageRecord>) -> Self {
        Self {
            records,
            ..Default::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn enter(&self) -> Result<(), DataAccessError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.completed.store(true, Ordering::SeqCst);
        match &self.failure {
            Some(message) => Err(DataAccessError::Storage(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ImageSource for InMemoryImageSource {
    async fn list_image_ids(&self) -> Result<Vec<ImageId>, DataAccessError> {
        self.enter().await?;
        Ok(self.records.iter().map(|r| r.id).collect())
    }

    async fn list_images(&self, ids: &[ImageId]) -> Result<Vec<ImageRecord>, DataAccessError> {
        self.enter().await?;
        Ok(self
            .records
            .iter()
            .filter(|r| ids.contains(&r.id))
            .cloned()
            .collect())
    }

    async fn list_recently_created(&self, limit: u32) -> Result<Vec<ImageRecord>, DataAccessError> {
        self.enter().await?;
        Ok(self.records.iter().rev().take(limit as usize).cloned().collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bucket: String,
    pub key: String,
    pub content_type: String,
    pub size: usize,
}

/// Object store double with optional latency and failure.
#[derive(Default)]
pub struct ScriptedStorage {
    delay: Option<Duration>,
    failure: Option<String>,
    pub objects: Mutex<Vec<StoredObject>>,
}

impl ScriptedStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    pub fn stored(&self) -> Vec<StoredObject> {
        self.objects.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStorageClient for ScriptedStorage {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        body: Bytes,
    ) -> Result<(), DataAccessError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(message) = &self.failure {
            return Err(DataAccessError::Storage(message.clone()));
        }
        self.objects.lock().unwrap().push(StoredObject {
            bucket: bucket.to_string(),
            key: key.to_string(),
            content_type: content_type.to_string(),
            size: body.len(),
        });
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct LogRecord {
    pub level: Level,
    pub message: String,
    pub fields: Vec<Field>,
}

impl LogRecord {
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.key == key)
            .map(|f| f.value.as_str())
    }
}

/// Logger that keeps every record; children share the same sink.
#[derive(Clone, Default)]
pub struct RecordingLogger {
    fields: Vec<Field>,
    pub records: Arc<Mutex<Vec<LogRecord>>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn at(&self, level: Level) -> Vec<LogRecord> {
        self.records()
            .into_iter()
            .filter(|r| r.level == level)
            .collect()
    }
}

impl Logger for RecordingLogger {
    fn log(&self, level: Level, message: &str, fields: &[Field]) {
        self.records.lock().unwrap().push(LogRecord {
            level,
            message: message.to_string(),
            fields: merge_fields(&self.fields, fields.to_vec()),
        });
    }

    fn with(&self, fields: Vec<Field>) -> Arc<dyn Logger> {
        Arc::new(Self {
            fields: merge_fields(&self.fields, fields),
            records: self.records.clone(),
        })
    }

    fn fields(&self) -> &[Field] {
        &self.fields
    }
}

/// Reporter that counts what it receives.
#[derive(Default)]
pub struct RecordingReporter {
    pub reports: Mutex<Vec<(&'static str, String)>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.reports.lock().unwrap().len()
    }

    pub fn reports(&self) -> Vec<(&'static str, String)> {
        self.reports.lock().unwrap().clone()
    }
}

impl ErrorReporter for RecordingReporter {
    fn report(&self, context: ReportContext, error: &(dyn std::error::Error + 'static)) {
        self.reports
            .lock()
            .unwrap()
            .push((context.operation, error.to_string()));
    }
}

/// Everything a test needs to drive the app and inspect its side effects.
pub struct TestApp {
    pub source: Arc<InMemoryImageSource>,
    pub storage: Arc<ScriptedStorage>,
    pub logger: RecordingLogger,
    pub reporter: Arc<RecordingReporter>,
}

impl TestApp {
    pub fn new(source: InMemoryImageSource, storage: ScriptedStorage) -> Self {
        Self {
            source: Arc::new(source),
            storage: Arc::new(storage),
            logger: RecordingLogger::new(),
            reporter: Arc::new(RecordingReporter::new()),
        }
    }

    pub fn with_images(count: i32) -> Self {
        Self::new(InMemoryImageSource::new(records(count)), ScriptedStorage::new())
    }

    pub fn state(&self) -> AppState {
        let catalog = ImageCatalogRepository::new(self.source.clone());
        let store = ObjectStoreRepository::new(self.storage.clone(), "test-bucket", self.reporter.clone());
        AppState::new(
            GalleryService::new(catalog, store, BASE_URL),
            self.reporter.clone(),
        )
    }

    pub fn router(&self) -> Router {
        build_router(
            self.state(),
            Arc::new(self.logger.clone()),
            Duration::from_secs(30),
            8 * 1024 * 1024,
        )
    }

    /// Serve on an ephemeral port until the returned `Shutdown` fires.
    pub async fn spawn(&self) -> (SocketAddr, Shutdown, JoinHandle<()>) {
        let mut config = AppConfig::default();
        config.listener.bind_address = "127.0.0.1:0".to_string();

        let server = HttpServer::new(&config, self.state(), Arc::new(self.logger.clone()));
        let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
        let addr = listener.local_addr().unwrap();

        let shutdown = Shutdown::new();
        let server_shutdown = shutdown.listener();
        let handle = tokio::spawn(async move {
            let _ = server.run(listener, server_shutdown).await;
        });
        (addr, shutdown, handle)
    }
}
