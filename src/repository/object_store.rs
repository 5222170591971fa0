//! Image uploads into the object store.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::{DomainError, Operation, UploadRequest};
use crate::observability::reporting::{ErrorReporter, ReportContext};
use crate::repository::{ObjectStorageClient, DEFAULT_CALL_TIMEOUT};
use crate::resilience::timeouts::bounded;

/// Writes uploaded images into a single bucket.
#[derive(Clone)]
pub struct ObjectStoreRepository {
    client: Arc<dyn ObjectStorageClient>,
    bucket: String,
    reporter: Arc<dyn ErrorReporter>,
    call_timeout: Duration,
}

impl ObjectStoreRepository {
    pub fn new(
        client: Arc<dyn ObjectStorageClient>,
        bucket: impl Into<String>,
        reporter: Arc<dyn ErrorReporter>,
    ) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            reporter,
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    /// Put `param` as one object. A failure is reported once and returned
    /// with the upload summary attached.
    pub async fn upload(&self, param: &UploadRequest) -> Result<(), DomainError> {
        let put = self.client.put_object(
            &self.bucket,
            &param.key,
            param.content_type(),
            param.body.clone(),
        );

        match bounded(Operation::Upload, self.call_timeout, put).await {
            Ok(()) => {
                tracing::debug!(bucket = %self.bucket, key = %param.key, "Object uploaded");
                Ok(())
            }
            Err(e) => {
                let err = e.with_detail(param.summary());
                self.reporter.report(ReportContext::new(Operation::Upload.as_str()), &err);
                Err(err)
            }
        }
    }
}
