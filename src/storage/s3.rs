//! S3-backed object storage.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use bytes::Bytes;

use crate::config::StorageConfig;
use crate::domain::DataAccessError;
use crate::repository::ObjectStorageClient;

/// [`ObjectStorageClient`] using a shared S3 client.
#[derive(Debug, Clone)]
pub struct S3ObjectStorage {
    client: Client,
}

impl S3ObjectStorage {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build the client from the ambient AWS credentials chain.
    /// A custom endpoint switches to path-style addressing (LocalStack, MinIO).
    pub async fn from_config(config: &StorageConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));
        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }
        let shared = loader.load().await;

        let s3_config = aws_sdk_s3::config::Builder::from(&shared)
            .force_path_style(config.endpoint.is_some())
            .build();

        tracing::info!(
            region = %config.region,
            endpoint = ?config.endpoint,
            "S3 client initialized"
        );
        Self::new(Client::from_conf(s3_config))
    }
}

#[async_trait]
impl ObjectStorageClient for S3ObjectStorage {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        body: Bytes,
    ) -> Result<(), DataAccessError> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| DataAccessError::Storage(DisplayErrorContext(&e).to_string()))?;
        Ok(())
    }
}
