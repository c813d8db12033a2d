use crate::traits::{ObjectMetadata, Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::AmazonS3Builder;
use object_store::path::Path;
use object_store::{
    Attribute, AttributeValue, Attributes, ObjectStore, PutOptions, PutPayload,
    Result as ObjectResult,
};
use std::sync::Arc;

/// S3 storage implementation
#[derive(Clone)]
pub struct S3Storage {
    store: Arc<dyn ObjectStore>,
    bucket: String,
}

impl S3Storage {
    /// Create a new S3Storage instance
    ///
    /// # Arguments
    /// * `bucket` - S3 bucket name
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO)
    pub fn new(bucket: String, region: String, endpoint_url: Option<String>) -> StorageResult<Self> {
        // Credentials come from the environment; bucket and region are explicit.
        let mut builder = AmazonS3Builder::from_env()
            .with_region(region)
            .with_bucket_name(bucket.clone());

        if let Some(endpoint) = endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder.with_endpoint(endpoint).with_allow_http(allow_http);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(Self::with_store(Arc::new(store), bucket))
    }

    /// Wrap an already built object store (used with in-memory stores in tests).
    pub fn with_store(store: Arc<dyn ObjectStore>, bucket: String) -> Self {
        S3Storage { store, bucket }
    }

    /// URL of a stored object: `s3://{bucket}/{key}`
    fn generate_url(&self, key: &str) -> String {
        format!("s3://{}/{}", self.bucket, key)
    }

    /// Object path for a storage key, kept byte for byte. Empty, `.` and `..`
    /// segments are rejected rather than rewritten.
    fn location(storage_key: &str) -> StorageResult<Path> {
        Path::parse(storage_key).map_err(|e| {
            StorageError::InvalidKey(format!("{}: {}", storage_key, e))
        })
    }

    fn attributes(content_type: &str, metadata: &ObjectMetadata) -> Attributes {
        let mut attributes = Attributes::new();
        attributes.insert(
            Attribute::ContentType,
            AttributeValue::from(content_type.to_string()),
        );
        for (name, value) in metadata {
            attributes.insert(
                Attribute::Metadata(name.clone().into()),
                AttributeValue::from(value.clone()),
            );
        }
        attributes
    }
}

#[async_trait]
impl Storage for S3Storage {
    async fn put_object(
        &self,
        storage_key: &str,
        data: Bytes,
        content_type: &str,
        metadata: &ObjectMetadata,
    ) -> StorageResult<String> {
        let size = data.len() as u64;
        let location = Self::location(storage_key)?;
        let options = PutOptions {
            attributes: Self::attributes(content_type, metadata),
            ..Default::default()
        };
        let start = std::time::Instant::now();

        let result: ObjectResult<_> = self
            .store
            .put_opts(&location, PutPayload::from(data), options)
            .await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %storage_key,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "S3 upload failed"
            );
            StorageError::upload_failed(storage_key, e.to_string())
        })?;

        let url = self.generate_url(storage_key);

        tracing::info!(
            bucket = %self.bucket,
            key = %storage_key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload successful"
        );

        Ok(url)
    }

    async fn list_prefixes(&self, prefix: &str) -> StorageResult<Vec<String>> {
        let location = Self::location(prefix)?;
        let start = std::time::Instant::now();

        let listing = self
            .store
            .list_with_delimiter(Some(&location))
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    prefix = %prefix,
                    "S3 listing failed"
                );
                StorageError::list_failed(prefix, e.to_string())
            })?;

        let mut names: Vec<String> = listing
            .common_prefixes
            .iter()
            .filter_map(|path| path.filename().map(str::to_string))
            .collect();
        names.sort();

        tracing::debug!(
            bucket = %self.bucket,
            prefix = %prefix,
            count = names.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 listing successful"
        );

        Ok(names)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}
