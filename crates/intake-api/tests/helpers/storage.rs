use async_trait::async_trait;
use bytes::Bytes;
use intake_storage::{
    ObjectMetadata, Storage, StorageBackend, StorageError, StorageResult,
};
use std::sync::{Arc, Mutex};

/// Records every key written before delegating to the wrapped backend.
pub struct RecordingStorage {
    inner: Arc<dyn Storage>,
    keys: Mutex<Vec<String>>,
}

impl RecordingStorage {
    pub fn new(inner: Arc<dyn Storage>) -> Self {
        Self {
            inner,
            keys: Mutex::new(Vec::new()),
        }
    }

    pub fn keys(&self) -> Vec<String> {
        self.keys.lock().unwrap().clone()
    }
}

#[async_trait]
impl Storage for RecordingStorage {
    async fn put_object(
        &self,
        storage_key: &str,
        data: Bytes,
        content_type: &str,
        metadata: &ObjectMetadata,
    ) -> StorageResult<String> {
        self.keys.lock().unwrap().push(storage_key.to_string());
        self.inner
            .put_object(storage_key, data, content_type, metadata)
            .await
    }

    async fn list_prefixes(&self, prefix: &str) -> StorageResult<Vec<String>> {
        self.inner.list_prefixes(prefix).await
    }

    fn backend_type(&self) -> StorageBackend {
        self.inner.backend_type()
    }
}

/// Rejects every write and listing.
#[derive(Default)]
pub struct FailingStorage {
    attempts: Mutex<Vec<String>>,
}

impl FailingStorage {
    pub const MESSAGE: &'static str = "simulated storage outage";

    pub fn attempts(&self) -> Vec<String> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Storage for FailingStorage {
    async fn put_object(
        &self,
        storage_key: &str,
        _data: Bytes,
        _content_type: &str,
        _metadata: &ObjectMetadata,
    ) -> StorageResult<String> {
        self.attempts.lock().unwrap().push(storage_key.to_string());
        Err(StorageError::upload_failed(storage_key, Self::MESSAGE))
    }

    async fn list_prefixes(&self, prefix: &str) -> StorageResult<Vec<String>> {
        Err(StorageError::list_failed(prefix, Self::MESSAGE))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}
