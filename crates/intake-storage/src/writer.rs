//! Write policy shared by attachment and metadata persistence.

use crate::traits::{ObjectMetadata, Storage, StorageResult};
use crate::StorageBackend;
use bytes::Bytes;
use intake_core::constants::{META_CONTENT_TYPE, META_FILE_SIZE, META_ORIGINAL_FILENAME};
use std::sync::Arc;

/// Persists objects through a storage backend, skipping empty content.
#[derive(Clone)]
pub struct StorageWriter {
    storage: Arc<dyn Storage>,
}

impl StorageWriter {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub fn backend_type(&self) -> StorageBackend {
        self.storage.backend_type()
    }

    /// Store `content` at `storage_key`.
    ///
    /// Empty content is not written and yields `Ok(None)`; the backend is not
    /// called. Otherwise returns the URL of the stored object.
    pub async fn store(
        &self,
        content: Bytes,
        content_type: &str,
        storage_key: &str,
        metadata: &ObjectMetadata,
    ) -> StorageResult<Option<String>> {
        if content.is_empty() {
            tracing::debug!(key = %storage_key, "Skipping empty object write");
            return Ok(None);
        }

        let url = self
            .storage
            .put_object(storage_key, content, content_type, metadata)
            .await?;
        Ok(Some(url))
    }

    /// Child prefixes under `prefix`, as reported by the backend.
    pub async fn list_prefixes(&self, prefix: &str) -> StorageResult<Vec<String>> {
        self.storage.list_prefixes(prefix).await
    }
}

/// Attributes attached to every stored attachment.
pub fn attachment_metadata(filename: &str, content_type: &str, size: usize) -> ObjectMetadata {
    ObjectMetadata::from([
        (META_ORIGINAL_FILENAME.to_string(), filename.to_string()),
        (META_CONTENT_TYPE.to_string(), content_type.to_string()),
        (META_FILE_SIZE.to_string(), size.to_string()),
    ])
}
