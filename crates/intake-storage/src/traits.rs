//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::BTreeMap;
use thiserror::Error;

/// Descriptive attributes stored alongside an object
pub type ObjectMetadata = BTreeMap<String, String>;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed for {key}: {message}")]
    UploadFailed { key: String, message: String },

    #[error("Listing failed for {prefix}: {message}")]
    ListFailed { prefix: String, message: String },

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl StorageError {
    pub fn upload_failed(key: &str, message: impl Into<String>) -> Self {
        StorageError::UploadFailed {
            key: key.to_string(),
            message: message.into(),
        }
    }

    pub fn list_failed(prefix: &str, message: impl Into<String>) -> Self {
        StorageError::ListFailed {
            prefix: prefix.to_string(),
            message: message.into(),
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// Backends perform a single durable put per call. Existing objects at the
/// same key are overwritten without a prior existence check.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write `data` at `storage_key` and return a URL identifying the object.
    async fn put_object(
        &self,
        storage_key: &str,
        data: Bytes,
        content_type: &str,
        metadata: &ObjectMetadata,
    ) -> StorageResult<String>;

    /// Names of the immediate child prefixes ("directories") under `prefix`,
    /// sorted. A prefix with nothing under it lists as empty.
    async fn list_prefixes(&self, prefix: &str) -> StorageResult<Vec<String>>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
