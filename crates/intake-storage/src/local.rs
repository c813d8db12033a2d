use crate::traits::{ObjectMetadata, Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Suffix of the JSON file holding an object's metadata next to the object.
const METADATA_SIDECAR_SUFFIX: &str = ".metadata.json";

/// Local filesystem storage implementation
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for stored submissions (e.g., "/var/lib/intake")
    /// * `base_url` - Base URL reported for stored objects (e.g., "http://localhost:4000/files")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            base_url,
        })
    }

    /// Convert storage key to filesystem path.
    ///
    /// Keys carry caller-supplied segments, so anything that could leave the
    /// base directory is rejected.
    fn key_to_path(&self, storage_key: &str) -> StorageResult<PathBuf> {
        if storage_key.is_empty()
            || storage_key.starts_with('/')
            || storage_key.contains('\\')
            || storage_key.split('/').any(|segment| segment == ".." || segment == ".")
        {
            return Err(StorageError::InvalidKey(format!(
                "Storage key escapes storage directory: {}",
                storage_key
            )));
        }

        Ok(self.base_path.join(storage_key))
    }

    fn generate_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }

    async fn ensure_parent_dir(path: &Path, storage_key: &str) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::upload_failed(storage_key, format!("create directory: {}", e))
            })?;
        }
        Ok(())
    }

    async fn write_file(path: &Path, storage_key: &str, data: &[u8]) -> StorageResult<()> {
        let mut file = fs::File::create(path)
            .await
            .map_err(|e| StorageError::upload_failed(storage_key, format!("create: {}", e)))?;

        file.write_all(data)
            .await
            .map_err(|e| StorageError::upload_failed(storage_key, format!("write: {}", e)))?;

        file.sync_all()
            .await
            .map_err(|e| StorageError::upload_failed(storage_key, format!("sync: {}", e)))?;

        Ok(())
    }

    fn sidecar_path(path: &Path) -> PathBuf {
        let mut name = path.as_os_str().to_os_string();
        name.push(METADATA_SIDECAR_SUFFIX);
        PathBuf::from(name)
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn put_object(
        &self,
        storage_key: &str,
        data: Bytes,
        content_type: &str,
        metadata: &ObjectMetadata,
    ) -> StorageResult<String> {
        let path = self.key_to_path(storage_key)?;
        let size = data.len();

        Self::ensure_parent_dir(&path, storage_key).await?;

        let start = std::time::Instant::now();

        Self::write_file(&path, storage_key, &data).await?;

        if !metadata.is_empty() {
            let sidecar = serde_json::json!({
                "content-type": content_type,
                "metadata": metadata,
            });
            let encoded = serde_json::to_vec_pretty(&sidecar)
                .map_err(|e| StorageError::upload_failed(storage_key, e.to_string()))?;
            Self::write_file(&Self::sidecar_path(&path), storage_key, &encoded).await?;
        }

        let url = self.generate_url(storage_key);

        tracing::info!(
            path = %path.display(),
            key = %storage_key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(url)
    }

    async fn list_prefixes(&self, prefix: &str) -> StorageResult<Vec<String>> {
        let dir = self.key_to_path(prefix.trim_end_matches('/'))?;

        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StorageError::list_failed(prefix, e.to_string())),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StorageError::list_failed(prefix, e.to_string()))?
        {
            let file_type = entry
                .file_type()
                .await
                .map_err(|e| StorageError::list_failed(prefix, e.to_string()))?;
            if file_type.is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();

        tracing::debug!(path = %dir.display(), prefix = %prefix, count = names.len(), "Local listing successful");

        Ok(names)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
