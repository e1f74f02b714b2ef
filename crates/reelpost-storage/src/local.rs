use crate::keys::validate_key;
use crate::traits::{Storage, StorageError, StorageResult, UploadedObject};
use crate::StorageBackend;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

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
    /// * `base_path` - Root directory for object storage (e.g., "./data/objects")
    /// * `base_url` - Base URL the directory is served under (e.g., "http://localhost:3000/objects")
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

    /// Convert storage key to filesystem path with security validation
    ///
    /// Rejects keys containing traversal sequences, and keys whose canonical path
    /// resolves outside the base directory (e.g. through a symlink).
    fn key_to_path(&self, storage_key: &str) -> StorageResult<PathBuf> {
        validate_key(storage_key)?;

        let path = self.base_path.join(storage_key);

        if let Ok(canonical) = path.canonicalize() {
            let base_canonical = self.base_path.canonicalize().map_err(|e| {
                StorageError::ConfigError(format!("Failed to canonicalize base path: {}", e))
            })?;
            if canonical.strip_prefix(&base_canonical).is_err() {
                return Err(StorageError::InvalidKey(
                    "Storage key resolves outside storage directory".to_string(),
                ));
            }
        }

        Ok(path)
    }

    /// Generate public URL for file
    fn generate_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }

    /// Ensure parent directory exists
    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for LocalStorage {
    #[tracing::instrument(skip(self, data), fields(storage.backend = "local", key = %storage_key))]
    async fn upload_with_key(
        &self,
        storage_key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<UploadedObject> {
        let path = self.key_to_path(storage_key)?;
        let size = data.len();

        self.ensure_parent_dir(&path).await?;

        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(&data).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            key = %storage_key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(UploadedObject {
            key: storage_key.to_string(),
            size_bytes: size as u64,
            content_type: content_type.to_string(),
        })
    }

    async fn resolve_download_url(&self, object: &UploadedObject) -> StorageResult<String> {
        let path = self.key_to_path(&object.key)?;

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StorageError::NotFound(object.key.clone()));
        }

        Ok(self.generate_url(&object.key))
    }

    async fn download(&self, storage_key: &str) -> StorageResult<Vec<u8>> {
        let path = self.key_to_path(storage_key)?;
        let start = std::time::Instant::now();

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StorageError::NotFound(storage_key.to_string()));
        }

        let data = fs::read(&path).await.map_err(|e| {
            StorageError::DownloadFailed(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        tracing::debug!(
            key = %storage_key,
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage download successful"
        );

        Ok(data)
    }

    #[tracing::instrument(skip(self), fields(storage.backend = "local", key = %storage_key))]
    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        let path = self.key_to_path(storage_key)?;
        let start = std::time::Instant::now();

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(());
        }

        fs::remove_file(&path).await.map_err(|e| {
            StorageError::DeleteFailed(format!("Failed to delete file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            key = %storage_key,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage delete successful"
        );

        Ok(())
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        let path = self.key_to_path(storage_key)?;
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

#[cfg(all(test, feature = "storage-local"))]
mod tests {
    use super::*;
    use crate::keys::thumbnail_key;
    use tempfile::tempdir;
    use uuid::Uuid;

    async fn storage_in(dir: &Path) -> LocalStorage {
        LocalStorage::new(dir, "http://localhost:3000/objects/".to_string())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_upload_then_resolve_url() {
        let dir = tempdir().unwrap();
        let storage = storage_in(dir.path()).await;
        let key = thumbnail_key(Uuid::new_v4());

        let object = storage
            .upload_with_key(&key, b"png bytes".to_vec(), "image/png")
            .await
            .unwrap();
        assert_eq!(object.key, key);
        assert_eq!(object.size_bytes, 9);

        let url = storage.resolve_download_url(&object).await.unwrap();
        assert_eq!(url, format!("http://localhost:3000/objects/{}", key));
        assert_eq!(storage.download(&key).await.unwrap(), b"png bytes".to_vec());
    }

    #[tokio::test]
    async fn test_upload_overwrites_existing_object() {
        let dir = tempdir().unwrap();
        let storage = storage_in(dir.path()).await;
        let key = thumbnail_key(Uuid::new_v4());

        storage
            .upload_with_key(&key, b"first".to_vec(), "image/png")
            .await
            .unwrap();
        storage
            .upload_with_key(&key, b"second".to_vec(), "image/png")
            .await
            .unwrap();

        assert_eq!(storage.download(&key).await.unwrap(), b"second".to_vec());
    }

    #[tokio::test]
    async fn test_resolve_url_of_deleted_object_fails() {
        let dir = tempdir().unwrap();
        let storage = storage_in(dir.path()).await;
        let key = thumbnail_key(Uuid::new_v4());

        let object = storage
            .upload_with_key(&key, b"x".to_vec(), "image/png")
            .await
            .unwrap();
        storage.delete(&key).await.unwrap();

        assert!(!storage.exists(&key).await.unwrap());
        let result = storage.resolve_download_url(&object).await;
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_path_traversal_rejected() {
        let dir = tempdir().unwrap();
        let storage = storage_in(dir.path()).await;

        let result = storage.download("../../../etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage.delete("../etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage.exists("/etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_upload_and_delete_run_in_keyed_spans() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let dir = tempdir().unwrap();
        let storage = storage_in(dir.path()).await;
        let key = thumbnail_key(Uuid::new_v4());
        storage
            .upload_with_key(&key, b"x".to_vec(), "image/png")
            .await
            .unwrap();
        storage.delete(&key).await.unwrap();

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("upload_with_key{"), "{output}");
        assert!(output.contains("delete{"), "{output}");
        assert!(output.contains(&format!("key={}", key)), "{output}");
        assert!(output.contains("storage.backend=\"local\""), "{output}");
    }

    #[tokio::test]
    async fn test_delete_nonexistent_is_ok() {
        let dir = tempdir().unwrap();
        let storage = storage_in(dir.path()).await;

        assert!(storage.delete("posts/missing/thumbnail").await.is_ok());
    }
}
