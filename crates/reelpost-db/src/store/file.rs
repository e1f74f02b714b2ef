use async_trait::async_trait;
use chrono::Utc;
use reelpost_core::DocumentBackend;
use serde_json::Value as JsonValue;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use super::{stamp_server_timestamps, validate_segment, DocumentStore};
use crate::error::{DocumentStoreError, DocumentStoreResult};

const DOCUMENT_EXTENSION: &str = "json";

/// Document store backed by a directory of JSON files
///
/// Layout: `{base_path}/{collection}/{id}.json`. Writes go to a temporary file that is
/// renamed over the target, so readers never observe a partially written document.
#[derive(Clone)]
pub struct FileDocumentStore {
    base_path: PathBuf,
}

impl FileDocumentStore {
    /// Create a new FileDocumentStore rooted at `base_path`, creating the directory if needed.
    pub async fn new(base_path: impl Into<PathBuf>) -> DocumentStoreResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            DocumentStoreError::Config(format!(
                "Failed to create document directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(Self { base_path })
    }

    fn collection_dir(&self, collection: &str) -> DocumentStoreResult<PathBuf> {
        validate_segment("collection", collection)?;
        Ok(self.base_path.join(collection))
    }

    fn document_path(&self, collection: &str, id: &str) -> DocumentStoreResult<PathBuf> {
        validate_segment("id", id)?;
        Ok(self
            .collection_dir(collection)?
            .join(format!("{}.{}", id, DOCUMENT_EXTENSION)))
    }
}

#[async_trait]
impl DocumentStore for FileDocumentStore {
    #[tracing::instrument(skip(self, data, server_timestamps), fields(db.collection = %collection, db.record_id = %id))]
    async fn set_document(
        &self,
        collection: &str,
        id: &str,
        mut data: JsonValue,
        server_timestamps: &[&str],
    ) -> DocumentStoreResult<JsonValue> {
        let path = self.document_path(collection, id)?;
        stamp_server_timestamps(&mut data, server_timestamps, Utc::now())?;

        let encoded = serde_json::to_vec_pretty(&data)?;
        let start = std::time::Instant::now();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let tmp_path = path.with_extension(format!("{}.tmp", DOCUMENT_EXTENSION));
        let mut file = fs::File::create(&tmp_path).await?;
        file.write_all(&encoded).await?;
        file.sync_all().await?;
        drop(file);

        if let Err(e) = fs::rename(&tmp_path, &path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }

        tracing::info!(
            path = %path.display(),
            size_bytes = encoded.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Document written"
        );

        Ok(data)
    }

    async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> DocumentStoreResult<Option<JsonValue>> {
        let path = self.document_path(collection, id)?;

        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    #[tracing::instrument(skip(self), fields(db.collection = %collection, db.record_id = %id))]
    async fn delete_document(&self, collection: &str, id: &str) -> DocumentStoreResult<()> {
        let path = self.document_path(collection, id)?;

        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(path = %path.display(), "Document deleted");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn list_ids(&self, collection: &str) -> DocumentStoreResult<Vec<String>> {
        let dir = self.collection_dir(collection)?;

        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut ids = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(DOCUMENT_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                ids.push(stem.to_string());
            }
        }
        ids.sort();
        Ok(ids)
    }

    fn backend_type(&self) -> DocumentBackend {
        DocumentBackend::File
    }
}
