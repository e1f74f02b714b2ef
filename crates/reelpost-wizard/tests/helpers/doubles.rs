use async_trait::async_trait;
use reelpost_core::{DocumentBackend, StorageBackend};
use reelpost_db::{DocumentStore, DocumentStoreError, DocumentStoreResult, MemoryDocumentStore};
use reelpost_storage::{LocalStorage, Storage, StorageError, StorageResult, UploadedObject};
use serde_json::Value as JsonValue;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Local storage that counts calls and can be told to fail or to hold uploads.
pub struct CountingStorage {
    inner: LocalStorage,
    pub uploads: AtomicUsize,
    pub deletes: AtomicUsize,
    pub fail_uploads: AtomicBool,
    pub fail_resolves: AtomicBool,
    pub fail_deletes: AtomicBool,
    gate: Option<Arc<Semaphore>>,
}

impl CountingStorage {
    pub async fn new(base_path: PathBuf) -> Self {
        let inner = LocalStorage::new(base_path, "http://localhost:3000/objects".to_string())
            .await
            .expect("Failed to create local storage");
        Self {
            inner,
            uploads: AtomicUsize::new(0),
            deletes: AtomicUsize::new(0),
            fail_uploads: AtomicBool::new(false),
            fail_resolves: AtomicBool::new(false),
            fail_deletes: AtomicBool::new(false),
            gate: None,
        }
    }

    /// Uploads wait for a permit from `gate` before writing.
    pub fn gated(mut self, gate: Arc<Semaphore>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }

    pub fn delete_count(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Storage for CountingStorage {
    async fn upload_with_key(
        &self,
        storage_key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<UploadedObject> {
        self.uploads.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            let _permit = gate
                .acquire()
                .await
                .map_err(|e| StorageError::BackendError(e.to_string()))?;
        }
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(StorageError::UploadFailed("injected upload failure".into()));
        }
        self.inner.upload_with_key(storage_key, data, content_type).await
    }

    async fn resolve_download_url(&self, object: &UploadedObject) -> StorageResult<String> {
        if self.fail_resolves.load(Ordering::SeqCst) {
            return Err(StorageError::BackendError("injected resolve failure".into()));
        }
        self.inner.resolve_download_url(object).await
    }

    async fn download(&self, storage_key: &str) -> StorageResult<Vec<u8>> {
        self.inner.download(storage_key).await
    }

    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(StorageError::DeleteFailed("injected delete failure".into()));
        }
        self.inner.delete(storage_key).await
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        self.inner.exists(storage_key).await
    }

    fn backend_type(&self) -> StorageBackend {
        self.inner.backend_type()
    }
}

/// In-memory document store that counts writes and can be told to refuse them.
#[derive(Default)]
pub struct CountingStore {
    pub inner: MemoryDocumentStore,
    pub writes: AtomicUsize,
    pub fail_writes: AtomicBool,
}

impl CountingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let store = Self::new();
        store.fail_writes.store(true, Ordering::SeqCst);
        store
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentStore for CountingStore {
    async fn set_document(
        &self,
        collection: &str,
        id: &str,
        data: JsonValue,
        server_timestamps: &[&str],
    ) -> DocumentStoreResult<JsonValue> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DocumentStoreError::Backend("injected write failure".into()));
        }
        self.inner
            .set_document(collection, id, data, server_timestamps)
            .await
    }

    async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> DocumentStoreResult<Option<JsonValue>> {
        self.inner.get_document(collection, id).await
    }

    async fn delete_document(&self, collection: &str, id: &str) -> DocumentStoreResult<()> {
        self.inner.delete_document(collection, id).await
    }

    async fn list_ids(&self, collection: &str) -> DocumentStoreResult<Vec<String>> {
        self.inner.list_ids(collection).await
    }

    fn backend_type(&self) -> DocumentBackend {
        self.inner.backend_type()
    }
}
