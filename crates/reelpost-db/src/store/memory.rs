use async_trait::async_trait;
use chrono::Utc;
use reelpost_core::DocumentBackend;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{stamp_server_timestamps, validate_segment, DocumentStore};
use crate::error::DocumentStoreResult;

type Collections = HashMap<String, HashMap<String, JsonValue>>;

/// In-memory document store
///
/// Contents live as long as the store (and its clones, which share state).
#[derive(Clone, Default)]
pub struct MemoryDocumentStore {
    collections: Arc<RwLock<Collections>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a collection
    pub async fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map(HashMap::len)
            .unwrap_or(0)
    }

    pub async fn is_empty(&self, collection: &str) -> bool {
        self.len(collection).await == 0
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    #[tracing::instrument(skip(self, data, server_timestamps), fields(db.collection = %collection, db.record_id = %id))]
    async fn set_document(
        &self,
        collection: &str,
        id: &str,
        mut data: JsonValue,
        server_timestamps: &[&str],
    ) -> DocumentStoreResult<JsonValue> {
        validate_segment("collection", collection)?;
        validate_segment("id", id)?;
        stamp_server_timestamps(&mut data, server_timestamps, Utc::now())?;

        let mut collections = self.collections.write().await;
        let replaced = collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), data.clone())
            .is_some();

        tracing::debug!(collection, id, replaced, "Memory document written");
        Ok(data)
    }

    async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> DocumentStoreResult<Option<JsonValue>> {
        validate_segment("collection", collection)?;
        validate_segment("id", id)?;

        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    #[tracing::instrument(skip(self), fields(db.collection = %collection, db.record_id = %id))]
    async fn delete_document(&self, collection: &str, id: &str) -> DocumentStoreResult<()> {
        validate_segment("collection", collection)?;
        validate_segment("id", id)?;

        let mut collections = self.collections.write().await;
        if let Some(docs) = collections.get_mut(collection) {
            docs.remove(id);
        }
        Ok(())
    }

    async fn list_ids(&self, collection: &str) -> DocumentStoreResult<Vec<String>> {
        validate_segment("collection", collection)?;

        let collections = self.collections.read().await;
        let mut ids: Vec<String> = collections
            .get(collection)
            .map(|docs| docs.keys().cloned().collect())
            .unwrap_or_default();
        ids.sort();
        Ok(ids)
    }

    fn backend_type(&self) -> DocumentBackend {
        DocumentBackend::Memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_same_id_replaces_document() {
        let store = MemoryDocumentStore::new();

        store
            .set_document("posts", "a", json!({ "postTitle": "first" }), &[])
            .await
            .unwrap();
        store
            .set_document("posts", "a", json!({ "postTitle": "second" }), &[])
            .await
            .unwrap();

        assert_eq!(store.len("posts").await, 1);
        let doc = store.get_document("posts", "a").await.unwrap().unwrap();
        assert_eq!(doc["postTitle"], "second");
    }

    #[tokio::test]
    async fn test_clones_share_contents() {
        let store = MemoryDocumentStore::new();
        let clone = store.clone();

        store
            .set_document("posts", "a", json!({}), &["createdAt"])
            .await
            .unwrap();

        let doc = clone.get_document("posts", "a").await.unwrap().unwrap();
        assert!(doc["createdAt"].is_string());
    }

    #[tokio::test]
    async fn test_delete_and_list() {
        let store = MemoryDocumentStore::new();
        for id in ["b", "a", "c"] {
            store.set_document("posts", id, json!({}), &[]).await.unwrap();
        }
        store.delete_document("posts", "b").await.unwrap();
        store.delete_document("posts", "missing").await.unwrap();

        assert_eq!(store.list_ids("posts").await.unwrap(), vec!["a", "c"]);
        assert!(store.list_ids("other").await.unwrap().is_empty());
        assert!(store.is_empty("other").await);
    }
}
