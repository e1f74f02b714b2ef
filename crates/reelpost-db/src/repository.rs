//! Published record repository: typed access to the posts collection.

use reelpost_core::constants::CREATED_AT_FIELD;
use reelpost_core::models::{NewPublishRecord, PublishRecord};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::DocumentStoreResult;
use crate::store::DocumentStore;

/// Repository for published video records.
#[derive(Clone)]
pub struct PublishRecordRepository {
    store: Arc<dyn DocumentStore>,
    collection: String,
}

impl PublishRecordRepository {
    pub fn new(store: Arc<dyn DocumentStore>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Write a record under its post id, replacing any previous record with that id.
    ///
    /// The creation time is assigned by the store.
    #[tracing::instrument(skip(self, record), fields(db.collection = %self.collection, db.record_id = %record.post_id))]
    pub async fn put(&self, record: &NewPublishRecord) -> DocumentStoreResult<PublishRecord> {
        let data = serde_json::to_value(record)?;
        let stored = self
            .store
            .set_document(
                &self.collection,
                &record.post_id.to_string(),
                data,
                &[CREATED_AT_FIELD],
            )
            .await?;
        Ok(serde_json::from_value(stored)?)
    }

    /// Fetch a record by post id.
    #[tracing::instrument(skip(self), fields(db.collection = %self.collection, db.record_id = %post_id))]
    pub async fn get(&self, post_id: Uuid) -> DocumentStoreResult<Option<PublishRecord>> {
        let doc = self
            .store
            .get_document(&self.collection, &post_id.to_string())
            .await?;
        doc.map(serde_json::from_value)
            .transpose()
            .map_err(Into::into)
    }

    /// Ids of every stored record, skipping ids that are not UUIDs.
    pub async fn list_ids(&self) -> DocumentStoreResult<Vec<Uuid>> {
        let ids = self.store.list_ids(&self.collection).await?;
        Ok(ids
            .iter()
            .filter_map(|id| Uuid::parse_str(id).ok())
            .collect())
    }
}
