//! Document store abstraction trait and backends

mod file;
mod memory;
#[cfg(feature = "postgres")]
mod postgres;

pub use file::FileDocumentStore;
pub use memory::MemoryDocumentStore;
#[cfg(feature = "postgres")]
pub use postgres::PostgresDocumentStore;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reelpost_core::validation::is_valid_segment;
use reelpost_core::DocumentBackend;
use serde_json::Value as JsonValue;

use crate::error::{DocumentStoreError, DocumentStoreResult};

/// Document store abstraction trait
///
/// Documents are JSON objects addressed by `(collection, id)`. Writes replace any
/// existing document with the same address. Fields named in `server_timestamps` are
/// set by the store to its own clock at write time, whatever the caller supplied.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Write a document, replacing any existing one. Returns the document as stored.
    async fn set_document(
        &self,
        collection: &str,
        id: &str,
        data: JsonValue,
        server_timestamps: &[&str],
    ) -> DocumentStoreResult<JsonValue>;

    /// Fetch a document, if present
    async fn get_document(&self, collection: &str, id: &str)
        -> DocumentStoreResult<Option<JsonValue>>;

    /// Delete a document. Deleting a missing document is not an error.
    async fn delete_document(&self, collection: &str, id: &str) -> DocumentStoreResult<()>;

    /// Ids of all documents in a collection, sorted
    async fn list_ids(&self, collection: &str) -> DocumentStoreResult<Vec<String>>;

    /// Get the document backend type
    fn backend_type(&self) -> DocumentBackend;
}

/// Validate a collection name or document id.
pub(crate) fn validate_segment(kind: &str, value: &str) -> DocumentStoreResult<()> {
    if is_valid_segment(value) {
        Ok(())
    } else {
        Err(DocumentStoreError::InvalidPath(format!(
            "{} {:?} must be 1-256 characters of [A-Za-z0-9._-]",
            kind, value
        )))
    }
}

/// Set each named field of `data` to `now`.
pub(crate) fn stamp_server_timestamps(
    data: &mut JsonValue,
    fields: &[&str],
    now: DateTime<Utc>,
) -> DocumentStoreResult<()> {
    let object = data.as_object_mut().ok_or_else(|| {
        DocumentStoreError::InvalidDocument("document must be a JSON object".to_string())
    })?;
    let stamp = JsonValue::String(now.to_rfc3339_opts(SecondsFormat::Micros, true));
    for field in fields {
        object.insert((*field).to_string(), stamp.clone());
    }
    Ok(())
}
