use reelpost_core::{Config, DocumentBackend};
use std::sync::Arc;

#[cfg(feature = "postgres")]
use crate::store::PostgresDocumentStore;
use crate::store::{DocumentStore, FileDocumentStore, MemoryDocumentStore};
use crate::{DocumentStoreError, DocumentStoreResult};

/// Create a document store backend based on configuration
pub async fn create_document_store(config: &Config) -> DocumentStoreResult<Arc<dyn DocumentStore>> {
    match config.document_backend() {
        DocumentBackend::File => {
            let store = FileDocumentStore::new(config.document_store_path()).await?;
            Ok(Arc::new(store))
        }

        DocumentBackend::Memory => {
            tracing::warn!("Using in-memory document store; records are lost on exit");
            Ok(Arc::new(MemoryDocumentStore::new()))
        }

        #[cfg(feature = "postgres")]
        DocumentBackend::Postgres => {
            let url = config.database_url().ok_or_else(|| {
                DocumentStoreError::Config("DATABASE_URL not configured".to_string())
            })?;
            let store = PostgresDocumentStore::connect(url).await?;
            Ok(Arc::new(store))
        }

        #[cfg(not(feature = "postgres"))]
        DocumentBackend::Postgres => Err(DocumentStoreError::Config(
            "Postgres document backend not available (postgres feature not enabled)".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelpost_core::PublisherConfig;

    #[tokio::test]
    async fn test_create_file_store_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let publisher = PublisherConfig {
            document_store_path: dir.path().to_string_lossy().to_string(),
            ..PublisherConfig::default()
        };

        let store = create_document_store(&Config(Box::new(publisher)))
            .await
            .unwrap();
        assert_eq!(store.backend_type(), DocumentBackend::File);
    }

    #[tokio::test]
    async fn test_postgres_without_url_is_config_error() {
        let publisher = PublisherConfig {
            document_backend: DocumentBackend::Postgres,
            database_url: None,
            ..PublisherConfig::default()
        };

        let result = create_document_store(&Config(Box::new(publisher))).await;
        assert!(matches!(result, Err(DocumentStoreError::Config(_))));
    }
}
