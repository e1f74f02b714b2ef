use reelpost_core::AppError;
use thiserror::Error;

/// Document store operation errors
#[derive(Debug, Error)]
pub enum DocumentStoreError {
    #[error("Invalid document path: {0}")]
    InvalidPath(String),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document backend error: {0}")]
    Backend(String),

    #[cfg(feature = "postgres")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for document store operations
pub type DocumentStoreResult<T> = Result<T, DocumentStoreError>;

impl From<DocumentStoreError> for AppError {
    fn from(err: DocumentStoreError) -> Self {
        match err {
            DocumentStoreError::InvalidPath(msg) | DocumentStoreError::InvalidDocument(msg) => {
                AppError::InvalidInput(msg)
            }
            DocumentStoreError::Config(msg) => AppError::Config(msg),
            other => AppError::Database(other.to_string()),
        }
    }
}
