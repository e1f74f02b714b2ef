//! Shared key generation for storage backends.
//!
//! Key format: `posts/{post_id}/{asset}`.

use uuid::Uuid;

use crate::traits::{StorageError, StorageResult};

/// Storage key of a record's thumbnail image.
pub fn thumbnail_key(post_id: Uuid) -> String {
    format!("posts/{}/thumbnail", post_id)
}

/// Reject keys that could escape the storage root or address nothing.
pub fn validate_key(storage_key: &str) -> StorageResult<()> {
    if storage_key.is_empty() {
        return Err(StorageError::InvalidKey("Storage key is empty".to_string()));
    }
    if storage_key.contains("..") || storage_key.starts_with('/') || storage_key.contains('\\') {
        return Err(StorageError::InvalidKey(
            "Storage key contains invalid characters".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thumbnail_key_is_scoped_by_post() {
        let id = Uuid::parse_str("6f1c5a34-8a55-4b8f-9a49-1f0f6c9d2b11").unwrap();
        assert_eq!(
            thumbnail_key(id),
            "posts/6f1c5a34-8a55-4b8f-9a49-1f0f6c9d2b11/thumbnail"
        );
    }

    #[test]
    fn test_validate_key() {
        assert!(validate_key("posts/abc/thumbnail").is_ok());
        assert!(matches!(validate_key(""), Err(StorageError::InvalidKey(_))));
        assert!(matches!(
            validate_key("../etc/passwd"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(
            validate_key("/etc/passwd"),
            Err(StorageError::InvalidKey(_))
        ));
    }
}
