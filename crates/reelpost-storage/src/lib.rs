//! Reelpost Storage Library
//!
//! This crate provides the object storage abstraction used to hold published assets,
//! with implementations for S3 (and S3-compatible providers) and the local filesystem.
//!
//! # Storage key format
//!
//! Keys are scoped by the record they belong to:
//!
//! - **Thumbnail**: `posts/{post_id}/thumbnail`
//!
//! Keys must not contain `..` or a leading `/`. Key generation is centralized in the
//! `keys` module so all backends stay consistent.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use keys::thumbnail_key;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use reelpost_core::StorageBackend;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult, UploadedObject};
