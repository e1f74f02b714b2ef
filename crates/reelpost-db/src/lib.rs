//! Reelpost document store
//!
//! A small document database abstraction: JSON documents addressed by
//! `(collection, id)`, written with overwrite-on-conflict semantics and optional
//! server-assigned timestamp fields. Backends cover a directory of JSON files, an
//! in-process map and PostgreSQL (JSONB, behind the `postgres` feature).
//!
//! `PublishRecordRepository` layers the typed published-video record on top.

pub mod error;
pub mod factory;
pub mod repository;
pub mod store;

pub use error::{DocumentStoreError, DocumentStoreResult};
pub use factory::create_document_store;
pub use repository::PublishRecordRepository;
#[cfg(feature = "postgres")]
pub use store::PostgresDocumentStore;
pub use store::{DocumentStore, FileDocumentStore, MemoryDocumentStore};
