//! Reelpost Core Library
//!
//! This crate provides the domain models, error types, configuration and constants
//! shared by every Reelpost component: the storage and document backends, the publish
//! wizard and the command-line front end.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod storage_types;
pub mod validation;

// Re-export commonly used types
pub use config::{BaseConfig, Config, LogFormat, OrphanPolicy, PublisherConfig};
pub use error::{AppError, LogLevel};
pub use storage_types::{DocumentBackend, StorageBackend};
