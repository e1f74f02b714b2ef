//! Data models for the application
//!
//! Each sub-module covers one feature area; everything is re-exported here.

mod asset;
mod post;
mod user;

// Re-export all models for convenient imports
pub use asset::*;
pub use post::*;
pub use user::*;
