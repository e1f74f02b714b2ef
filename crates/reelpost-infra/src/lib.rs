//! Reelpost Infrastructure Library
//!
//! Shared infrastructure for Reelpost front ends. Currently this is telemetry
//! initialization (structured logging through `tracing`).

pub mod telemetry;

pub use telemetry::{init_telemetry, shutdown_telemetry};
