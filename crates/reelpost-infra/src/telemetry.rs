//! Tracing subscriber initialization

use reelpost_core::LogFormat;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "reelpost=info,reelpost_wizard=info,reelpost_storage=info,reelpost_db=info";

/// Initialize tracing with either human-readable or JSON output.
///
/// `RUST_LOG` takes precedence over `default_filter`. Fails if a global subscriber is
/// already installed.
pub fn init_telemetry(format: LogFormat, default_filter: &str) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .try_init()?,
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false),
            )
            .try_init()?,
    }

    tracing::debug!(?format, "Telemetry initialized");
    Ok(())
}

pub fn shutdown_telemetry() {
    tracing::debug!("Telemetry shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails_instead_of_panicking() {
        let first = init_telemetry(LogFormat::Json, DEFAULT_FILTER);
        let second = init_telemetry(LogFormat::Text, DEFAULT_FILTER);
        assert!(first.is_ok());
        assert!(second.is_err());
    }
}
