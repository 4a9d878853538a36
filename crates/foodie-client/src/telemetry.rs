//! Tracing setup for whatever hosts the storefront.

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, util::TryInitError, EnvFilter};

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("failed to install tracing subscriber: {0}")]
    Install(#[from] TryInitError),
}

/// Install a `fmt` subscriber filtered by `RUST_LOG`, defaulting to INFO.
///
/// Fails instead of panicking when a global subscriber already exists.
pub fn init() -> Result<(), TelemetryError> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .try_init()?;
    Ok(())
}

/// Same as `init` but emits JSON lines
pub fn init_json() -> Result<(), TelemetryError> {
    tracing_subscriber::registry()
        .with(fmt::layer().json())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .try_init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails_cleanly() {
        // the first call may lose to another test in this binary
        let _ = init();
        assert!(init().is_err());
        assert!(init_json().is_err());
    }
}
