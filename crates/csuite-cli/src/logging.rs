//! Logging setup for the CLI.
//!
//! # Design
//! - One entry point installing a fmt subscriber (pretty or JSON) with an
//!   `EnvFilter`, writing to stderr so stdout stays clean for command
//!   output (notably `env export`).

use std::io;

use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default logging target when `RUST_LOG` is not provided.
pub(crate) const DEFAULT_LOG_LEVEL: &str = "warn";

/// Available output formats for the logger.
#[derive(Debug, Clone, Copy)]
pub(crate) enum LogFormat {
    /// Emit logs as structured JSON objects.
    Json,
    /// Emit human-readable logs.
    Pretty,
}

impl LogFormat {
    /// Choose a sensible default for the current build.
    #[must_use]
    pub(crate) const fn infer() -> Self {
        if cfg!(debug_assertions) {
            Self::Pretty
        } else {
            Self::Json
        }
    }
}

/// Configure and install the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if a subscriber has already been installed globally.
pub(crate) fn init_logging(format: LogFormat) -> Result<()> {
    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(build_env_filter())
            .with(
                fmt::layer()
                    .json()
                    .with_target(false)
                    .with_writer(io::stderr),
            )
            .try_init()
            .map_err(|err| anyhow!("failed to install tracing subscriber: {err}")),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(build_env_filter())
            .with(fmt::layer().with_target(false).with_writer(io::stderr))
            .try_init()
            .map_err(|err| anyhow!("failed to install tracing subscriber: {err}")),
    }
}

fn build_env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}
