//! Tracing subscriber setup
//!
//! Library code only emits `tracing` events; binaries and test harnesses
//! call [`init_tracing`] once to decide where they go. The filter honours
//! `RUST_LOG` and defaults to `info` with debug output for SchoolHub crates.

use schoolhub_domain::{Result, SchoolHubError};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,schoolhub_core=debug,schoolhub_infra=debug";

/// Output format of the global subscriber
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

impl LogFormat {
    /// Read the format from `SCHOOLHUB_LOG_FORMAT` (`json` or anything else).
    pub fn from_env() -> Self {
        match std::env::var("SCHOOLHUB_LOG_FORMAT") {
            Ok(value) if value.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Pretty,
        }
    }
}

/// Install the global tracing subscriber.
///
/// # Errors
/// Returns `Internal` when a global subscriber is already installed.
pub fn init_tracing(format: LogFormat) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    let installed = match format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    installed.map_err(|e| SchoolHubError::Internal(format!("tracing already initialised: {e}")))
}
