//! # Structured Logging
//!
//! Subscriber setup and span macros for extraction runs, built on the
//! tracing ecosystem.

use crate::config::ExtractConfig;
use crate::Result;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Create a tracing span for an extraction over one resource collection.
///
/// ```rust,ignore
/// let _span = extract_span!("route_names", listeners.len()).entered();
/// ```
#[macro_export]
macro_rules! extract_span {
    ($operation:expr, $count:expr) => {
        tracing::debug_span!("xds_extract", operation = %$operation, resource_count = $count)
    };
    ($operation:expr, $count:expr, $($field:tt)*) => {
        tracing::debug_span!(
            "xds_extract",
            operation = %$operation,
            resource_count = $count,
            $($field)*
        )
    };
}

/// Install a global fmt subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. A subscriber that is
/// already installed (e.g. by a test harness) is left in place.
pub fn init_logging(config: &ExtractConfig) -> Result<()> {
    config.validate()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));

    let installed = if config.log_json {
        tracing::subscriber::set_global_default(
            FmtSubscriber::builder().with_env_filter(filter).json().finish(),
        )
    } else {
        tracing::subscriber::set_global_default(
            FmtSubscriber::builder().with_env_filter(filter).finish(),
        )
    };

    if installed.is_err() {
        tracing::debug!("global subscriber already set, keeping existing one");
    }

    Ok(())
}

/// Log configuration at startup
pub fn log_config_info(config: &ExtractConfig) {
    tracing::info!(
        log_level = %config.log_level,
        log_json = config.log_json,
        reject_duplicate_names = config.reject_duplicate_names,
        "xDS snapshot extraction configuration"
    );
}
