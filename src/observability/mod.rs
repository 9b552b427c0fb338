//! # Observability
//!
//! Structured logging for snapshot extraction.

pub mod logging;

pub use logging::{init_logging, log_config_info};
