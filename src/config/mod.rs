//! # Configuration Management
//!
//! Settings for snapshot extraction: logging output and how strictly
//! duplicate resource names are treated.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use validator::Validate;

/// Environment variable for the default log level
pub const LOG_LEVEL_ENV: &str = "XDSTEST_LOG_LEVEL";

/// Environment variable toggling JSON log output
pub const LOG_JSON_ENV: &str = "XDSTEST_LOG_JSON";

/// Environment variable enabling strict duplicate-name validation
pub const REJECT_DUPLICATES_ENV: &str = "XDSTEST_REJECT_DUPLICATE_NAMES";

/// Extraction configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ExtractConfig {
    /// Log level (trace, debug, info, warn, error)
    #[validate(length(min = 1, message = "Log level cannot be empty"))]
    pub log_level: String,

    /// Emit logs as JSON lines
    pub log_json: bool,

    /// Fail snapshot validation when two resources of one kind share a name.
    /// Index construction itself always keeps the later resource.
    pub reject_duplicate_names: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self { log_level: "info".to_string(), log_json: false, reject_duplicate_names: false }
    }
}

impl ExtractConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let log_level = std::env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| "info".to_string());
        let log_json = parse_bool_env(LOG_JSON_ENV)?;
        let reject_duplicate_names = parse_bool_env(REJECT_DUPLICATES_ENV)?;

        let config = Self { log_level, log_json, reject_duplicate_names };
        config.validate()?;
        Ok(config)
    }

    /// Validate field constraints and that the log level is recognised
    pub fn validate(&self) -> Result<()> {
        Validate::validate(self).map_err(Error::from)?;

        tracing::Level::from_str(&self.log_level)
            .map_err(|_| Error::config(format!("Invalid log level: {}", self.log_level)))?;

        Ok(())
    }
}

fn parse_bool_env(name: &str) -> Result<bool> {
    match std::env::var(name) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" | "" => Ok(false),
            other => Err(Error::config(format!("Invalid boolean for {}: {}", name, other))),
        },
        Err(_) => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Serializes tests that modify process environment
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var(LOG_LEVEL_ENV);
        env::remove_var(LOG_JSON_ENV);
        env::remove_var(REJECT_DUPLICATES_ENV);
    }

    #[test]
    fn test_default_config() {
        let config = ExtractConfig::default();
        assert_eq!(config.log_level, "info");
        assert!(!config.log_json);
        assert!(!config.reject_duplicate_names);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_env() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var(LOG_LEVEL_ENV, "debug");
        env::set_var(LOG_JSON_ENV, "true");
        env::set_var(REJECT_DUPLICATES_ENV, "1");

        let config = ExtractConfig::from_env().unwrap();
        assert_eq!(config.log_level, "debug");
        assert!(config.log_json);
        assert!(config.reject_duplicate_names);

        clear_env();
    }

    #[test]
    fn test_config_from_env_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();

        let config = ExtractConfig::from_env().unwrap();
        assert_eq!(config.log_level, "info");
        assert!(!config.reject_duplicate_names);
    }

    #[test]
    fn test_config_from_env_invalid_bool() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var(REJECT_DUPLICATES_ENV, "maybe");

        let result = ExtractConfig::from_env();
        assert!(matches!(result, Err(Error::Config(_))));

        clear_env();
    }

    #[test]
    fn test_invalid_log_level() {
        let config = ExtractConfig { log_level: "loud".to_string(), ..Default::default() };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_empty_log_level_fails_validation() {
        let config = ExtractConfig { log_level: String::new(), ..Default::default() };
        assert!(matches!(config.validate(), Err(Error::Validation(_))));
    }
}
