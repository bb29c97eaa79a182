//! Post-merge configuration validation.

use crate::error::{ConfigError, ConfigResult};
use crate::types::Config;

/// Accepted `logging.level` values.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Accepted `logging.format` values.
pub const LOG_FORMATS: [&str; 4] = ["pretty", "compact", "json", "full"];

/// Validate a merged configuration.
///
/// # Errors
///
/// Returns the first [`ConfigError::Validation`] found.
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_logging(config)?;
    validate_discovery(config)?;
    Ok(())
}

fn validate_logging(config: &Config) -> ConfigResult<()> {
    let logging = &config.logging;
    if !LOG_LEVELS.contains(&logging.level.as_str()) {
        return Err(ConfigError::Validation {
            field: "logging.level".to_owned(),
            message: format!(
                "unsupported log level '{}'; expected one of: {}",
                logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if !LOG_FORMATS.contains(&logging.format.as_str()) {
        return Err(ConfigError::Validation {
            field: "logging.format".to_owned(),
            message: format!(
                "unsupported log format '{}'; expected one of: {}",
                logging.format,
                LOG_FORMATS.join(", ")
            ),
        });
    }

    if let Some(empty) = logging.directives.iter().position(|d| d.trim().is_empty()) {
        return Err(ConfigError::Validation {
            field: format!("logging.directives[{empty}]"),
            message: "directive must not be empty".to_owned(),
        });
    }

    Ok(())
}

fn validate_discovery(config: &Config) -> ConfigResult<()> {
    if let Some(empty) = config
        .discovery
        .manifest_dirs
        .iter()
        .position(|d| d.as_os_str().is_empty())
    {
        return Err(ConfigError::Validation {
            field: format!("discovery.manifest_dirs[{empty}]"),
            message: "manifest directory must not be empty".to_owned(),
        });
    }
    Ok(())
}
