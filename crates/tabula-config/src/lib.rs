//! Tabula Config - layered configuration for Tabula hosts.
//!
//! ```rust,no_run
//! use tabula_config::Config;
//!
//! let resolved = Config::load(Some(std::path::Path::new("."))).unwrap();
//! println!("log level: {}", resolved.config.logging.level);
//! ```
//!
//! # Precedence
//!
//! From highest to lowest:
//!
//! 1. `TABULA_LOG_LEVEL`, `TABULA_LOG_FORMAT`, `TABULA_MANIFEST_DIRS`
//! 2. Workspace (`{workspace}/.tabula/config.toml`)
//! 3. User (`{config_dir}/tabula/config.toml`)
//! 4. Embedded defaults
//!
//! Tables merge per key; scalars and arrays replace.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

/// Configuration error types.
pub mod error;
/// Configuration file discovery and loading.
pub mod loader;
/// Layer merging.
pub mod merge;
/// Configuration struct definitions.
pub mod types;
/// Configuration validation rules.
pub mod validate;

pub use error::{ConfigError, ConfigResult};
pub use loader::ResolvedConfig;
pub use types::*;

impl Config {
    /// Load configuration with the full precedence chain.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any config file is malformed or the
    /// merged configuration fails validation.
    pub fn load(workspace_root: Option<&std::path::Path>) -> ConfigResult<ResolvedConfig> {
        loader::load(workspace_root)
    }

    /// Load a single file over the built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read or parsed, or
    /// fails validation.
    pub fn load_file(path: &std::path::Path) -> ConfigResult<Self> {
        loader::load_file(path)
    }

    /// Parse and validate TOML text.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the text is malformed or invalid.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: "<inline>".to_owned(),
            source: e,
        })?;
        validate::validate(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_toml_str_fills_defaults() {
        let config = Config::from_toml_str("[discovery]\nrecursive = false\n").unwrap();
        assert!(!config.discovery.recursive);
        assert_eq!(config.logging, LoggingSection::default());
    }

    #[test]
    fn test_from_toml_str_validates() {
        let err = Config::from_toml_str("[logging]\nlevel = \"loud\"\n").unwrap_err();
        assert!(err.to_string().contains("logging.level"));
    }
}
