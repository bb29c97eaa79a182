//! Config file discovery and layered loading.
//!
//! Layers, lowest precedence first:
//! 1. Embedded `defaults.toml`
//! 2. User file (`{config_dir}/tabula/config.toml`)
//! 3. Workspace file (`{workspace}/.tabula/config.toml`)
//! 4. `TABULA_*` environment variables
//!
//! The merged tree is deserialized into [`Config`] and validated.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{ConfigError, ConfigResult};
use crate::merge::deep_merge;
use crate::types::Config;
use crate::validate;

/// Embedded default configuration.
const DEFAULTS_TOML: &str = include_str!("defaults.toml");

/// Maximum accepted config file size (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1_048_576;

/// Overrides `logging.level`.
pub const ENV_LOG_LEVEL: &str = "TABULA_LOG_LEVEL";
/// Overrides `logging.format`.
pub const ENV_LOG_FORMAT: &str = "TABULA_LOG_FORMAT";
/// Overrides `discovery.manifest_dirs`; a platform path list.
pub const ENV_MANIFEST_DIRS: &str = "TABULA_MANIFEST_DIRS";

/// A loaded configuration and the files that contributed to it.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedConfig {
    /// The merged, validated configuration.
    pub config: Config,
    /// Files merged over the defaults, in merge order.
    pub loaded_files: Vec<PathBuf>,
}

impl ResolvedConfig {
    /// Render the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SerializeError`] if rendering fails.
    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(&self.config)?)
    }
}

/// Load configuration for `workspace_root` from the standard locations and
/// the process environment.
///
/// # Errors
///
/// Returns a [`ConfigError`] if a config file is malformed or the merged
/// configuration fails validation.
pub fn load(workspace_root: Option<&Path>) -> ConfigResult<ResolvedConfig> {
    let env: HashMap<String, String> = std::env::vars()
        .filter(|(k, _)| k.starts_with("TABULA_"))
        .collect();
    load_with(workspace_root, user_config_path().as_deref(), &env)
}

/// Load configuration from explicit layer sources.
///
/// `user_config` replaces the standard user file location; `None` skips the
/// user layer.
///
/// # Errors
///
/// Returns a [`ConfigError`] if a config file is malformed or the merged
/// configuration fails validation.
pub fn load_with(
    workspace_root: Option<&Path>,
    user_config: Option<&Path>,
    env: &HashMap<String, String>,
) -> ConfigResult<ResolvedConfig> {
    let mut merged: toml::Value =
        toml::from_str(DEFAULTS_TOML).map_err(|e| ConfigError::ParseError {
            path: "<embedded defaults>".to_owned(),
            source: e,
        })?;
    let mut loaded_files = Vec::new();

    if let Some(path) = user_config
        && let Some(overlay) = try_load_file(path)?
    {
        deep_merge(&mut merged, &overlay);
        info!(path = %path.display(), "loaded user config");
        loaded_files.push(path.to_path_buf());
    }

    if let Some(root) = workspace_root {
        let path = root.join(".tabula").join("config.toml");
        if let Some(overlay) = try_load_file(&path)? {
            deep_merge(&mut merged, &overlay);
            info!(path = %path.display(), "loaded workspace config");
            loaded_files.push(path);
        }
    }

    let overridden = apply_env_overrides(&mut merged, env);
    if overridden > 0 {
        debug!(count = overridden, "applied environment variable overrides");
    }

    let config: Config = merged
        .try_into()
        .map_err(|e: toml::de::Error| ConfigError::ParseError {
            path: "<merged config>".to_owned(),
            source: e,
        })?;
    validate::validate(&config)?;

    Ok(ResolvedConfig {
        config,
        loaded_files,
    })
}

/// Load a single file over the built-in defaults, without other layers.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the file cannot be read or parsed, or fails
/// validation.
pub fn load_file(path: &Path) -> ConfigResult<Config> {
    let content = read_limited(path)?;
    let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
        path: path.display().to_string(),
        source: e,
    })?;
    validate::validate(&config)?;
    Ok(config)
}

/// Standard user config location, if the platform has a config directory.
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.config_dir().join("tabula").join("config.toml"))
}

/// Read a file, returning `None` if it does not exist.
fn try_load_file(path: &Path) -> ConfigResult<Option<toml::Value>> {
    let content = match read_limited(path) {
        Ok(c) => c,
        Err(ConfigError::ReadError { source, .. })
            if source.kind() == std::io::ErrorKind::NotFound =>
        {
            debug!(path = %path.display(), "config file not found, skipping");
            return Ok(None);
        },
        Err(e) => return Err(e),
    };

    let value = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(Some(value))
}

fn read_limited(path: &Path) -> ConfigResult<String> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    let size = u64::try_from(content.len()).unwrap_or(u64::MAX);
    if size > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::Validation {
            field: path.display().to_string(),
            message: format!(
                "config file is {size} bytes, exceeding the {MAX_CONFIG_FILE_SIZE} byte limit"
            ),
        });
    }
    Ok(content)
}

/// Write `TABULA_*` overrides into the merged tree. Returns how many were
/// applied.
fn apply_env_overrides(merged: &mut toml::Value, env: &HashMap<String, String>) -> usize {
    let mut applied = 0usize;

    if let Some(level) = env.get(ENV_LOG_LEVEL) {
        set_field(merged, "logging", "level", toml::Value::String(level.to_lowercase()));
        applied = applied.saturating_add(1);
    }
    if let Some(format) = env.get(ENV_LOG_FORMAT) {
        set_field(merged, "logging", "format", toml::Value::String(format.to_lowercase()));
        applied = applied.saturating_add(1);
    }
    if let Some(dirs) = env.get(ENV_MANIFEST_DIRS) {
        let dirs = std::env::split_paths(dirs)
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| toml::Value::String(p.display().to_string()))
            .collect();
        set_field(merged, "discovery", "manifest_dirs", toml::Value::Array(dirs));
        applied = applied.saturating_add(1);
    }

    applied
}

fn set_field(root: &mut toml::Value, section: &str, key: &str, value: toml::Value) {
    let Some(root) = root.as_table_mut() else {
        return;
    };
    let section = root
        .entry(section)
        .or_insert_with(|| toml::Value::Table(toml::map::Map::new()));
    if let Some(table) = section.as_table_mut() {
        table.insert(key.to_owned(), value);
    }
}
