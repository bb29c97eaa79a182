//! Configuration struct definitions.
//!
//! Every section implements [`Default`] with the same values as the
//! embedded `defaults.toml`, so partially specified files deserialize.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging level, format and per-crate directives.
    pub logging: LoggingSection,
    /// Where table manifests are looked for.
    pub discovery: DiscoverySection,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Global level filter (`"trace"`, `"debug"`, `"info"`, `"warn"`,
    /// `"error"`).
    pub level: String,
    /// `"pretty"`, `"compact"`, `"json"` or `"full"`.
    pub format: String,
    /// Per-crate directives such as `tabula_runtime=debug`.
    pub directives: Vec<String>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: "compact".to_owned(),
            directives: Vec::new(),
        }
    }
}

/// Table manifest discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoverySection {
    /// Directories searched for `Tables.toml` manifests.
    pub manifest_dirs: Vec<PathBuf>,
    /// Also search immediate subdirectories.
    pub recursive: bool,
}

impl Default for DiscoverySection {
    fn default() -> Self {
        Self {
            manifest_dirs: Vec::new(),
            recursive: true,
        }
    }
}
