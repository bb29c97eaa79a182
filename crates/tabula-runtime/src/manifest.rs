//! `Tables.toml` manifests.
//!
//! A manifest declares a module's table types in TOML so plugins that do not
//! link against Tabula can still describe their tables. Build entry points
//! cannot live in TOML; they are registered by name in a
//! [`BuildActionRegistry`] and referenced from the manifest.
//!
//! ```toml
//! [module]
//! name = "sched-plugin"
//!
//! [[table]]
//! type_name = "ContextSwitches"
//! guid = "6b1c7e5e-3b0f-4cde-9b41-1e4a1f3c9a10"
//! version = "1.0.0"
//! name = "Context Switches"
//! category = "Scheduling"
//! build = "context_switches"
//!
//! [[table]]
//! type_name = "Summary"
//! guid = "2f0e8d1a-0c55-4d0f-8a43-7d5e0e2b6c21"
//! name = "Trace Summary"
//! kind = "metadata"
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use tabula_core::{
    BuildTableAction, ProcessingError, ProcessingResult, TableId, TableKind, Version,
};

use crate::module::{ExportedType, PluginModule, TableDefinition, TypeMarker};

/// Standard table manifest file name.
pub const MANIFEST_FILE_NAME: &str = "Tables.toml";

/// A module manifest loaded from `Tables.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleManifest {
    /// Module identity.
    pub module: ModuleDef,
    /// Table types exported by the module.
    #[serde(default, rename = "table")]
    pub tables: Vec<TableDef>,
}

/// Module identity metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleDef {
    /// Module name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// One table type declared in a manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableDef {
    /// Name the type is exported under.
    pub type_name: String,
    /// Identity GUID.
    pub guid: Uuid,
    /// Identity version.
    #[serde(default = "Version::initial")]
    pub version: Version,
    /// Display name.
    pub name: String,
    /// Display description.
    #[serde(default)]
    pub description: String,
    /// Display category.
    #[serde(default)]
    pub category: String,
    /// Classification; data when omitted.
    pub kind: Option<TableKind>,
    /// Whether the extension pipeline produces the rows.
    #[serde(default)]
    pub requires_extensions: bool,
    /// Name of a build action in the [`BuildActionRegistry`].
    pub build: Option<String>,
}

impl ModuleManifest {
    /// Parse a manifest from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessingError::ManifestParse`] if the TOML is invalid.
    pub fn from_toml_str(content: &str) -> ProcessingResult<Self> {
        toml::from_str(content).map_err(|e| ProcessingError::ManifestParse {
            path: PathBuf::from("<inline>"),
            message: e.to_string(),
        })
    }

    /// Turn the manifest into a [`PluginModule`], binding build actions by
    /// name.
    ///
    /// An unknown build name is logged and leaves the table without a build
    /// entry point.
    #[must_use]
    pub fn into_module(self, actions: &BuildActionRegistry) -> PluginModule {
        let mut module = PluginModule::new(self.module.name);
        for table in self.tables {
            let definition = TableDefinition::new(
                TableId::new(table.guid, table.version),
                table.name,
            )
            .with_description(table.description)
            .with_category(table.category);

            let classification = match table.kind.unwrap_or_default() {
                TableKind::Data => TypeMarker::DataTable,
                TableKind::Metadata => TypeMarker::MetadataTable,
            };
            let mut export =
                ExportedType::table(table.type_name, definition).with_marker(classification);
            if table.requires_extensions {
                export = export.with_marker(TypeMarker::RequiresExtensions);
            }
            if let Some(build) = table.build {
                match actions.get(&build) {
                    Some(action) => export = export.with_build(action.clone()),
                    None => warn!(
                        module = module.name(),
                        type_name = export.type_name(),
                        build = %build,
                        "Manifest references an unregistered build action"
                    ),
                }
            }
            module.export(export);
        }
        module
    }
}

/// Build entry points registered by name for manifest-declared tables.
#[derive(Debug, Clone, Default)]
pub struct BuildActionRegistry {
    actions: HashMap<String, BuildTableAction>,
}

impl BuildActionRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an action, replacing any previous one with the same name.
    pub fn register(&mut self, name: impl Into<String>, action: BuildTableAction) {
        self.actions.insert(name.into(), action);
    }

    /// Builder-style [`register`](Self::register).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, action: BuildTableAction) -> Self {
        self.register(name, action);
        self
    }

    /// Look up an action.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&BuildTableAction> {
        self.actions.get(name)
    }

    /// Number of registered actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Load a single manifest from a TOML file.
///
/// # Errors
///
/// Returns [`ProcessingError::ManifestParse`] if the file cannot be read or
/// parsed.
pub fn load_manifest(path: &Path) -> ProcessingResult<ModuleManifest> {
    let content = std::fs::read_to_string(path).map_err(|e| ProcessingError::ManifestParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    toml::from_str(&content).map_err(|e| ProcessingError::ManifestParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load every manifest in `dir`.
///
/// Picks up a `Tables.toml` directly inside `dir` and one level of
/// subdirectories containing a `Tables.toml`. Manifests that fail to parse
/// are logged and skipped. Results are sorted by path.
///
/// # Errors
///
/// Returns [`ProcessingError::ManifestParse`] if `dir` cannot be listed.
pub fn load_manifests_from_dir(dir: &Path) -> ProcessingResult<Vec<(ModuleManifest, PathBuf)>> {
    let listing_error = |e: std::io::Error| ProcessingError::ManifestParse {
        path: dir.to_path_buf(),
        message: e.to_string(),
    };

    let mut candidates = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(listing_error)? {
        let path = entry.map_err(listing_error)?.path();
        if path.is_dir() {
            let nested = path.join(MANIFEST_FILE_NAME);
            if nested.is_file() {
                candidates.push(nested);
            }
        } else if path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n == MANIFEST_FILE_NAME)
        {
            candidates.push(path);
        }
    }
    candidates.sort();

    let mut manifests = Vec::with_capacity(candidates.len());
    for path in candidates {
        match load_manifest(&path) {
            Ok(manifest) => {
                debug!(
                    path = %path.display(),
                    module = %manifest.module.name,
                    tables = manifest.tables.len(),
                    "Loaded table manifest"
                );
                manifests.push((manifest, path));
            },
            Err(e) => warn!(path = %path.display(), error = %e, "Failed to load table manifest"),
        }
    }

    info!(dir = %dir.display(), count = manifests.len(), "Discovered table manifests");
    Ok(manifests)
}
