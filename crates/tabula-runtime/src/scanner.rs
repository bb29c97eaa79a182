//! Table discovery over a plugin module.
//!
//! The scanner is permissive: types that do not declare a table are
//! ignored, and malformed table declarations are logged and skipped rather
//! than failing discovery. Deduplication is the caller's job.

use tracing::{debug, warn};

use tabula_core::{BuildTableAction, TableDescriptor, TableKind};

use crate::module::{ExportedType, PluginModule, TypeMarker};

/// One table found by the scanner, with its build entry point kept apart.
#[derive(Debug, Clone)]
pub struct ScannedTable {
    /// Descriptor without a build action attached.
    pub descriptor: TableDescriptor,
    /// Build entry point, absent for extension-backed and descriptor-only
    /// tables.
    pub build_action: Option<BuildTableAction>,
    /// Name the declaring type was exported under.
    pub type_name: String,
}

impl ScannedTable {
    /// Fold the build action into the descriptor.
    #[must_use]
    pub fn into_descriptor(self) -> TableDescriptor {
        match self.build_action {
            Some(action) => self.descriptor.with_build_action(action),
            None => self.descriptor,
        }
    }
}

/// Classifies a module's exported types into table descriptors.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableScanner;

impl TableScanner {
    /// Create a scanner.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Scan every exported type of `module`.
    ///
    /// Output follows declaration order and keeps duplicates.
    #[must_use]
    pub fn scan(&self, module: &PluginModule) -> Vec<ScannedTable> {
        let tables: Vec<ScannedTable> = module
            .exported_types()
            .iter()
            .filter_map(|export| Self::classify(module.name(), export))
            .collect();

        debug!(
            module = module.name(),
            exported = module.exported_types().len(),
            tables = tables.len(),
            "Scanned plugin module"
        );
        tables
    }

    fn classify(module: &str, export: &ExportedType) -> Option<ScannedTable> {
        let type_name = export.type_name();
        if !export.has_marker(TypeMarker::Table) {
            return None;
        }

        let is_data = export.has_marker(TypeMarker::DataTable);
        let is_metadata = export.has_marker(TypeMarker::MetadataTable);
        if is_data && is_metadata {
            warn!(
                module,
                type_name, "Table type declares both data and metadata markers; skipping"
            );
            return None;
        }

        let Some(definition) = export.definition() else {
            warn!(module, type_name, "Table type has no table definition; skipping");
            return None;
        };
        if definition.name.trim().is_empty() {
            warn!(
                module,
                type_name,
                table_id = %definition.id,
                "Table type has an empty name; skipping"
            );
            return None;
        }

        let kind = if is_metadata {
            TableKind::Metadata
        } else {
            TableKind::Data
        };
        let mut descriptor = TableDescriptor::new(definition.id, definition.name.clone())
            .with_description(definition.description.clone())
            .with_category(definition.category.clone())
            .with_kind(kind);

        let build_action = if export.has_marker(TypeMarker::RequiresExtensions) {
            descriptor = descriptor.requiring_extensions();
            if export.build().is_some() {
                debug!(
                    module,
                    type_name,
                    table_id = %definition.id,
                    "Ignoring build entry point of extension-backed table"
                );
            }
            None
        } else {
            let action = export.build().cloned();
            if action.is_none() {
                debug!(
                    module,
                    type_name,
                    table_id = %definition.id,
                    "Table has neither a build entry point nor an extension dependency"
                );
            }
            action
        };

        Some(ScannedTable {
            descriptor,
            build_action,
            type_name: type_name.to_string(),
        })
    }
}
