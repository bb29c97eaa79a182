//! Plugin modules: the explicit list of types a plugin exports.
//!
//! Hosts cannot introspect plugin binaries, so a plugin registers each type
//! it exports together with the markers the scanner classifies it by.

use std::any;

use tabula_core::{BuildTableAction, TableId, TableKind};

/// Declaration marker carried by an exported type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeMarker {
    /// The type declares a table.
    Table,
    /// The table carries primary analysis output.
    DataTable,
    /// The table carries catalog or summary information.
    MetadataTable,
    /// The table's rows come from the shared extension pipeline.
    RequiresExtensions,
}

/// Identity and display metadata a table type declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDefinition {
    /// Globally unique identity.
    pub id: TableId,
    /// Display name.
    pub name: String,
    /// Display description.
    pub description: String,
    /// Display category.
    pub category: String,
}

impl TableDefinition {
    /// Definition with empty description and category.
    #[must_use]
    pub fn new(id: TableId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            category: String::new(),
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }
}

/// Compile-time table declaration.
///
/// ```rust
/// use tabula_core::{BuildTableAction, TableBuilder, TableId, Version};
/// use tabula_runtime::{PluginModule, TableDefinition, TableType};
/// use uuid::Uuid;
///
/// struct CpuTable;
///
/// impl CpuTable {
///     fn build(builder: &mut dyn TableBuilder) {
///         builder.add_column("cpu");
///     }
/// }
///
/// impl TableType for CpuTable {
///     fn definition() -> TableDefinition {
///         TableDefinition::new(TableId::new(Uuid::from_u128(1), Version::initial()), "CPU")
///     }
///
///     fn build_action() -> Option<BuildTableAction> {
///         Some(BuildTableAction::new(Self::build))
///     }
/// }
///
/// let module = PluginModule::new("cpu-plugin").with_table::<CpuTable>();
/// assert_eq!(module.exported_types().len(), 1);
/// ```
pub trait TableType: 'static {
    /// Identity and display metadata.
    fn definition() -> TableDefinition;

    /// Data or metadata classification.
    fn kind() -> TableKind {
        TableKind::Data
    }

    /// Whether the extension pipeline produces this table's rows.
    fn requires_extensions() -> bool {
        false
    }

    /// The build entry point, if the type has one.
    fn build_action() -> Option<BuildTableAction> {
        None
    }
}

/// One type exported by a plugin module.
#[derive(Debug, Clone)]
pub struct ExportedType {
    type_name: String,
    markers: Vec<TypeMarker>,
    definition: Option<TableDefinition>,
    build: Option<BuildTableAction>,
}

impl ExportedType {
    /// A type with no markers (helpers, processors, anything not a table).
    #[must_use]
    pub fn plain(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            markers: Vec::new(),
            definition: None,
            build: None,
        }
    }

    /// A type carrying the [`TypeMarker::Table`] marker and a definition.
    #[must_use]
    pub fn table(type_name: impl Into<String>, definition: TableDefinition) -> Self {
        Self {
            type_name: type_name.into(),
            markers: vec![TypeMarker::Table],
            definition: Some(definition),
            build: None,
        }
    }

    /// The export for a [`TableType`] implementation.
    #[must_use]
    pub fn of<T: TableType>() -> Self {
        let classification = match T::kind() {
            TableKind::Data => TypeMarker::DataTable,
            TableKind::Metadata => TypeMarker::MetadataTable,
        };
        let mut export = Self::table(any::type_name::<T>(), T::definition())
            .with_marker(classification);
        if T::requires_extensions() {
            export = export.with_marker(TypeMarker::RequiresExtensions);
        }
        match T::build_action() {
            Some(action) => export.with_build(action),
            None => export,
        }
    }

    /// Add a marker.
    #[must_use]
    pub fn with_marker(mut self, marker: TypeMarker) -> Self {
        self.markers.push(marker);
        self
    }

    /// Register the build entry point.
    #[must_use]
    pub fn with_build(mut self, action: BuildTableAction) -> Self {
        self.build = Some(action);
        self
    }

    /// Name the type was exported under.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Markers in declaration order.
    #[must_use]
    pub fn markers(&self) -> &[TypeMarker] {
        &self.markers
    }

    /// Whether the type carries `marker`.
    #[must_use]
    pub fn has_marker(&self, marker: TypeMarker) -> bool {
        self.markers.contains(&marker)
    }

    /// The table definition, for table types.
    #[must_use]
    pub fn definition(&self) -> Option<&TableDefinition> {
        self.definition.as_ref()
    }

    /// The registered build entry point.
    #[must_use]
    pub fn build(&self) -> Option<&BuildTableAction> {
        self.build.as_ref()
    }
}

/// Everything one plugin exports, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct PluginModule {
    name: String,
    types: Vec<ExportedType>,
}

impl PluginModule {
    /// Empty module.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            types: Vec::new(),
        }
    }

    /// Add an exported type.
    #[must_use]
    pub fn with_type(mut self, export: ExportedType) -> Self {
        self.types.push(export);
        self
    }

    /// Add a [`TableType`].
    #[must_use]
    pub fn with_table<T: TableType>(self) -> Self {
        self.with_type(ExportedType::of::<T>())
    }

    /// Add an exported type in place.
    pub fn export(&mut self, export: ExportedType) {
        self.types.push(export);
    }

    /// Module name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Exported types in declaration order.
    #[must_use]
    pub fn exported_types(&self) -> &[ExportedType] {
        &self.types
    }
}

#[cfg(test)]
mod tests {
    use tabula_core::Version;
    use uuid::Uuid;

    use super::*;

    struct Summary;

    impl TableType for Summary {
        fn definition() -> TableDefinition {
            TableDefinition::new(TableId::new(Uuid::from_u128(1), Version::initial()), "Summary")
                .with_category("System")
        }

        fn kind() -> TableKind {
            TableKind::Metadata
        }
    }

    struct Joined;

    impl TableType for Joined {
        fn definition() -> TableDefinition {
            TableDefinition::new(TableId::new(Uuid::from_u128(2), Version::initial()), "Joined")
        }

        fn requires_extensions() -> bool {
            true
        }

        fn build_action() -> Option<BuildTableAction> {
            Some(BuildTableAction::new(|_| {}))
        }
    }

    #[test]
    fn test_export_of_table_type() {
        let export = ExportedType::of::<Summary>();
        assert!(export.type_name().ends_with("Summary"));
        assert_eq!(
            export.markers(),
            [TypeMarker::Table, TypeMarker::MetadataTable]
        );
        assert_eq!(export.definition().unwrap().category, "System");
        assert!(export.build().is_none());

        let joined = ExportedType::of::<Joined>();
        assert!(joined.has_marker(TypeMarker::DataTable));
        assert!(joined.has_marker(TypeMarker::RequiresExtensions));
        assert!(joined.build().is_some());
    }

    #[test]
    fn test_module_keeps_declaration_order() {
        let mut module = PluginModule::new("demo")
            .with_type(ExportedType::plain("Helper"))
            .with_table::<Summary>();
        module.export(ExportedType::of::<Joined>());

        let names: Vec<_> = module
            .exported_types()
            .iter()
            .map(|t| t.type_name().rsplit("::").next().unwrap_or_default())
            .collect();
        assert_eq!(names, ["Helper", "Summary", "Joined"]);
        assert_eq!(module.name(), "demo");
    }
}
