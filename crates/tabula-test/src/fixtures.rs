//! Test fixtures for common types.

use std::sync::Arc;

use uuid::Uuid;

use tabula_core::{
    ApplicationEnvironment, BuildTableAction, DataSource, ProcessorEnvironment,
    StaticApplicationEnvironment, StaticProcessorEnvironment, TableDescriptor, TableId, Version,
};
use tabula_runtime::{ExportedType, PluginModule, TableDefinition, TypeMarker};

/// Table identity with a GUID built from `n` and version 1.0.0.
#[must_use]
pub fn test_table_id(n: u128) -> TableId {
    TableId::new(Uuid::from_u128(n), Version::initial())
}

/// Data table descriptor named `Table {n}`.
#[must_use]
pub fn test_descriptor(n: u128) -> TableDescriptor {
    TableDescriptor::new(test_table_id(n), format!("Table {n}"))
}

/// `file:///{path}` data source.
///
/// # Panics
///
/// Panics if `path` does not form a valid URI.
#[must_use]
pub fn test_data_source(path: &str) -> DataSource {
    DataSource::from_uri(&format!("file:///{}", path.trim_start_matches('/')))
        .expect("fixture path must form a valid URI")
}

/// Non-interactive application environment named `test-host`.
#[must_use]
pub fn test_application_environment() -> Arc<dyn ApplicationEnvironment> {
    Arc::new(StaticApplicationEnvironment::new("test-host"))
}

/// Processor environment labelled `test-run`.
#[must_use]
pub fn test_processor_environment() -> Arc<dyn ProcessorEnvironment> {
    Arc::new(StaticProcessorEnvironment::new("test-run"))
}

/// A module exporting five tables plus one non-table helper:
///
/// | type | id | kind | rows from |
/// |---|---|---|---|
/// | `CpuUsage` | 1 | data | build action |
/// | `DiskIo` | 2 | data | build action |
/// | `TraceInfo` | 3 | metadata | build action |
/// | `Callstacks` | 4 | data | extensions |
/// | `Markers` | 5 | data | nothing (descriptor only) |
#[must_use]
pub fn sample_module() -> PluginModule {
    let table = |n: u128, type_name: &str, name: &str, category: &str| {
        ExportedType::table(
            type_name,
            TableDefinition::new(test_table_id(n), name).with_category(category),
        )
    };
    let columns = |names: &'static [&'static str]| {
        BuildTableAction::new(move |builder| {
            for name in names {
                builder.add_column(name);
            }
        })
    };

    PluginModule::new("sample")
        .with_type(ExportedType::plain("TraceParser"))
        .with_type(
            table(1, "CpuUsage", "CPU Usage", "Computation")
                .with_marker(TypeMarker::DataTable)
                .with_build(columns(&["cpu", "percent"])),
        )
        .with_type(
            table(2, "DiskIo", "Disk I/O", "Storage").with_build(columns(&["device", "bytes"])),
        )
        .with_type(
            table(3, "TraceInfo", "Trace Info", "System")
                .with_marker(TypeMarker::MetadataTable)
                .with_build(columns(&["key", "value"])),
        )
        .with_type(
            table(4, "Callstacks", "Callstacks", "Computation")
                .with_marker(TypeMarker::RequiresExtensions)
                .with_build(columns(&["frame"])),
        )
        .with_type(table(5, "Markers", "Markers", "System"))
}

/// `Tables.toml` text equivalent to [`sample_module`], with build actions
/// named `cpu_usage`, `disk_io` and `trace_info`.
pub const SAMPLE_MANIFEST: &str = r#"
[module]
name = "sample"

[[table]]
type_name = "CpuUsage"
guid = "00000000-0000-0000-0000-000000000001"
name = "CPU Usage"
category = "Computation"
build = "cpu_usage"

[[table]]
type_name = "DiskIo"
guid = "00000000-0000-0000-0000-000000000002"
name = "Disk I/O"
category = "Storage"
build = "disk_io"

[[table]]
type_name = "TraceInfo"
guid = "00000000-0000-0000-0000-000000000003"
name = "Trace Info"
category = "System"
kind = "metadata"
build = "trace_info"

[[table]]
type_name = "Callstacks"
guid = "00000000-0000-0000-0000-000000000004"
name = "Callstacks"
category = "Computation"
requires_extensions = true

[[table]]
type_name = "Markers"
guid = "00000000-0000-0000-0000-000000000005"
name = "Markers"
category = "System"
"#;
