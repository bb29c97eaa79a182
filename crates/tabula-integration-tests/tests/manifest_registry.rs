//! Manifest-declared modules, configuration-driven discovery and the
//! processing source registry.

mod common;

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use tabula_config::loader::{ENV_MANIFEST_DIRS, load_with};
use tabula_core::{BuildTableAction, ProcessingError, RowTableBuilder};
use tabula_runtime::manifest::load_manifests_from_dir;
use tabula_runtime::{
    BuildActionRegistry, MANIFEST_FILE_NAME, ProcessingSource, ProcessingSourceRegistry,
};
use tabula_test::{
    MockPlugin, SAMPLE_MANIFEST, sample_module, test_application_environment, test_data_source,
    test_descriptor, test_table_id,
};

use common::{bound_source_for, id_set};

fn actions() -> BuildActionRegistry {
    let column = |name: &'static str| BuildTableAction::new(move |b| b.add_column(name));
    BuildActionRegistry::new()
        .with("cpu_usage", column("cpu"))
        .with("disk_io", column("device"))
        .with("trace_info", column("key"))
}

#[test]
fn test_manifest_module_matches_code_module() {
    let dir = tempfile::tempdir().unwrap();
    let plugin_dir = dir.path().join("sample");
    std::fs::create_dir(&plugin_dir).unwrap();
    std::fs::write(plugin_dir.join(MANIFEST_FILE_NAME), SAMPLE_MANIFEST).unwrap();

    let mut manifests = load_manifests_from_dir(dir.path()).unwrap();
    assert_eq!(manifests.len(), 1);
    let (manifest, path) = manifests.remove(0);
    assert_eq!(path, plugin_dir.join(MANIFEST_FILE_NAME));

    let (from_manifest, _) = bound_source_for("manifest", manifest.into_module(&actions()));
    let (from_code, _) = bound_source_for("code", sample_module());

    let manifest_catalog = from_manifest.all_tables().unwrap();
    assert_eq!(id_set(&manifest_catalog), id_set(&from_code.all_tables().unwrap()));
    assert_eq!(manifest_catalog.metadata_tables().count(), 1);
    assert_eq!(manifest_catalog.extension_tables().count(), 1);

    let mut builder = RowTableBuilder::new();
    from_manifest.build_table(&test_table_id(2), &mut builder).unwrap();
    assert_eq!(builder.columns(), ["device"]);
    assert!(matches!(
        from_manifest.build_table(&test_table_id(5), &mut builder),
        Err(ProcessingError::NoBuildAction(_))
    ));
}

#[test]
fn test_configured_manifest_dirs_drive_discovery() {
    let dir = tempfile::tempdir().unwrap();
    let plugins = dir.path().join("plugins");
    std::fs::create_dir_all(plugins.join("sample")).unwrap();
    std::fs::write(plugins.join("sample").join(MANIFEST_FILE_NAME), SAMPLE_MANIFEST).unwrap();

    let env = HashMap::from([(ENV_MANIFEST_DIRS.to_owned(), plugins.display().to_string())]);
    let config = load_with(Some(dir.path()), None, &env).unwrap().config;
    assert_eq!(config.discovery.manifest_dirs, [plugins.clone()]);

    let tables: usize = config
        .discovery
        .manifest_dirs
        .iter()
        .flat_map(|d| load_manifests_from_dir(d).unwrap())
        .map(|(m, _)| m.tables.len())
        .sum();
    assert_eq!(tables, 5);
}

#[test]
fn test_registry_routes_data_sources_and_lists_tables() {
    let mut registry = ProcessingSourceRegistry::new();
    let etl = Arc::new(ProcessingSource::new(
        Box::new(MockPlugin::new("etl").with_supported_extension("etl")),
        sample_module(),
    ));
    let csv = Arc::new(ProcessingSource::with_provider(
        Box::new(MockPlugin::new("csv").with_supported_extension("csv")),
        Box::new(tabula_runtime::StaticTableProvider::new(vec![test_descriptor(1)])),
    ));
    registry
        .register(Arc::clone(&etl), test_application_environment())
        .unwrap();
    registry
        .register(Arc::clone(&csv), test_application_environment())
        .unwrap();

    let matches = registry.sources_for(&test_data_source("trace.etl"));
    assert_eq!(matches.len(), 1);
    assert!(Arc::ptr_eq(matches[0], &etl));
    assert!(registry.sources_for(&test_data_source("trace.json")).is_empty());

    // Identity 1 appears once per source; catalogs are per source.
    let tables = registry.all_tables();
    assert_eq!(tables.len(), 6);
    assert_eq!(
        tables.iter().filter(|(_, t)| t.id() == test_table_id(1)).count(),
        2
    );
}

#[test]
fn test_registry_reports_which_plugin_failed() {
    let mut registry = ProcessingSourceRegistry::new();
    let broken = Arc::new(ProcessingSource::with_provider(
        Box::new(MockPlugin::new("broken")),
        Box::new(tabula_runtime::StaticTableProvider::new(vec![
            test_descriptor(1),
            test_descriptor(1),
        ])),
    ));

    let err = registry
        .register(broken, test_application_environment())
        .unwrap_err();
    assert!(err.to_string().contains("broken"));
    assert!(matches!(err, ProcessingError::Binding { ref source_name, .. } if source_name == "broken"));
    assert!(registry.is_empty());
}

#[test]
fn test_registry_rejects_a_second_source_with_the_same_id() {
    let mut registry = ProcessingSourceRegistry::new();
    let shared = Uuid::from_u128(42);
    let first = Arc::new(ProcessingSource::new(
        Box::new(MockPlugin::new("first").with_id(shared)),
        sample_module(),
    ));
    let second_plugin = MockPlugin::new("second").with_id(shared);
    let second_calls = second_plugin.calls();
    let second = Arc::new(ProcessingSource::new(Box::new(second_plugin), sample_module()));

    registry
        .register(first, test_application_environment())
        .unwrap();
    let err = registry
        .register(second, test_application_environment())
        .unwrap_err();

    assert!(matches!(err, ProcessingError::AlreadyRegistered(id) if id == shared));
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.get(&shared).unwrap().name(), "first");
    assert_eq!(second_calls.environment_set_count(), 0);
}
