//! Manifest discovery and manifest-only processing sources.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use tabula_config::DiscoverySection;
use tabula_core::{DataSource, ProcessorEnvironment, ProcessorOptions};
use tabula_runtime::manifest::{load_manifest, load_manifests_from_dir};
use tabula_runtime::{
    BuildActionRegistry, CustomDataProcessor, MANIFEST_FILE_NAME, ModuleManifest, PluginModule,
    ProcessingSource, ProcessingSourceInfo, ProcessingSourcePlugin,
};

/// Configured directories followed by `extra`, without repeats.
fn search_dirs(discovery: &DiscoverySection, extra: &[PathBuf]) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = Vec::new();
    for dir in discovery.manifest_dirs.iter().chain(extra) {
        if !dirs.contains(dir) {
            dirs.push(dir.clone());
        }
    }
    dirs
}

/// Load the manifests found in the configured directories plus `extra`.
///
/// Unreadable directories and malformed manifests are logged and skipped.
pub(crate) fn discover(
    discovery: &DiscoverySection,
    extra: &[PathBuf],
) -> Vec<(ModuleManifest, PathBuf)> {
    let mut manifests = Vec::new();
    for dir in search_dirs(discovery, extra) {
        if discovery.recursive {
            match load_manifests_from_dir(&dir) {
                Ok(found) => manifests.extend(found),
                Err(e) => warn!(dir = %dir.display(), error = %e, "Skipping manifest directory"),
            }
        } else if let Some(found) = load_top_level(&dir) {
            manifests.push(found);
        }
    }
    manifests
}

fn load_top_level(dir: &Path) -> Option<(ModuleManifest, PathBuf)> {
    let path = dir.join(MANIFEST_FILE_NAME);
    if !path.is_file() {
        debug!(dir = %dir.display(), "No top-level manifest");
        return None;
    }
    match load_manifest(&path) {
        Ok(manifest) => Some((manifest, path)),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to load table manifest");
            None
        },
    }
}

/// The manifest's module with descriptors only.
///
/// Build entry points live in plugin code, so build names are dropped
/// rather than reported as unregistered.
pub(crate) fn descriptor_module(mut manifest: ModuleManifest) -> PluginModule {
    for table in &mut manifest.tables {
        table.build = None;
    }
    manifest.into_module(&BuildActionRegistry::new())
}

/// Processing source for a module known only through its manifest.
pub(crate) fn manifest_source(manifest: ModuleManifest) -> ProcessingSource {
    let plugin = ManifestPlugin::new(&manifest);
    ProcessingSource::new(Box::new(plugin), descriptor_module(manifest))
}

/// Plugin stand-in that describes tables but processes nothing.
struct ManifestPlugin {
    info: ProcessingSourceInfo,
}

impl ManifestPlugin {
    fn new(manifest: &ModuleManifest) -> Self {
        let name = &manifest.module.name;
        let mut info =
            ProcessingSourceInfo::new(Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes()), name);
        if let Some(description) = &manifest.module.description {
            info = info.with_description(description);
        }
        Self { info }
    }
}

impl ProcessingSourcePlugin for ManifestPlugin {
    fn info(&self) -> ProcessingSourceInfo {
        self.info.clone()
    }

    fn is_data_source_supported(&self, _data_source: &DataSource) -> bool {
        false
    }

    fn create_processor_core(
        &self,
        _data_sources: &[DataSource],
        _environment: Arc<dyn ProcessorEnvironment>,
        _options: &ProcessorOptions,
    ) -> Option<Box<dyn CustomDataProcessor>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tabula_core::StaticApplicationEnvironment;

    const MANIFEST: &str = r#"
[module]
name = "sched"
description = "Scheduler tables"

[[table]]
type_name = "ContextSwitches"
guid = "6b1c7e5e-3b0f-4cde-9b41-1e4a1f3c9a10"
name = "Context Switches"
build = "context_switches"

[[table]]
type_name = "Summary"
guid = "2f0e8d1a-0c55-4d0f-8a43-7d5e0e2b6c21"
name = "Trace Summary"
kind = "metadata"
"#;

    fn layout() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE_NAME), MANIFEST).unwrap();
        let nested = dir.path().join("nested");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(
            nested.join(MANIFEST_FILE_NAME),
            MANIFEST.replace("\"sched\"", "\"nested\""),
        )
        .unwrap();
        dir
    }

    fn section(recursive: bool) -> DiscoverySection {
        DiscoverySection {
            manifest_dirs: Vec::new(),
            recursive,
        }
    }

    #[test]
    fn test_recursive_discovery_includes_subdirectories() {
        let dir = layout();
        let found = discover(&section(true), &[dir.path().to_path_buf()]);
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_flat_discovery_reads_only_the_top_level() {
        let dir = layout();
        let found = discover(&section(false), &[dir.path().to_path_buf()]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].0.module.name, "sched");
    }

    #[test]
    fn test_repeated_directories_are_searched_once() {
        let dir = layout();
        let mut discovery = section(false);
        discovery.manifest_dirs.push(dir.path().to_path_buf());
        let found = discover(&discovery, &[dir.path().to_path_buf()]);
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_missing_directory_is_skipped() {
        let found = discover(&section(true), &[PathBuf::from("/nonexistent/tabula")]);
        assert!(found.is_empty());
    }

    #[test]
    fn test_manifest_source_binds_without_build_actions() {
        let manifest = ModuleManifest::from_toml_str(MANIFEST).unwrap();
        let source = manifest_source(manifest);
        assert_eq!(source.name(), "sched");
        assert_eq!(source.info().description, "Scheduler tables");

        source
            .set_application_environment(Arc::new(StaticApplicationEnvironment::new("tabula")))
            .unwrap();
        let catalog = source.all_tables().unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.metadata_tables().count(), 1);
        assert!(catalog.all().iter().all(|t| !t.can_build()));

        let data_source = DataSource::from_uri("file:///trace.etl").unwrap();
        assert!(!source.is_data_source_supported(&data_source));
    }
}
