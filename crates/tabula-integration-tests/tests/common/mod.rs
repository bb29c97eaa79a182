//! Shared helpers for integration tests.

use std::collections::BTreeSet;
use std::sync::Arc;

use tabula_core::TableId;
use tabula_runtime::{PluginModule, ProcessingSource, TableCatalog};
use tabula_test::{MockPlugin, PluginCalls, setup_test_logging_default, test_application_environment};

/// A processing source over `module` plus the plugin's call record.
#[allow(dead_code)]
pub fn source_for(name: &str, module: PluginModule) -> (Arc<ProcessingSource>, Arc<PluginCalls>) {
    setup_test_logging_default();
    let plugin = MockPlugin::new(name);
    let calls = plugin.calls();
    (Arc::new(ProcessingSource::new(Box::new(plugin), module)), calls)
}

/// Same as [`source_for`], bound to the test host environment.
#[allow(dead_code)]
pub fn bound_source_for(name: &str, module: PluginModule) -> (Arc<ProcessingSource>, Arc<PluginCalls>) {
    let (source, calls) = source_for(name, module);
    source
        .set_application_environment(test_application_environment())
        .unwrap();
    (source, calls)
}

/// Catalog identities as a set.
#[allow(dead_code)]
pub fn id_set(catalog: &TableCatalog) -> BTreeSet<TableId> {
    catalog.ids().collect()
}
