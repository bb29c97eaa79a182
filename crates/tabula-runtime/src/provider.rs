//! Table providers: where a processing source gets its candidate tables.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use tabula_core::TableDescriptor;

use crate::module::PluginModule;
use crate::scanner::{ScannedTable, TableScanner};

/// Supplies the candidate descriptors for a processing source.
///
/// Returns a list rather than a set so repeated identities survive until
/// the processing source validates them. Equal input state must yield
/// descriptor-equal output.
pub trait TableProvider: Send + Sync {
    /// Candidate descriptors, build actions attached where available.
    fn provide(&self) -> Vec<TableDescriptor>;
}

impl fmt::Debug for dyn TableProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableProvider").finish_non_exhaustive()
    }
}

/// Default provider: scans one plugin module.
#[derive(Debug, Clone)]
pub struct ModuleTableProvider {
    module: Arc<PluginModule>,
    scanner: TableScanner,
}

impl ModuleTableProvider {
    /// Provider over a shared module.
    #[must_use]
    pub fn new(module: Arc<PluginModule>) -> Self {
        Self {
            module,
            scanner: TableScanner::new(),
        }
    }

    /// The scanned module.
    #[must_use]
    pub fn module(&self) -> &PluginModule {
        &self.module
    }
}

impl From<PluginModule> for ModuleTableProvider {
    fn from(module: PluginModule) -> Self {
        Self::new(Arc::new(module))
    }
}

impl TableProvider for ModuleTableProvider {
    fn provide(&self) -> Vec<TableDescriptor> {
        self.scanner
            .scan(&self.module)
            .into_iter()
            .map(ScannedTable::into_descriptor)
            .collect()
    }
}

/// Aggregates several providers, e.g. one per module of a plugin family.
#[derive(Default)]
pub struct FederatedTableProvider {
    providers: Vec<Box<dyn TableProvider>>,
}

impl FederatedTableProvider {
    /// Empty aggregate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a provider.
    #[must_use]
    pub fn with_provider(mut self, provider: impl TableProvider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Add a module scanned with the default scanner.
    #[must_use]
    pub fn with_module(self, module: PluginModule) -> Self {
        self.with_provider(ModuleTableProvider::from(module))
    }

    /// Number of aggregated providers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether no providers are aggregated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl TableProvider for FederatedTableProvider {
    fn provide(&self) -> Vec<TableDescriptor> {
        let tables: Vec<TableDescriptor> =
            self.providers.iter().flat_map(|p| p.provide()).collect();
        debug!(
            providers = self.providers.len(),
            tables = tables.len(),
            "Collected federated tables"
        );
        tables
    }
}

impl fmt::Debug for FederatedTableProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FederatedTableProvider")
            .field("provider_count", &self.providers.len())
            .finish()
    }
}

/// Provider returning a fixed list.
#[derive(Debug, Clone, Default)]
pub struct StaticTableProvider {
    tables: Vec<TableDescriptor>,
}

impl StaticTableProvider {
    /// Provider over `tables`.
    #[must_use]
    pub fn new(tables: Vec<TableDescriptor>) -> Self {
        Self { tables }
    }
}

impl FromIterator<TableDescriptor> for StaticTableProvider {
    fn from_iter<I: IntoIterator<Item = TableDescriptor>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl TableProvider for StaticTableProvider {
    fn provide(&self) -> Vec<TableDescriptor> {
        self.tables.clone()
    }
}
