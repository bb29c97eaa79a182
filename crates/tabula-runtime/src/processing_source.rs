//! Processing sources: a plugin's hooks plus its table catalog lifecycle.
//!
//! A processing source starts [`Unbound`](BindingStatus::Unbound). Binding
//! it to the host's application environment resolves and validates the
//! table catalog exactly once; success moves it to
//! [`Bound`](BindingStatus::Bound), a resolution failure moves it to
//! [`Failed`](BindingStatus::Failed) for good. Processors can only be
//! created while bound.
//!
//! Plugin code runs without the state lock held, so a hook may query its
//! own source. While binding is in progress the source reports
//! [`Binding`](BindingStatus::Binding) and bound-only accessors fail with
//! [`ProcessingError::InvalidState`].

use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info, warn};

use tabula_core::{
    ApplicationEnvironment, CommandLineOption, DataSource, ProcessingError, ProcessingResult,
    ProcessorEnvironment, ProcessorOptions, TableBuilder, TableId,
};

use crate::catalog::TableCatalog;
use crate::module::PluginModule;
use crate::plugin::{ProcessingSourceInfo, ProcessingSourcePlugin};
use crate::processor::CustomDataProcessor;
use crate::provider::{ModuleTableProvider, TableProvider};

/// Observable lifecycle state of a processing source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingStatus {
    /// No environment has been set.
    Unbound,
    /// Environment accepted; the catalog is being resolved.
    Binding,
    /// Environment set and catalog resolved.
    Bound,
    /// Catalog resolution failed; the instance is unusable.
    Failed(String),
}

enum BindingState {
    Unbound,
    Binding,
    Bound {
        environment: Arc<dyn ApplicationEnvironment>,
        catalog: Arc<TableCatalog>,
    },
    Failed {
        reason: String,
    },
}

/// A plugin registration: its hooks, its table provider and its binding
/// state.
pub struct ProcessingSource {
    info: ProcessingSourceInfo,
    plugin: Box<dyn ProcessingSourcePlugin>,
    provider: Box<dyn TableProvider>,
    state: RwLock<BindingState>,
}

impl ProcessingSource {
    /// Create a source whose tables come from scanning `module`.
    #[must_use]
    pub fn new(plugin: Box<dyn ProcessingSourcePlugin>, module: PluginModule) -> Self {
        Self::with_provider(plugin, Box::new(ModuleTableProvider::from(module)))
    }

    /// Create a source with a custom table provider.
    #[must_use]
    pub fn with_provider(
        plugin: Box<dyn ProcessingSourcePlugin>,
        provider: Box<dyn TableProvider>,
    ) -> Self {
        Self {
            info: plugin.info(),
            plugin,
            provider,
            state: RwLock::new(BindingState::Unbound),
        }
    }

    /// Identity and display metadata.
    #[must_use]
    pub fn info(&self) -> &ProcessingSourceInfo {
        &self.info
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.info.name
    }

    /// Options the plugin declares. Empty unless the plugin overrides it.
    #[must_use]
    pub fn command_line_options(&self) -> Vec<CommandLineOption> {
        self.plugin.command_line_options()
    }

    /// Bind the host environment and resolve the table catalog.
    ///
    /// The plugin's `on_environment_set` hook runs first, even if
    /// resolution then fails. The first call claims the source; concurrent
    /// or re-entrant calls are rejected, so only one can succeed.
    ///
    /// # Errors
    ///
    /// - [`ProcessingError::InvalidState`] if the source is already bound,
    ///   binding is in progress, or a previous binding failed.
    /// - [`ProcessingError::DuplicateTables`] if the provider returned
    ///   repeated identities. The source is then permanently failed.
    pub fn set_application_environment(
        &self,
        environment: Arc<dyn ApplicationEnvironment>,
    ) -> ProcessingResult<()> {
        self.claim_binding()?;

        self.plugin.on_environment_set(&environment);
        let resolved = TableCatalog::resolve(self.name(), self.provider.provide());

        let mut state = self.write_state()?;
        match resolved {
            Ok(catalog) => {
                info!(
                    source = self.name(),
                    application = environment.application_name(),
                    tables = catalog.len(),
                    metadata_tables = catalog.metadata_tables().count(),
                    extension_tables = catalog.extension_tables().count(),
                    "Processing source bound"
                );
                *state = BindingState::Bound {
                    environment,
                    catalog: Arc::new(catalog),
                };
                Ok(())
            },
            Err(e) => {
                warn!(source = self.name(), error = %e, "Processing source failed to bind");
                *state = BindingState::Failed {
                    reason: e.to_string(),
                };
                Err(e)
            },
        }
    }

    /// Move `Unbound` to `Binding`, rejecting every other state.
    fn claim_binding(&self) -> ProcessingResult<()> {
        let mut state = self.write_state()?;
        match &*state {
            BindingState::Unbound => {},
            BindingState::Binding => {
                return Err(ProcessingError::InvalidState(format!(
                    "processing source '{}' is already being bound",
                    self.name()
                )));
            },
            BindingState::Bound { .. } => {
                return Err(ProcessingError::InvalidState(format!(
                    "processing source '{}' is already bound to an environment",
                    self.name()
                )));
            },
            BindingState::Failed { reason } => {
                return Err(ProcessingError::InvalidState(format!(
                    "processing source '{}' failed to bind earlier: {reason}",
                    self.name()
                )));
            },
        }
        *state = BindingState::Binding;
        Ok(())
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn status(&self) -> BindingStatus {
        match self.state.read().as_deref() {
            Ok(BindingState::Unbound) => BindingStatus::Unbound,
            Ok(BindingState::Binding) => BindingStatus::Binding,
            Ok(BindingState::Bound { .. }) => BindingStatus::Bound,
            Ok(BindingState::Failed { reason }) => BindingStatus::Failed(reason.clone()),
            Err(_) => BindingStatus::Failed("state lock poisoned".to_string()),
        }
    }

    /// Whether the source is bound.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.status() == BindingStatus::Bound
    }

    /// The bound application environment.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessingError::InvalidState`] unless bound.
    pub fn environment(&self) -> ProcessingResult<Arc<dyn ApplicationEnvironment>> {
        self.with_bound(|environment, _| Arc::clone(environment))
    }

    /// The resolved catalog: every distinct metadata and data table.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessingError::InvalidState`] unless bound; an unbound
    /// source never reports an empty catalog.
    pub fn all_tables(&self) -> ProcessingResult<Arc<TableCatalog>> {
        self.with_bound(|_, catalog| Arc::clone(catalog))
    }

    /// Whether the plugin accepts `data_source`. Usable in any state.
    #[must_use]
    pub fn is_data_source_supported(&self, data_source: &DataSource) -> bool {
        self.plugin.is_data_source_supported(data_source)
    }

    /// Create a processor for `data_sources`.
    ///
    /// # Errors
    ///
    /// - [`ProcessingError::EmptyArgument`] if `data_sources` is empty.
    /// - [`ProcessingError::InvalidState`] if the source is not bound, or the
    ///   plugin returned no processor.
    pub fn create_processor(
        &self,
        data_sources: &[DataSource],
        environment: Arc<dyn ProcessorEnvironment>,
        options: &ProcessorOptions,
    ) -> ProcessingResult<Box<dyn CustomDataProcessor>> {
        if data_sources.is_empty() {
            return Err(ProcessingError::EmptyArgument {
                name: "data_sources",
            });
        }
        self.with_bound(|_, _| ())?;

        debug!(
            source = self.name(),
            environment = environment.label(),
            data_sources = data_sources.len(),
            options = options.options().len(),
            "Creating processor"
        );

        self.plugin
            .create_processor_core(data_sources, environment, options)
            .ok_or_else(|| {
                ProcessingError::InvalidState(format!(
                    "processing source '{}' returned no processor",
                    self.name()
                ))
            })
    }

    /// Single-source form of [`create_processor`](Self::create_processor).
    ///
    /// # Errors
    ///
    /// Same as [`create_processor`](Self::create_processor).
    pub fn create_processor_for(
        &self,
        data_source: &DataSource,
        environment: Arc<dyn ProcessorEnvironment>,
        options: &ProcessorOptions,
    ) -> ProcessingResult<Box<dyn CustomDataProcessor>> {
        self.create_processor(std::slice::from_ref(data_source), environment, options)
    }

    /// Populate a catalog table with its plugin-owned build action.
    ///
    /// # Errors
    ///
    /// - [`ProcessingError::InvalidState`] unless bound.
    /// - [`ProcessingError::TableNotFound`] if `id` is not in the catalog.
    /// - [`ProcessingError::RequiresExtensions`] for extension-backed tables.
    /// - [`ProcessingError::NoBuildAction`] for descriptor-only tables.
    pub fn build_table(&self, id: &TableId, builder: &mut dyn TableBuilder) -> ProcessingResult<()> {
        let catalog = self.all_tables()?;
        let table = catalog.get(id).ok_or(ProcessingError::TableNotFound(*id))?;
        if table.requires_extensions() {
            return Err(ProcessingError::RequiresExtensions(*id));
        }
        let action = table
            .build_action()
            .ok_or(ProcessingError::NoBuildAction(*id))?;
        action.invoke(builder);
        Ok(())
    }

    fn with_bound<T>(
        &self,
        f: impl FnOnce(&Arc<dyn ApplicationEnvironment>, &Arc<TableCatalog>) -> T,
    ) -> ProcessingResult<T> {
        match &*self.read_state()? {
            BindingState::Bound {
                environment,
                catalog,
            } => Ok(f(environment, catalog)),
            BindingState::Unbound => Err(ProcessingError::InvalidState(format!(
                "processing source '{}' has no application environment",
                self.name()
            ))),
            BindingState::Binding => Err(ProcessingError::InvalidState(format!(
                "processing source '{}' is still resolving its tables",
                self.name()
            ))),
            BindingState::Failed { reason } => Err(ProcessingError::InvalidState(format!(
                "processing source '{}' is unusable: {reason}",
                self.name()
            ))),
        }
    }

    fn read_state(&self) -> ProcessingResult<RwLockReadGuard<'_, BindingState>> {
        self.state
            .read()
            .map_err(|_| ProcessingError::InvalidState("state lock poisoned".to_string()))
    }

    fn write_state(&self) -> ProcessingResult<RwLockWriteGuard<'_, BindingState>> {
        self.state
            .write()
            .map_err(|_| ProcessingError::InvalidState("state lock poisoned".to_string()))
    }
}

impl fmt::Debug for ProcessingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessingSource")
            .field("info", &self.info)
            .field("status", &self.status())
            .finish_non_exhaustive()
    }
}
