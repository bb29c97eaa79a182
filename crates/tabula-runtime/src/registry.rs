//! Processing source registry.
//!
//! Keeps the processing sources a host has loaded, keyed by their id, and
//! answers cross-source questions: which sources accept a data source, and
//! which tables exist overall.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use tabula_core::{
    ApplicationEnvironment, DataSource, ProcessingError, ProcessingResult, TableDescriptor,
};

use crate::processing_source::ProcessingSource;

/// Registry of bound processing sources.
#[derive(Debug, Default)]
pub struct ProcessingSourceRegistry {
    sources: BTreeMap<Uuid, Arc<ProcessingSource>>,
}

impl ProcessingSourceRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `source` to `environment` and store it.
    ///
    /// # Errors
    ///
    /// - [`ProcessingError::AlreadyRegistered`] if a source with the same id
    ///   is already present. The new source is left untouched.
    /// - [`ProcessingError::Binding`] wrapping the binding error, naming the
    ///   source. Nothing is stored.
    pub fn register(
        &mut self,
        source: Arc<ProcessingSource>,
        environment: Arc<dyn ApplicationEnvironment>,
    ) -> ProcessingResult<()> {
        let id = source.info().id;
        if self.sources.contains_key(&id) {
            return Err(ProcessingError::AlreadyRegistered(id));
        }

        if let Err(e) = source.set_application_environment(environment) {
            warn!(source_id = %id, source = source.name(), error = %e, "Failed to register processing source");
            return Err(ProcessingError::Binding {
                source_name: source.name().to_string(),
                error: Box::new(e),
            });
        }

        info!(source_id = %id, source = source.name(), "Registered processing source");
        self.sources.insert(id, source);
        Ok(())
    }

    /// Remove a source, returning it if it was present.
    pub fn unregister(&mut self, id: &Uuid) -> Option<Arc<ProcessingSource>> {
        let removed = self.sources.remove(id);
        if let Some(source) = &removed {
            info!(source_id = %id, source = source.name(), "Unregistered processing source");
        }
        removed
    }

    /// Look up a source by id.
    #[must_use]
    pub fn get(&self, id: &Uuid) -> Option<&Arc<ProcessingSource>> {
        self.sources.get(id)
    }

    /// All registered sources, ordered by id.
    #[must_use]
    pub fn list(&self) -> Vec<&Arc<ProcessingSource>> {
        self.sources.values().collect()
    }

    /// Number of registered sources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Sources whose plugin accepts `data_source`.
    #[must_use]
    pub fn sources_for(&self, data_source: &DataSource) -> Vec<&Arc<ProcessingSource>> {
        let matching: Vec<_> = self
            .sources
            .values()
            .filter(|s| s.is_data_source_supported(data_source))
            .collect();
        debug!(data_source = %data_source, matches = matching.len(), "Matched data source");
        matching
    }

    /// Every table of every registered source, paired with the source name.
    ///
    /// Identities may repeat across sources; each source's own catalog is
    /// duplicate-free.
    #[must_use]
    pub fn all_tables(&self) -> Vec<(String, TableDescriptor)> {
        let mut tables = Vec::new();
        for source in self.sources.values() {
            match source.all_tables() {
                Ok(catalog) => tables.extend(
                    catalog
                        .all()
                        .iter()
                        .map(|t| (source.name().to_string(), t.clone())),
                ),
                Err(e) => {
                    warn!(source = source.name(), error = %e, "Skipping unusable processing source");
                },
            }
        }
        tables
    }
}
