//! Hooks a plugin implements to become a processing source.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tabula_core::{
    ApplicationEnvironment, CommandLineOption, DataSource, ProcessorEnvironment, ProcessorOptions,
};

use crate::processor::CustomDataProcessor;

/// Identity and display metadata of a processing source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingSourceInfo {
    /// Stable identifier, used as the registry key.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Display description.
    #[serde(default)]
    pub description: String,
}

impl ProcessingSourceInfo {
    /// Info with an empty description.
    #[must_use]
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Plugin-supplied behavior behind a
/// [`ProcessingSource`](crate::ProcessingSource).
///
/// Hooks may be called from several threads once the source is bound.
pub trait ProcessingSourcePlugin: Send + Sync {
    /// Identity and display metadata. Read once, at construction.
    fn info(&self) -> ProcessingSourceInfo;

    /// Options this plugin understands.
    fn command_line_options(&self) -> Vec<CommandLineOption> {
        Vec::new()
    }

    /// Called with the host environment before the table catalog is
    /// resolved, whether or not resolution then succeeds.
    fn on_environment_set(&self, _environment: &Arc<dyn ApplicationEnvironment>) {}

    /// Whether this plugin can process `data_source`.
    fn is_data_source_supported(&self, data_source: &DataSource) -> bool;

    /// Create a processor for a non-empty list of data sources.
    ///
    /// Returning `None` is a plugin bug and surfaces as an invalid-state
    /// error.
    fn create_processor_core(
        &self,
        data_sources: &[DataSource],
        environment: Arc<dyn ProcessorEnvironment>,
        options: &ProcessorOptions,
    ) -> Option<Box<dyn CustomDataProcessor>>;
}
