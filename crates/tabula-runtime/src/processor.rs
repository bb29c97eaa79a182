//! The processor a processing source creates for a set of data sources.
//!
//! Reading and interpreting data is the plugin's business; the runtime only
//! needs a handle to drive processing and request tables.

use std::fmt;

use tabula_core::{
    DataSource, ProcessingError, ProcessingResult, ProgressTracker, TableBuilder, TableDescriptor,
};

/// A processor instance bound to concrete data sources.
pub trait CustomDataProcessor: Send {
    /// The data sources this processor was created for.
    fn data_sources(&self) -> &[DataSource];

    /// Process the data sources, reporting progress as it goes.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessingError::Processor`] if the input cannot be
    /// processed.
    fn process(&mut self, progress: &ProgressTracker) -> ProcessingResult<()>;

    /// Populate `table` after processing.
    ///
    /// The default runs the descriptor's build action.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessingError::RequiresExtensions`] for extension-backed
    /// tables and [`ProcessingError::NoBuildAction`] for tables without a
    /// build action.
    fn build_table(
        &self,
        table: &TableDescriptor,
        builder: &mut dyn TableBuilder,
    ) -> ProcessingResult<()> {
        if table.requires_extensions() {
            return Err(ProcessingError::RequiresExtensions(table.id()));
        }
        let action = table
            .build_action()
            .ok_or(ProcessingError::NoBuildAction(table.id()))?;
        action.invoke(builder);
        Ok(())
    }
}

impl fmt::Debug for dyn CustomDataProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomDataProcessor")
            .field("data_sources", &self.data_sources().len())
            .finish_non_exhaustive()
    }
}
