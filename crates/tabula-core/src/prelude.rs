//! Prelude module - commonly used types for convenient import.
//!
//! Use `use tabula_core::prelude::*;` to import all essential types.

// Errors
pub use crate::{ProcessingError, ProcessingResult};

// Tables
pub use crate::{BuildTableAction, TableDescriptor, TableId, TableKind, Version};

// Building
pub use crate::{RowTableBuilder, TableBuilder};

// Inputs
pub use crate::{DataSource, DataSourceKind, ProcessorOption, ProcessorOptions};

// Host capabilities
pub use crate::{ApplicationEnvironment, ProcessorEnvironment, ProgressTracker};
