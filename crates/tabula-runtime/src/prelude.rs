//! Prelude module - commonly used types for convenient import.
//!
//! Use `use tabula_runtime::prelude::*;` when writing a plugin or a host.

pub use tabula_core::prelude::*;

// Declaring tables
pub use crate::{ExportedType, PluginModule, TableDefinition, TableType, TypeMarker};

// Plugin hooks
pub use crate::{CustomDataProcessor, ProcessingSourceInfo, ProcessingSourcePlugin};

// Discovery and resolution
pub use crate::{TableCatalog, TableProvider, TableScanner};

// Host side
pub use crate::{ProcessingSource, ProcessingSourceRegistry, SessionSource};
