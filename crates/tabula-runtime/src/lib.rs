//! Tabula Runtime - table discovery and processing-source lifecycle.
//!
//! A plugin describes the types it exports in a [`PluginModule`], either in
//! code or through a `Tables.toml` manifest. The [`TableScanner`] turns that
//! module into candidate [`TableDescriptor`](tabula_core::TableDescriptor)s,
//! a [`TableProvider`] hands them to a [`ProcessingSource`], and binding the
//! source to a host environment validates them into a frozen
//! [`TableCatalog`]. A [`SessionSource`] then ties a bound source to the data
//! sources and options of one analysis run.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use tabula_core::StaticApplicationEnvironment;
//! use tabula_runtime::{PluginModule, ProcessingSource, ProcessingSourcePlugin};
//!
//! # fn demo(plugin: Box<dyn ProcessingSourcePlugin>, module: PluginModule) -> tabula_core::ProcessingResult<()> {
//! let source = ProcessingSource::new(plugin, module);
//! source.set_application_environment(Arc::new(StaticApplicationEnvironment::new("host")))?;
//! for table in source.all_tables()?.all() {
//!     println!("{table}");
//! }
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

pub mod catalog;
pub mod manifest;
pub mod module;
pub mod plugin;
pub mod processing_source;
pub mod processor;
pub mod provider;
pub mod registry;
pub mod scanner;
pub mod session;

pub use catalog::TableCatalog;
pub use manifest::{BuildActionRegistry, MANIFEST_FILE_NAME, ModuleManifest};
pub use module::{ExportedType, PluginModule, TableDefinition, TableType, TypeMarker};
pub use plugin::{ProcessingSourceInfo, ProcessingSourcePlugin};
pub use processing_source::{BindingStatus, ProcessingSource};
pub use processor::CustomDataProcessor;
pub use provider::{
    FederatedTableProvider, ModuleTableProvider, StaticTableProvider, TableProvider,
};
pub use registry::ProcessingSourceRegistry;
pub use scanner::{ScannedTable, TableScanner};
pub use session::SessionSource;
