//! Tabula Core - value types shared by every Tabula crate.
//!
//! This crate provides:
//! - Table identities and the immutable [`TableDescriptor`]
//! - Data source references ([`DataSource`])
//! - Plugin-declared command line options and processor options
//! - The shared [`ProgressTracker`]
//! - Host environment capability traits
//! - The [`TableBuilder`] context handed to build actions
//! - The [`ProcessingError`] type used across the runtime

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

pub mod builder;
pub mod data_source;
pub mod environment;
pub mod error;
pub mod options;
pub mod progress;
pub mod table;
pub mod version;

pub use builder::{RowTableBuilder, TableBuilder};
pub use data_source::{DataSource, DataSourceKind};
pub use environment::{
    ApplicationEnvironment, ProcessorEnvironment, StaticApplicationEnvironment,
    StaticProcessorEnvironment,
};
pub use error::{ProcessingError, ProcessingResult};
pub use options::{CommandLineOption, ProcessorOption, ProcessorOptions};
pub use progress::ProgressTracker;
pub use table::{BuildTableAction, TableDescriptor, TableId, TableKind};
pub use version::{Version, VersionParseError};
