//! Tabula Test - shared test utilities for the Tabula runtime.
//!
//! Add to a crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! tabula-test.workspace = true
//! ```
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use tabula_runtime::ProcessingSource;
//! use tabula_test::{MockPlugin, sample_module, test_application_environment};
//!
//! #[test]
//! fn test_binds() {
//!     let plugin = MockPlugin::new("sample");
//!     let calls = plugin.calls();
//!     let source = ProcessingSource::new(Box::new(plugin), sample_module());
//!     source.set_application_environment(test_application_environment()).unwrap();
//!     assert_eq!(calls.environment_set_count(), 1);
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod prelude;

pub mod fixtures;
pub mod harness;
pub mod mocks;

pub use fixtures::*;
pub use harness::*;
pub use mocks::*;
