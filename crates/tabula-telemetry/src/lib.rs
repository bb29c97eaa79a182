//! Tabula Telemetry - logging setup for Tabula hosts and tools.
//!
//! Library crates only emit `tracing` events; binaries call
//! [`setup_logging`] once at startup to decide where they go.
//!
//! ```rust,no_run
//! use tabula_telemetry::{LogConfig, LogFormat, setup_logging};
//!
//! # fn main() -> Result<(), tabula_telemetry::TelemetryError> {
//! let config = LogConfig::new("info")
//!     .with_format(LogFormat::Json)
//!     .with_directive("tabula_runtime=debug");
//! setup_logging(&config)?;
//! tracing::info!("ready");
//! # Ok(())
//! # }
//! ```
//!
//! With the `config` feature, a [`LogConfig`] can be built from the
//! `[logging]` section of a `tabula_config::Config`.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod error;
mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{LogConfig, LogFormat, LogTarget, setup_default_logging, setup_logging};
