//! Prelude module - commonly used types for convenient import.
//!
//! ```rust,no_run
//! use tabula_telemetry::prelude::*;
//!
//! # fn main() -> TelemetryResult<()> {
//! setup_logging(&LogConfig::new("debug").with_format(LogFormat::Compact))?;
//! # Ok(())
//! # }
//! ```

pub use crate::{LogConfig, LogFormat, LogTarget};
pub use crate::{TelemetryError, TelemetryResult};
pub use crate::{setup_default_logging, setup_logging};
