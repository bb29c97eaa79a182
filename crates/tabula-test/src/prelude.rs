//! Prelude module - commonly used test utilities.
//!
//! Use `use tabula_test::prelude::*;` in test modules.

// Mocks
pub use crate::{MockPlugin, MockProcessor, PluginCalls, ProcessorRequest};

// Fixtures
pub use crate::{
    SAMPLE_MANIFEST, sample_module, test_application_environment, test_data_source,
    test_descriptor, test_processor_environment, test_table_id,
};

// Harness
pub use crate::{setup_test_logging, setup_test_logging_default};
