//! Host capability objects passed through to plugins.
//!
//! Both environments are opaque to the runtime: it only stores them and
//! hands them to plugin hooks.

use std::fmt;

/// Application-wide environment a host supplies once per processing source.
pub trait ApplicationEnvironment: Send + Sync + fmt::Debug {
    /// Name of the hosting application.
    fn application_name(&self) -> &str;

    /// Whether a user is present to answer prompts.
    fn is_interactive(&self) -> bool {
        false
    }
}

/// Per-processor environment a host supplies to each `create_processor` call.
pub trait ProcessorEnvironment: Send + Sync + fmt::Debug {
    /// Label identifying the processing run, used in logs.
    fn label(&self) -> &str;
}

/// Plain [`ApplicationEnvironment`] holding fixed values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticApplicationEnvironment {
    application_name: String,
    interactive: bool,
}

impl StaticApplicationEnvironment {
    /// Non-interactive environment for the named application.
    #[must_use]
    pub fn new(application_name: impl Into<String>) -> Self {
        Self {
            application_name: application_name.into(),
            interactive: false,
        }
    }

    /// Mark as interactive.
    #[must_use]
    pub fn interactive(mut self) -> Self {
        self.interactive = true;
        self
    }
}

impl ApplicationEnvironment for StaticApplicationEnvironment {
    fn application_name(&self) -> &str {
        &self.application_name
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

/// Plain [`ProcessorEnvironment`] holding a label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticProcessorEnvironment {
    label: String,
}

impl StaticProcessorEnvironment {
    /// Environment with the given label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl ProcessorEnvironment for StaticProcessorEnvironment {
    fn label(&self) -> &str {
        &self.label
    }
}
