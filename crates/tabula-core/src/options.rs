//! Plugin-declared options and the option values passed to processors.
//!
//! Parsing command lines into [`ProcessorOptions`] belongs to the host; this
//! module only carries declarations and values.

use serde::{Deserialize, Serialize};

/// An option a processing source advertises to hosts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandLineOption {
    /// Stable identifier matched against [`ProcessorOption::id`].
    pub id: String,
    /// Names the option may be spelled with (e.g. `--threshold`, `-t`).
    #[serde(default)]
    pub names: Vec<String>,
    /// Help text.
    #[serde(default)]
    pub description: String,
    /// Minimum number of values.
    #[serde(default)]
    pub min_args: usize,
    /// Maximum number of values.
    #[serde(default)]
    pub max_args: usize,
}

impl CommandLineOption {
    /// A flag option taking no values.
    #[must_use]
    pub fn flag(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            names: Vec::new(),
            description: description.into(),
            min_args: 0,
            max_args: 0,
        }
    }

    /// Add a spelling.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }

    /// Set the accepted value count range. `max` is raised to `min` if lower.
    #[must_use]
    pub fn with_args(mut self, min: usize, max: usize) -> Self {
        self.min_args = min;
        self.max_args = max.max(min);
        self
    }

    /// Whether `count` values are acceptable for this option.
    #[must_use]
    pub fn accepts(&self, count: usize) -> bool {
        (self.min_args..=self.max_args).contains(&count)
    }
}

/// One option instance handed to a processor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessorOption {
    /// Identifier of the declared option.
    pub id: String,
    /// Values supplied for it.
    #[serde(default)]
    pub values: Vec<String>,
}

impl ProcessorOption {
    /// An option instance with no values.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            values: Vec::new(),
        }
    }

    /// Append a value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.values.push(value.into());
        self
    }
}

/// Options and positional arguments for one processor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessorOptions {
    #[serde(default)]
    options: Vec<ProcessorOption>,
    #[serde(default)]
    arguments: Vec<String>,
}

impl ProcessorOptions {
    /// Empty option set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Option set with positional arguments and no named options.
    #[must_use]
    pub fn with_arguments<I, S>(arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: Vec::new(),
            arguments: arguments.into_iter().map(Into::into).collect(),
        }
    }

    /// Append an option instance, keeping everything already present.
    pub fn add(&mut self, option: ProcessorOption) {
        self.options.push(option);
    }

    /// Named options in insertion order.
    #[must_use]
    pub fn options(&self) -> &[ProcessorOption] {
        &self.options
    }

    /// Positional arguments.
    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// First instance of the option with this id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ProcessorOption> {
        self.options.iter().find(|o| o.id == id)
    }

    /// Whether an option with this id is present.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Whether there are no options and no arguments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty() && self.arguments.is_empty()
    }
}
