//! Mock plugin and processor implementations.

use std::sync::{Arc, Mutex};

use uuid::Uuid;

use tabula_core::{
    ApplicationEnvironment, CommandLineOption, DataSource, ProcessingError, ProcessingResult,
    ProcessorEnvironment, ProcessorOptions, ProgressTracker,
};
use tabula_runtime::{CustomDataProcessor, ProcessingSourceInfo, ProcessingSourcePlugin};

/// One `create_processor_core` call as the plugin saw it.
#[derive(Debug, Clone)]
pub struct ProcessorRequest {
    /// Data sources passed in.
    pub data_sources: Vec<DataSource>,
    /// Environment passed in.
    pub environment: Arc<dyn ProcessorEnvironment>,
    /// Copy of the options passed in.
    pub options: ProcessorOptions,
    /// Address of the options reference, for identity checks.
    pub options_addr: usize,
}

/// Hook calls recorded by a [`MockPlugin`]. Shared with the test through
/// [`MockPlugin::calls`].
#[derive(Debug, Default)]
pub struct PluginCalls {
    environments: Mutex<Vec<Arc<dyn ApplicationEnvironment>>>,
    processor_requests: Mutex<Vec<ProcessorRequest>>,
}

impl PluginCalls {
    /// Environments passed to `on_environment_set`, in call order.
    #[must_use]
    pub fn environments(&self) -> Vec<Arc<dyn ApplicationEnvironment>> {
        self.environments
            .lock()
            .map(|g| g.clone())
            .unwrap_or_default()
    }

    /// Number of `on_environment_set` calls.
    #[must_use]
    pub fn environment_set_count(&self) -> usize {
        self.environments.lock().map(|g| g.len()).unwrap_or_default()
    }

    /// Recorded `create_processor_core` calls.
    #[must_use]
    pub fn processor_requests(&self) -> Vec<ProcessorRequest> {
        self.processor_requests
            .lock()
            .map(|g| g.clone())
            .unwrap_or_default()
    }
}

/// Configurable [`ProcessingSourcePlugin`] that records every hook call.
#[derive(Debug, Clone)]
pub struct MockPlugin {
    info: ProcessingSourceInfo,
    extensions: Vec<String>,
    options: Vec<CommandLineOption>,
    yields_processor: bool,
    processor_failure: Option<String>,
    calls: Arc<PluginCalls>,
}

impl MockPlugin {
    /// A plugin named `name`, with an id derived from the name. Accepts
    /// every data source and yields a [`MockProcessor`].
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            info: ProcessingSourceInfo::new(Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes()), name),
            extensions: Vec::new(),
            options: Vec::new(),
            yields_processor: true,
            processor_failure: None,
            calls: Arc::new(PluginCalls::default()),
        }
    }

    /// Override the id.
    #[must_use]
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.info.id = id;
        self
    }

    /// Only accept data sources with this file extension. May be repeated.
    #[must_use]
    pub fn with_supported_extension(mut self, extension: impl Into<String>) -> Self {
        self.extensions.push(extension.into());
        self
    }

    /// Declare a command line option.
    #[must_use]
    pub fn with_option(mut self, option: CommandLineOption) -> Self {
        self.options.push(option);
        self
    }

    /// Make `create_processor_core` return nothing.
    #[must_use]
    pub fn without_processor(mut self) -> Self {
        self.yields_processor = false;
        self
    }

    /// Make created processors fail in `process` with `message`.
    #[must_use]
    pub fn with_failing_processor(mut self, message: impl Into<String>) -> Self {
        self.processor_failure = Some(message.into());
        self
    }

    /// Recorded calls. Keep this before boxing the plugin.
    #[must_use]
    pub fn calls(&self) -> Arc<PluginCalls> {
        Arc::clone(&self.calls)
    }
}

impl ProcessingSourcePlugin for MockPlugin {
    fn info(&self) -> ProcessingSourceInfo {
        self.info.clone()
    }

    fn command_line_options(&self) -> Vec<CommandLineOption> {
        self.options.clone()
    }

    fn on_environment_set(&self, environment: &Arc<dyn ApplicationEnvironment>) {
        if let Ok(mut guard) = self.calls.environments.lock() {
            guard.push(Arc::clone(environment));
        }
    }

    fn is_data_source_supported(&self, data_source: &DataSource) -> bool {
        self.extensions.is_empty()
            || data_source
                .file_extension()
                .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }

    fn create_processor_core(
        &self,
        data_sources: &[DataSource],
        environment: Arc<dyn ProcessorEnvironment>,
        options: &ProcessorOptions,
    ) -> Option<Box<dyn CustomDataProcessor>> {
        if let Ok(mut guard) = self.calls.processor_requests.lock() {
            guard.push(ProcessorRequest {
                data_sources: data_sources.to_vec(),
                environment,
                options: options.clone(),
                options_addr: std::ptr::from_ref(options).addr(),
            });
        }

        if !self.yields_processor {
            return None;
        }
        let mut processor = MockProcessor::new(data_sources.to_vec());
        if let Some(message) = &self.processor_failure {
            processor = processor.failing(message.clone());
        }
        Some(Box::new(processor))
    }
}

/// [`CustomDataProcessor`] that reports full progress, or fails on demand.
#[derive(Debug, Clone)]
pub struct MockProcessor {
    data_sources: Vec<DataSource>,
    failure: Option<String>,
}

impl MockProcessor {
    /// Processor over `data_sources`.
    #[must_use]
    pub fn new(data_sources: Vec<DataSource>) -> Self {
        Self {
            data_sources,
            failure: None,
        }
    }

    /// Fail in `process` with `message`.
    #[must_use]
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }
}

impl CustomDataProcessor for MockProcessor {
    fn data_sources(&self) -> &[DataSource] {
        &self.data_sources
    }

    fn process(&mut self, progress: &ProgressTracker) -> ProcessingResult<()> {
        if let Some(message) = &self.failure {
            progress.set_status(message.clone());
            return Err(ProcessingError::Processor(message.clone()));
        }
        progress.set_status(format!("processed {} data source(s)", self.data_sources.len()));
        progress.report(100);
        progress.complete();
        Ok(())
    }
}
