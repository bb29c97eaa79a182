//! Session sources: one analysis run over a bound processing source.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use tabula_core::{
    DataSource, ProcessingError, ProcessingResult, ProcessorEnvironment, ProcessorOption,
    ProcessorOptions, ProgressTracker,
};

use crate::processing_source::ProcessingSource;
use crate::processor::CustomDataProcessor;

/// Binds a processing source to the data sources, options and progress
/// tracker of a single execution.
///
/// The processing source is shared; the data source list, options and
/// tracker belong to the session.
#[derive(Debug)]
pub struct SessionSource {
    processing_source: Arc<ProcessingSource>,
    data_sources: Vec<DataSource>,
    options: Option<ProcessorOptions>,
    progress: ProgressTracker,
}

impl SessionSource {
    /// Start a session.
    ///
    /// # Errors
    ///
    /// - [`ProcessingError::InvalidState`] if `processing_source` is not
    ///   bound.
    /// - [`ProcessingError::EmptyArgument`] if `data_sources` is empty.
    pub fn new(
        processing_source: Arc<ProcessingSource>,
        data_sources: Vec<DataSource>,
        options: Option<ProcessorOptions>,
    ) -> ProcessingResult<Self> {
        if !processing_source.is_bound() {
            return Err(ProcessingError::InvalidState(format!(
                "session requires a bound processing source, '{}' is not",
                processing_source.name()
            )));
        }
        if data_sources.is_empty() {
            return Err(ProcessingError::EmptyArgument {
                name: "data_sources",
            });
        }

        let session = Self {
            processing_source,
            data_sources,
            options,
            progress: ProgressTracker::new(),
        };
        debug!(session = %session, "Session started");
        Ok(session)
    }

    /// The shared processing source.
    #[must_use]
    pub fn processing_source(&self) -> &Arc<ProcessingSource> {
        &self.processing_source
    }

    /// Data sources in the order given.
    #[must_use]
    pub fn data_sources(&self) -> &[DataSource] {
        &self.data_sources
    }

    /// Accumulated options, absent until given or first added.
    #[must_use]
    pub fn options(&self) -> Option<&ProcessorOptions> {
        self.options.as_ref()
    }

    /// The session's progress tracker. Clones share its state.
    #[must_use]
    pub fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    /// Append an option, creating the option set on first use.
    ///
    /// Earlier options and positional arguments are kept.
    pub fn add_option(&mut self, option: ProcessorOption) {
        self.options
            .get_or_insert_with(ProcessorOptions::new)
            .add(option);
    }

    /// `"{name} ({uri}, {uri}, ...)"`.
    #[must_use]
    pub fn display_string(&self) -> String {
        self.to_string()
    }

    /// Create a processor for this session's data sources and options.
    ///
    /// # Errors
    ///
    /// Whatever [`ProcessingSource::create_processor`] returns.
    pub fn create_processor(
        &self,
        environment: Arc<dyn ProcessorEnvironment>,
    ) -> ProcessingResult<Box<dyn CustomDataProcessor>> {
        let empty = ProcessorOptions::new();
        let options = self.options.as_ref().unwrap_or(&empty);
        self.processing_source
            .create_processor(&self.data_sources, environment, options)
    }
}

impl fmt::Display for SessionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (", self.processing_source.name())?;
        for (i, source) in self.data_sources.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", source.uri())?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use tabula_core::{StaticApplicationEnvironment, StaticProcessorEnvironment};
    use uuid::Uuid;

    use super::*;
    use crate::plugin::{ProcessingSourceInfo, ProcessingSourcePlugin};
    use crate::provider::StaticTableProvider;

    struct Plugin;

    struct Processor(Vec<DataSource>);

    impl CustomDataProcessor for Processor {
        fn data_sources(&self) -> &[DataSource] {
            &self.0
        }

        fn process(&mut self, _progress: &ProgressTracker) -> ProcessingResult<()> {
            Ok(())
        }
    }

    impl ProcessingSourcePlugin for Plugin {
        fn info(&self) -> ProcessingSourceInfo {
            ProcessingSourceInfo::new(Uuid::from_u128(1), "One")
        }

        fn is_data_source_supported(&self, _data_source: &DataSource) -> bool {
            true
        }

        fn create_processor_core(
            &self,
            data_sources: &[DataSource],
            _environment: Arc<dyn ProcessorEnvironment>,
            _options: &ProcessorOptions,
        ) -> Option<Box<dyn CustomDataProcessor>> {
            Some(Box::new(Processor(data_sources.to_vec())))
        }
    }

    fn bound() -> Arc<ProcessingSource> {
        let source = ProcessingSource::with_provider(
            Box::new(Plugin),
            Box::new(StaticTableProvider::new(Vec::new())),
        );
        source
            .set_application_environment(Arc::new(StaticApplicationEnvironment::new("host")))
            .unwrap();
        Arc::new(source)
    }

    fn uris(uris: &[&str]) -> Vec<DataSource> {
        uris.iter().map(|u| DataSource::from_uri(u).unwrap()).collect()
    }

    #[test]
    fn test_display_string() {
        let session = SessionSource::new(
            bound(),
            uris(&["file:///a.csv", "file:///b.csv"]),
            None,
        )
        .unwrap();
        assert_eq!(session.display_string(), "One (file:///a.csv, file:///b.csv)");
        assert_eq!(session.to_string(), session.display_string());
    }

    #[test]
    fn test_add_option_creates_set_on_first_use() {
        let mut session = SessionSource::new(bound(), uris(&["file:///a.csv"]), None).unwrap();
        assert!(session.options().is_none());

        session.add_option(ProcessorOption::new("first"));
        session.add_option(ProcessorOption::new("second").with_value("2"));

        let ids: Vec<_> = session
            .options()
            .unwrap()
            .options()
            .iter()
            .map(|o| o.id.as_str())
            .collect();
        assert_eq!(ids, ["first", "second"]);
    }

    #[test]
    fn test_add_option_keeps_positional_arguments() {
        let mut session = SessionSource::new(
            bound(),
            uris(&["file:///a.csv"]),
            Some(ProcessorOptions::with_arguments(["--verbose", "trace"])),
        )
        .unwrap();
        session.add_option(ProcessorOption::new("threshold").with_value("10"));

        let options = session.options().unwrap();
        assert_eq!(options.arguments(), ["--verbose", "trace"]);
        assert_eq!(options.get("threshold").unwrap().values, ["10"]);
    }

    #[test]
    fn test_rejects_unbound_source_and_empty_inputs() {
        let unbound = Arc::new(ProcessingSource::with_provider(
            Box::new(Plugin),
            Box::new(StaticTableProvider::new(Vec::new())),
        ));
        assert!(matches!(
            SessionSource::new(unbound, uris(&["file:///a.csv"]), None),
            Err(ProcessingError::InvalidState(_))
        ));
        assert!(matches!(
            SessionSource::new(bound(), Vec::new(), None),
            Err(ProcessingError::EmptyArgument { .. })
        ));
    }

    #[test]
    fn test_create_processor_uses_session_inputs() {
        let mut session = SessionSource::new(bound(), uris(&["file:///a.csv"]), None).unwrap();
        session.add_option(ProcessorOption::new("x"));

        let processor = session
            .create_processor(Arc::new(StaticProcessorEnvironment::new("run")))
            .unwrap();
        assert_eq!(processor.data_sources(), session.data_sources());
        assert!(!session.progress().is_complete());
    }
}
