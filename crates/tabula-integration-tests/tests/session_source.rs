//! Session sources over registered processing sources.

mod common;

use std::sync::Arc;

use tabula_core::{DataSource, ProcessingError, ProcessorOption, ProcessorOptions};
use tabula_runtime::{PluginModule, SessionSource};
use tabula_test::{sample_module, test_data_source, test_processor_environment};

use common::{bound_source_for, source_for};

#[test]
fn test_renders_name_and_uris_in_order() {
    let (source, _) = bound_source_for("One", PluginModule::new("empty"));
    let session = SessionSource::new(
        source,
        vec![
            DataSource::from_uri("file:///a.csv").unwrap(),
            DataSource::from_uri("file:///b.csv").unwrap(),
        ],
        None,
    )
    .unwrap();

    assert_eq!(session.display_string(), "One (file:///a.csv, file:///b.csv)");
}

#[test]
fn test_options_accumulate_from_absent() {
    let (source, _) = bound_source_for("sample", sample_module());
    let mut session = SessionSource::new(source, vec![test_data_source("a.etl")], None).unwrap();

    let first = ProcessorOption::new("first").with_value("1");
    let second = ProcessorOption::new("second");
    session.add_option(first.clone());
    session.add_option(second.clone());

    let options = session.options().unwrap();
    assert_eq!(options.options(), [first, second]);
    assert!(options.arguments().is_empty());
}

#[test]
fn test_options_accumulate_preserving_arguments() {
    let (source, _) = bound_source_for("sample", sample_module());
    let mut existing = ProcessorOptions::with_arguments(["input.etl", "--fast"]);
    existing.add(ProcessorOption::new("zero"));
    let mut session =
        SessionSource::new(source, vec![test_data_source("a.etl")], Some(existing)).unwrap();

    session.add_option(ProcessorOption::new("one"));
    session.add_option(ProcessorOption::new("two"));

    let options = session.options().unwrap();
    let ids: Vec<_> = options.options().iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, ["zero", "one", "two"]);
    assert_eq!(options.arguments(), ["input.etl", "--fast"]);
}

#[test]
fn test_sessions_share_the_processing_source() {
    let (source, calls) = bound_source_for("sample", sample_module());
    let mut first = SessionSource::new(Arc::clone(&source), vec![test_data_source("a.etl")], None)
        .unwrap();
    let second =
        SessionSource::new(Arc::clone(&source), vec![test_data_source("b.etl")], None).unwrap();
    first.add_option(ProcessorOption::new("only-first"));

    assert!(Arc::ptr_eq(first.processing_source(), second.processing_source()));
    assert!(!first.progress().shares_state_with(second.progress()));

    first.create_processor(test_processor_environment()).unwrap();
    second.create_processor(test_processor_environment()).unwrap();

    let requests = calls.processor_requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].options.contains("only-first"));
    assert!(requests[1].options.is_empty());
    assert_eq!(requests[1].data_sources, [test_data_source("b.etl")]);
}

#[test]
fn test_session_requires_bound_source() {
    let (source, _) = source_for("sample", sample_module());
    let result = SessionSource::new(source, vec![test_data_source("a.etl")], None);
    assert!(matches!(result, Err(ProcessingError::InvalidState(_))));
}
