//! Table discovery, provider substitution and catalog validation.

mod common;

use std::collections::BTreeSet;
use std::sync::Arc;

use tabula_core::{ProcessingError, TableDescriptor, TableKind};
use tabula_runtime::{
    BindingStatus, ExportedType, FederatedTableProvider, PluginModule, ProcessingSource,
    StaticTableProvider, TableDefinition, TableScanner,
};
use tabula_test::{
    MockPlugin, sample_module, test_application_environment, test_descriptor, test_table_id,
};

use common::{bound_source_for, id_set, source_for};

#[test]
fn test_all_tables_is_union_of_data_and_metadata_tables() {
    let module = sample_module();
    let scanned = TableScanner::new().scan(&module);
    let (source, _) = bound_source_for("sample", module);
    let catalog = source.all_tables().unwrap();

    let data: BTreeSet<_> = scanned
        .iter()
        .filter(|t| t.descriptor.kind() == TableKind::Data)
        .map(|t| t.descriptor.id())
        .collect();
    let metadata: BTreeSet<_> = scanned
        .iter()
        .filter(|t| t.descriptor.kind() == TableKind::Metadata)
        .map(|t| t.descriptor.id())
        .collect();

    assert!(!data.is_empty());
    assert!(!metadata.is_empty());
    assert_eq!(id_set(&catalog), &data | &metadata);
    assert_eq!(catalog.len(), id_set(&catalog).len());
    assert_eq!(
        catalog.metadata_tables().map(TableDescriptor::id).collect::<BTreeSet<_>>(),
        metadata
    );
}

#[test]
fn test_union_does_not_depend_on_declaration_order() {
    let forward = sample_module();
    let mut reversed = PluginModule::new("reversed");
    for export in forward.exported_types().iter().rev() {
        reversed.export(export.clone());
    }

    let (a, _) = bound_source_for("forward", forward);
    let (b, _) = bound_source_for("reversed", reversed);
    assert_eq!(id_set(&a.all_tables().unwrap()), id_set(&b.all_tables().unwrap()));
}

#[test]
fn test_catalog_exposes_extension_backed_tables_without_build_action() {
    let (source, _) = bound_source_for("sample", sample_module());
    let catalog = source.all_tables().unwrap();

    let extension: Vec<_> = catalog.extension_tables().collect();
    assert_eq!(extension.len(), 1);
    assert_eq!(extension[0].id(), test_table_id(4));
    assert!(!extension[0].can_build());

    assert!(catalog.get(&test_table_id(1)).unwrap().can_build());
    assert!(!catalog.get(&test_table_id(5)).unwrap().can_build());
}

#[test]
fn test_duplicate_table_type_fails_binding_permanently() {
    let export = ExportedType::table("Twice", TableDefinition::new(test_table_id(9), "Twice"));
    let module = PluginModule::new("dup")
        .with_type(export.clone())
        .with_type(ExportedType::table("Other", TableDefinition::new(test_table_id(3), "Other")))
        .with_type(export);
    let (source, calls) = source_for("dup", module);

    let err = source
        .set_application_environment(test_application_environment())
        .unwrap_err();
    match &err {
        ProcessingError::DuplicateTables { source_name, ids } => {
            assert_eq!(source_name, "dup");
            assert_eq!(ids, &[test_table_id(9)]);
        },
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains(&test_table_id(9).to_string()));

    // The hook ran even though resolution failed.
    assert_eq!(calls.environment_set_count(), 1);

    assert!(matches!(source.status(), BindingStatus::Failed(_)));
    assert!(matches!(source.all_tables(), Err(ProcessingError::InvalidState(_))));
    assert!(matches!(
        source.set_application_environment(test_application_environment()),
        Err(ProcessingError::InvalidState(_))
    ));
    assert_eq!(calls.environment_set_count(), 1);
}

#[test]
fn test_custom_provider_replaces_scanner_output() {
    let fixed: Vec<_> = (10..15).map(test_descriptor).collect();
    let expected: BTreeSet<_> = fixed.iter().map(TableDescriptor::id).collect();

    let source = ProcessingSource::with_provider(
        Box::new(MockPlugin::new("custom")),
        Box::new(StaticTableProvider::new(fixed)),
    );
    source
        .set_application_environment(test_application_environment())
        .unwrap();

    let catalog = source.all_tables().unwrap();
    assert_eq!(catalog.len(), 5);
    assert_eq!(id_set(&catalog), expected);
    assert!(!catalog.contains(&test_table_id(1)));
}

#[test]
fn test_federated_provider_detects_collisions_across_modules() {
    let provider = FederatedTableProvider::new()
        .with_module(sample_module())
        .with_provider(StaticTableProvider::new(vec![test_descriptor(2), test_descriptor(20)]));
    let source =
        ProcessingSource::with_provider(Box::new(MockPlugin::new("federated")), Box::new(provider));

    let err = source
        .set_application_environment(test_application_environment())
        .unwrap_err();
    assert!(matches!(err, ProcessingError::DuplicateTables { ids, .. } if ids == [test_table_id(2)]));
}

#[test]
fn test_second_binding_is_rejected() {
    let (source, calls) = bound_source_for("sample", sample_module());
    let first = source.environment().unwrap();

    let err = source
        .set_application_environment(test_application_environment())
        .unwrap_err();
    assert!(matches!(err, ProcessingError::InvalidState(_)));
    assert!(Arc::ptr_eq(&source.environment().unwrap(), &first));
    assert_eq!(calls.environment_set_count(), 1);
}

#[test]
fn test_hook_receives_the_bound_environment() {
    let (source, calls) = source_for("sample", sample_module());
    let environment = test_application_environment();
    source
        .set_application_environment(Arc::clone(&environment))
        .unwrap();

    let seen = calls.environments();
    assert_eq!(seen.len(), 1);
    assert!(Arc::ptr_eq(&seen[0], &environment));
}
