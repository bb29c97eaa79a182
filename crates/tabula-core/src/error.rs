//! Error types for processing-source operations.

use std::path::PathBuf;

use thiserror::Error;
use uuid::Uuid;

use crate::table::TableId;

/// Errors raised by table resolution, processor creation and sessions.
#[derive(Debug, Error)]
pub enum ProcessingError {
    /// A required sequence argument was empty.
    #[error("required argument is empty: {name}")]
    EmptyArgument {
        /// Name of the offending argument.
        name: &'static str,
    },

    /// Two or more candidate descriptors share an identity.
    #[error("duplicate table identities in '{source_name}': {}", join_ids(.ids))]
    DuplicateTables {
        /// Display name of the processing source being resolved.
        source_name: String,
        /// Every identity that appeared more than once, sorted.
        ids: Vec<TableId>,
    },

    /// An operation was attempted in the wrong lifecycle state.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// A table identity could not be parsed from text.
    #[error("invalid table identity '{value}': {message}")]
    InvalidTableId {
        /// The rejected GUID or version text.
        value: String,
        /// Why it was rejected.
        message: String,
    },

    /// A data source reference could not be formed.
    #[error("invalid data source '{uri}': {message}")]
    InvalidDataSource {
        /// The rejected URI or path.
        uri: String,
        /// Why it was rejected.
        message: String,
    },

    /// A table manifest could not be read or parsed.
    #[error("failed to parse manifest at {path}: {message}")]
    ManifestParse {
        /// Path to the manifest.
        path: PathBuf,
        /// The underlying error message.
        message: String,
    },

    /// No table with this identity is in the catalog.
    #[error("table not found: {0}")]
    TableNotFound(TableId),

    /// The table is built by the shared extension pipeline, not by the plugin.
    #[error("table {0} is produced by the extension pipeline")]
    RequiresExtensions(TableId),

    /// The table declares no build action.
    #[error("table {0} has no build action")]
    NoBuildAction(TableId),

    /// A processing source with this id is already registered.
    #[error("processing source already registered: {0}")]
    AlreadyRegistered(Uuid),

    /// A processing source failed to bind to the host environment.
    #[error("processing source '{source_name}' failed to bind: {error}")]
    Binding {
        /// Display name of the failing processing source.
        source_name: String,
        /// The binding failure.
        #[source]
        error: Box<ProcessingError>,
    },

    /// Failure reported by a processor while processing data.
    #[error("processor error: {0}")]
    Processor(String),
}

fn join_ids(ids: &[TableId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type for processing operations.
pub type ProcessingResult<T> = Result<T, ProcessingError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::Version;

    #[test]
    fn test_duplicate_display_lists_ids() {
        let a = TableId::new(Uuid::nil(), Version::new(1, 0, 0));
        let b = TableId::new(Uuid::from_u128(7), Version::new(2, 0, 0));
        let err = ProcessingError::DuplicateTables {
            source_name: "Trace".to_string(),
            ids: vec![a, b],
        };
        assert_eq!(
            err.to_string(),
            format!("duplicate table identities in 'Trace': {a}, {b}")
        );
    }

    #[test]
    fn test_binding_keeps_source() {
        let err = ProcessingError::Binding {
            source_name: "Trace".to_string(),
            error: Box::new(ProcessingError::InvalidState("already bound".into())),
        };
        assert_eq!(
            err.to_string(),
            "processing source 'Trace' failed to bind: invalid state: already bound"
        );
        assert!(std::error::Error::source(&err).is_some());
    }
}
