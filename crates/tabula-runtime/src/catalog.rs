//! The validated table catalog of a bound processing source.

use std::collections::{BTreeSet, HashMap};

use tracing::warn;

use tabula_core::{ProcessingError, ProcessingResult, TableDescriptor, TableId};

/// Frozen set of distinct table descriptors, metadata and data alike.
///
/// Keeps the order the provider returned them in.
#[derive(Debug, Clone, Default)]
pub struct TableCatalog {
    tables: Vec<TableDescriptor>,
    index: HashMap<TableId, usize>,
}

impl TableCatalog {
    /// Validate candidates into a catalog.
    ///
    /// `source_name` only labels the error.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessingError::DuplicateTables`] listing every identity
    /// that occurs more than once.
    pub fn resolve(source_name: &str, candidates: Vec<TableDescriptor>) -> ProcessingResult<Self> {
        let mut index = HashMap::with_capacity(candidates.len());
        let mut duplicates = BTreeSet::new();

        for (position, table) in candidates.iter().enumerate() {
            if index.insert(table.id(), position).is_some() {
                duplicates.insert(table.id());
            }
        }

        if !duplicates.is_empty() {
            let ids: Vec<TableId> = duplicates.into_iter().collect();
            warn!(
                source = source_name,
                duplicates = ids.len(),
                "Table catalog has duplicate identities"
            );
            return Err(ProcessingError::DuplicateTables {
                source_name: source_name.to_string(),
                ids,
            });
        }

        Ok(Self {
            tables: candidates,
            index,
        })
    }

    /// Every table, data and metadata.
    #[must_use]
    pub fn all(&self) -> &[TableDescriptor] {
        &self.tables
    }

    /// Data tables only.
    pub fn data_tables(&self) -> impl Iterator<Item = &TableDescriptor> {
        self.tables.iter().filter(|t| !t.is_metadata())
    }

    /// Metadata tables only.
    pub fn metadata_tables(&self) -> impl Iterator<Item = &TableDescriptor> {
        self.tables.iter().filter(|t| t.is_metadata())
    }

    /// Tables the host must hand to the extension pipeline.
    pub fn extension_tables(&self) -> impl Iterator<Item = &TableDescriptor> {
        self.tables.iter().filter(|t| t.requires_extensions())
    }

    /// Look up a table by identity.
    #[must_use]
    pub fn get(&self, id: &TableId) -> Option<&TableDescriptor> {
        self.index.get(id).and_then(|&i| self.tables.get(i))
    }

    /// Whether the catalog contains `id`.
    #[must_use]
    pub fn contains(&self, id: &TableId) -> bool {
        self.index.contains_key(id)
    }

    /// Identities in catalog order.
    pub fn ids(&self) -> impl Iterator<Item = TableId> + '_ {
        self.tables.iter().map(TableDescriptor::id)
    }

    /// Number of tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
