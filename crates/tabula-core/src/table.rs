//! Table identity and descriptors.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::builder::TableBuilder;
use crate::error::{ProcessingError, ProcessingResult};
use crate::version::Version;

/// Globally unique, versioned table identity.
///
/// Two descriptors with the same `TableId` are the same table no matter
/// what their display metadata says.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TableId {
    guid: Uuid,
    version: Version,
}

impl TableId {
    /// Create an identity from a GUID and version.
    #[must_use]
    pub const fn new(guid: Uuid, version: Version) -> Self {
        Self { guid, version }
    }

    /// Parse an identity from its textual GUID and version.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessingError::InvalidTableId`] if either part is
    /// malformed.
    pub fn parse(guid: &str, version: &str) -> ProcessingResult<Self> {
        let invalid = |value: &str, message: String| ProcessingError::InvalidTableId {
            value: value.to_string(),
            message,
        };
        let parsed_guid = Uuid::parse_str(guid).map_err(|e| invalid(guid, e.to_string()))?;
        let parsed_version =
            Version::from_str(version).map_err(|e| invalid(version, e.to_string()))?;
        Ok(Self::new(parsed_guid, parsed_version))
    }

    /// The GUID part.
    #[must_use]
    pub fn guid(&self) -> Uuid {
        self.guid
    }

    /// The version part.
    #[must_use]
    pub fn version(&self) -> Version {
        self.version
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.guid, self.version)
    }
}

/// Whether a table carries catalog information or primary analysis output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    /// Payload table carrying analysis output.
    #[default]
    Data,
    /// Catalog or summary table describing the processed data.
    Metadata,
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Data => f.write_str("data"),
            Self::Metadata => f.write_str("metadata"),
        }
    }
}

/// Callback that populates a table through a [`TableBuilder`].
#[derive(Clone)]
pub struct BuildTableAction(Arc<dyn Fn(&mut dyn TableBuilder) + Send + Sync>);

impl BuildTableAction {
    /// Wrap a closure as a build action.
    pub fn new<F>(action: F) -> Self
    where
        F: Fn(&mut dyn TableBuilder) + Send + Sync + 'static,
    {
        Self(Arc::new(action))
    }

    /// Run the action against a builder.
    pub fn invoke(&self, builder: &mut dyn TableBuilder) {
        (self.0)(builder);
    }

    /// Whether both handles point at the same callback.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for BuildTableAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BuildTableAction(..)")
    }
}

/// Immutable description of one table a processing source can expose.
///
/// Equality and hashing consider only [`TableId`]. The build action is not
/// serialized.
#[derive(Clone, Serialize)]
pub struct TableDescriptor {
    id: TableId,
    name: String,
    description: String,
    category: String,
    kind: TableKind,
    requires_extensions: bool,
    #[serde(skip)]
    build_action: Option<BuildTableAction>,
}

impl TableDescriptor {
    /// Create a data-table descriptor with empty description and category.
    #[must_use]
    pub fn new(id: TableId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            category: String::new(),
            kind: TableKind::Data,
            requires_extensions: false,
            build_action: None,
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the classification.
    #[must_use]
    pub fn with_kind(mut self, kind: TableKind) -> Self {
        self.kind = kind;
        self
    }

    /// Mark the table as produced by the extension pipeline.
    ///
    /// Drops any build action already attached.
    #[must_use]
    pub fn requiring_extensions(mut self) -> Self {
        self.requires_extensions = true;
        self.build_action = None;
        self
    }

    /// Attach a build action.
    ///
    /// Ignored for extension-backed tables.
    #[must_use]
    pub fn with_build_action(mut self, action: BuildTableAction) -> Self {
        if !self.requires_extensions {
            self.build_action = Some(action);
        }
        self
    }

    /// The table identity.
    #[must_use]
    pub fn id(&self) -> TableId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Display category.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Metadata or data classification.
    #[must_use]
    pub fn kind(&self) -> TableKind {
        self.kind
    }

    /// Whether this is a metadata table.
    #[must_use]
    pub fn is_metadata(&self) -> bool {
        self.kind == TableKind::Metadata
    }

    /// Whether rows come from the shared extension pipeline.
    #[must_use]
    pub fn requires_extensions(&self) -> bool {
        self.requires_extensions
    }

    /// The plugin-owned build action, if any.
    #[must_use]
    pub fn build_action(&self) -> Option<&BuildTableAction> {
        self.build_action.as_ref()
    }

    /// Whether the plugin can build this table unassisted.
    #[must_use]
    pub fn can_build(&self) -> bool {
        self.build_action.is_some()
    }
}

impl PartialEq for TableDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TableDescriptor {}

impl Hash for TableDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TableDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableDescriptor")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("requires_extensions", &self.requires_extensions)
            .field("can_build", &self.can_build())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for TableDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
