//! Data source references.
//!
//! A data source is a host-level pointer to input data. Tabula never opens
//! it; the processor a plugin creates does.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ProcessingError, ProcessingResult};

/// What a [`DataSource`] points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceKind {
    /// A single file.
    File,
    /// A directory of files.
    Directory,
    /// Any other URI (network endpoints, custom schemes).
    Uri,
}

/// A reference to input data, identified by URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataSource {
    kind: DataSourceKind,
    uri: Url,
}

impl DataSource {
    /// Reference a file. Relative paths resolve against the current directory.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessingError::InvalidDataSource`] if the path cannot be
    /// expressed as a `file://` URI.
    pub fn file(path: impl AsRef<Path>) -> ProcessingResult<Self> {
        let path = absolute(path.as_ref())?;
        let uri = Url::from_file_path(&path).map_err(|()| invalid(&path, "not a file path"))?;
        Ok(Self {
            kind: DataSourceKind::File,
            uri,
        })
    }

    /// Reference a directory. Relative paths resolve against the current
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessingError::InvalidDataSource`] if the path cannot be
    /// expressed as a `file://` URI.
    pub fn directory(path: impl AsRef<Path>) -> ProcessingResult<Self> {
        let path = absolute(path.as_ref())?;
        let uri =
            Url::from_directory_path(&path).map_err(|()| invalid(&path, "not a directory path"))?;
        Ok(Self {
            kind: DataSourceKind::Directory,
            uri,
        })
    }

    /// Reference an arbitrary absolute URI.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessingError::InvalidDataSource`] if `uri` does not parse.
    pub fn from_uri(uri: &str) -> ProcessingResult<Self> {
        let uri = Url::parse(uri).map_err(|e| ProcessingError::InvalidDataSource {
            uri: uri.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            kind: DataSourceKind::Uri,
            uri,
        })
    }

    /// What this source points at.
    #[must_use]
    pub fn kind(&self) -> DataSourceKind {
        self.kind
    }

    /// The URI.
    #[must_use]
    pub fn uri(&self) -> &Url {
        &self.uri
    }

    /// Extension of the last path segment, without the dot.
    #[must_use]
    pub fn file_extension(&self) -> Option<&str> {
        let last = self.uri.path_segments()?.next_back()?;
        let (stem, ext) = last.rsplit_once('.')?;
        (!stem.is_empty() && !ext.is_empty()).then_some(ext)
    }

    /// Local path for `file://` sources.
    #[must_use]
    pub fn to_file_path(&self) -> Option<PathBuf> {
        self.uri.to_file_path().ok()
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.uri.as_str())
    }
}

fn absolute(path: &Path) -> ProcessingResult<PathBuf> {
    std::path::absolute(path).map_err(|e| invalid(path, &e.to_string()))
}

fn invalid(path: &Path, message: &str) -> ProcessingError {
    ProcessingError::InvalidDataSource {
        uri: path.display().to_string(),
        message: message.to_string(),
    }
}
