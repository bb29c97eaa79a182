//! Version component of a table identity.
//!
//! Table identities are versioned so a plugin can ship an incompatible
//! revision of a table without colliding with the older one.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A `major.minor.patch` version triple.
///
/// Ordering is lexicographic over `(major, minor, patch)`. Serialized as the
/// dotted string form so manifests can write `version = "1.2.0"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Version {
    /// Major version - breaking changes to the table's shape.
    pub major: u32,
    /// Minor version - additive changes.
    pub minor: u32,
    /// Patch version - fixes that keep the shape.
    pub patch: u32,
}

impl Version {
    /// Creates a new version.
    #[must_use]
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// `1.0.0`, the version used when a declaration does not give one.
    #[must_use]
    pub const fn initial() -> Self {
        Self::new(1, 0, 0)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Error returned when parsing a version string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionParseError {
    /// Wrong number of segments (expected "major.minor.patch").
    InvalidFormat(String),
    /// A numeric segment could not be parsed.
    InvalidNumber(ParseIntError),
}

impl fmt::Display for VersionParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(s) => write!(
                f,
                "invalid version format: {s} (expected major.minor.patch)"
            ),
            Self::InvalidNumber(e) => write!(f, "invalid version number: {e}"),
        }
    }
}

impl std::error::Error for VersionParseError {}

impl From<ParseIntError> for VersionParseError {
    fn from(e: ParseIntError) -> Self {
        Self::InvalidNumber(e)
    }
}

impl FromStr for Version {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().split('.');
        let (Some(major), Some(minor), Some(patch), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(VersionParseError::InvalidFormat(s.to_string()));
        };
        Ok(Self::new(major.parse()?, minor.parse()?, patch.parse()?))
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
