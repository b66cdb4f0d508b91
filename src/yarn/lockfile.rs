//! Lockfile model
//!
//!     A [Lockfile] owns the parsed mapping and the format version. The version comes from
//!     the comments: the exact line `# yarn lockfile v1` means version 1, anything else leaves
//!     it unknown. An unknown version is only worth a warning; an explicit version other than
//!     the two known ones is rejected.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::yarn::error::{Error, ValidationError};
use crate::yarn::loader;
use crate::yarn::package::Package;
use crate::yarn::parsing::{self, Parsed};
use crate::yarn::serializer;
use crate::yarn::value::Mapping;

/// The only recognized version marker.
pub const V1_HEADER: &str = "# yarn lockfile v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Version {
    V1,
    Unknown,
}

impl Version {
    pub fn as_str(&self) -> &'static str {
        match self {
            Version::V1 => "1",
            Version::Unknown => "unknown",
        }
    }

    /// Version declared by a set of comment lines.
    pub fn from_comments<S: AsRef<str>>(comments: &[S]) -> Version {
        if comments.iter().any(|c| c.as_ref() == V1_HEADER) {
            Version::V1
        } else {
            Version::Unknown
        }
    }
}

impl FromStr for Version {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(Version::V1),
            "unknown" => Ok(Version::Unknown),
            other => Err(ValidationError::UnsupportedVersion {
                version: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lockfile {
    version: Version,
    data: Mapping,
}

impl Lockfile {
    /// Build from an explicit version string, `"1"` or `"unknown"`.
    pub fn new(version: &str, data: Mapping) -> Result<Self, ValidationError> {
        Ok(Self::with_version(version.parse()?, data))
    }

    pub fn with_version(version: Version, data: Mapping) -> Self {
        if version == Version::Unknown {
            tracing::warn!("Unknown Yarn version. Was this lockfile manually edited?");
        }
        Lockfile { version, data }
    }

    pub fn from_parsed(parsed: Parsed) -> Self {
        let version = Version::from_comments(&parsed.comments);
        Self::with_version(version, parsed.data)
    }

    /// Parse lockfile text.
    pub fn parse(source: &str) -> Result<Self, Error> {
        Ok(Self::from_parsed(parsing::parse(source)?))
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Self::parse(&loader::read_source(path)?)
    }

    pub fn to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        loader::write_source(path, &self.to_lockfile_string())
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn data(&self) -> &Mapping {
        &self.data
    }

    pub fn into_data(self) -> Mapping {
        self.data
    }

    /// Derive a package record for every top-level entry. The first malformed entry aborts.
    pub fn packages(&self) -> Result<Vec<Package>, ValidationError> {
        self.data
            .iter()
            .map(|(key, value)| Package::from_entry(key, value))
            .collect()
    }

    /// Derive the package record of a single top-level key, if present.
    pub fn package(&self, key: &str) -> Option<Result<Package, ValidationError>> {
        self.data
            .get(key)
            .map(|value| Package::from_entry(key, value))
    }

    pub fn to_lockfile_string(&self) -> String {
        serializer::to_lockfile_string(&self.data)
    }

    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serializer::to_json_string(&self.data)?)
    }

    pub fn to_yaml(&self) -> Result<String, Error> {
        Ok(serializer::to_yaml_string(&self.data)?)
    }
}

impl FromStr for Lockfile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Lockfile::parse(s)
    }
}

impl fmt::Display for Lockfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        serializer::write_lockfile(&self.data, f)
    }
}
