//! Package records
//!
//!     A [Package] is a read-only view over one top-level entry. The entry key carries the
//!     package name and one or more version specifiers (`eggs@^1.1.1, eggs@^1.1.2`), the
//!     entry body carries the resolved version, source url, checksum and dependencies.
//!
//! Specifiers
//!
//!     `npm:real@range`      the key name is an alias of `real`
//!     `file:p`, `link:p`    local package at `p`
//!     `/p`, `./p`, `../p`, `~/p`  local package at the specifier itself
//!
//!     Anything else is an ordinary range and only contributes the name.

use serde::Serialize;

use crate::yarn::error::ValidationError;
use crate::yarn::value::{Mapping, Value};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Package {
    name: String,
    version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    checksum: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    alias: Option<String>,
    dependencies: Mapping,
}

/// One `name@specifier` part of a compound key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct KeyPart<'a> {
    name: &'a str,
    specifier: &'a str,
}

impl<'a> KeyPart<'a> {
    /// Split at the first `@` that is not the leading scope marker.
    fn parse(part: &'a str) -> Option<Self> {
        let search_from = usize::from(part.starts_with('@'));
        let at = part[search_from..].find('@')? + search_from;
        let name = &part[..at];
        if name.is_empty() || name == "@" {
            return None;
        }
        Some(KeyPart {
            name,
            specifier: &part[at + 1..],
        })
    }

    /// Real package name behind an `npm:` alias.
    fn alias_target(&self) -> Option<&'a str> {
        let target = self.specifier.strip_prefix("npm:")?;
        match KeyPart::parse(target) {
            Some(real) => Some(real.name),
            None if !target.is_empty() => Some(target),
            None => None,
        }
    }

    fn local_path(&self) -> Option<&'a str> {
        let spec = self.specifier;
        if let Some(path) = spec
            .strip_prefix("file:")
            .or_else(|| spec.strip_prefix("link:"))
        {
            return Some(path);
        }
        ["/", "./", "../", "~/"]
            .iter()
            .any(|prefix| spec.starts_with(prefix))
            .then_some(spec)
    }
}

impl Package {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        let version = version.into();
        if name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        if version.is_empty() {
            return Err(ValidationError::MissingVersion { key: name });
        }
        Ok(Package {
            name,
            version,
            url: None,
            checksum: None,
            path: None,
            alias: None,
            dependencies: Mapping::new(),
        })
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_checksum(mut self, checksum: impl Into<String>) -> Self {
        self.checksum = Some(checksum.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with_dependencies(mut self, dependencies: Mapping) -> Self {
        self.dependencies = dependencies;
        self
    }

    /// Derive the record of a top-level entry.
    pub fn from_entry(key: &str, value: &Value) -> Result<Self, ValidationError> {
        let parts = key
            .split(',')
            .map(str::trim)
            .map(|part| {
                KeyPart::parse(part).ok_or_else(|| ValidationError::MalformedKey {
                    key: key.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let first = parts.first().ok_or_else(|| ValidationError::MalformedKey {
            key: key.to_string(),
        })?;

        let body = value.as_mapping().ok_or_else(|| ValidationError::MissingVersion {
            key: key.to_string(),
        })?;

        let version = scalar_field(key, body, "version")?.ok_or_else(|| {
            ValidationError::MissingVersion {
                key: key.to_string(),
            }
        })?;

        let mut package = match first.alias_target() {
            Some(real) => Package::new(real, version)?.with_alias(first.name),
            None => Package::new(first.name, version)?,
        };

        if let Some(path) = parts.iter().find_map(KeyPart::local_path) {
            package = package.with_path(path);
        }
        if let Some(url) = scalar_field(key, body, "resolved")? {
            package = package.with_url(url);
        }
        if let Some(checksum) = scalar_field(key, body, "integrity")? {
            package = package.with_checksum(checksum);
        }
        match body.get("dependencies") {
            Some(Value::Mapping(deps)) => package = package.with_dependencies(deps.clone()),
            Some(_) => {
                return Err(ValidationError::InvalidField {
                    key: key.to_string(),
                    field: "dependencies".to_string(),
                })
            }
            None => {}
        }

        tracing::trace!(key, name = %package.name, version = %package.version, "derived package");
        Ok(package)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn checksum(&self) -> Option<&str> {
        self.checksum.as_deref()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Same as [Package::path].
    pub fn relpath(&self) -> Option<&str> {
        self.path()
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn dependencies(&self) -> &Mapping {
        &self.dependencies
    }
}

fn scalar_field(key: &str, body: &Mapping, field: &str) -> Result<Option<String>, ValidationError> {
    match body.get(field) {
        None => Ok(None),
        Some(value) => value
            .scalar_text()
            .map(Some)
            .ok_or_else(|| ValidationError::InvalidField {
                key: key.to_string(),
                field: field.to_string(),
            }),
    }
}
