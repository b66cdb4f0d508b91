//! Parsed lockfile values
//!
//!     A value slot holds exactly one of four shapes. Keys are plain strings; a title made of
//!     several comma separated keys is stored joined with `", "`.
//!
//!     [Mapping] keeps insertion order. Inserting a key that is already present replaces the
//!     value but keeps the original position, which is the merge rule used when the same key
//!     appears twice.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub type Mapping = IndexMap<String, Value>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Integer(u64),
    Boolean(bool),
    Mapping(Mapping),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Value::Mapping(_))
    }

    /// Canonical literal of a scalar, without quotes. `None` for mappings.
    pub fn scalar_text(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(s.clone()),
            Value::Integer(n) => Some(n.to_string()),
            Value::Boolean(b) => Some(b.to_string()),
            Value::Mapping(_) => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::Integer(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<Mapping> for Value {
    fn from(value: Mapping) -> Self {
        Value::Mapping(value)
    }
}

/// Build a [Mapping] from key/value pairs.
///
/// ```ignore
/// let m = mapping! { "version" => "1.0.0", "dependencies" => mapping! { "bar" => "^2.0.0" } };
/// ```
#[macro_export]
macro_rules! mapping {
    () => { $crate::yarn::value::Mapping::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::yarn::value::Mapping::new();
        $( map.insert(::std::string::String::from($key), $crate::yarn::value::Value::from($value)); )+
        map
    }};
}
