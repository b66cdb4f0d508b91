//! Canonical lockfile text
//!
//!     Output is the v1 header line, then every top-level entry preceded by a blank line.
//!     Nested mappings are indented two spaces per level. String values are always quoted,
//!     integers and booleans are written as bare literals. Keys are only quoted when the
//!     lexer would not read them back as a single unquoted string.
//!
//!     There is no trailing blank line after a nested mapping: the grammar never produces an
//!     empty mapping, so the last scalar child always ends the block with its own newline.
//!
//!     Comments other than the header are not written back.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::fmt::{self, Write};

use crate::yarn::lockfile::V1_HEADER;
use crate::yarn::value::{Mapping, Value};

/// Full-match form of the lexer's unquoted string pattern.
static UNQUOTED_STRING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^[a-zA-Z/.\-][^\s,:"]*$"#).expect("valid regex"));

/// Whether a single key segment must be quoted to survive a round trip.
///
/// Anything starting with `true` or `false` is quoted no matter what, the rest only when it
/// is not a complete unquoted string.
pub fn needs_quoting(segment: &str) -> bool {
    if segment.starts_with("true") || segment.starts_with("false") {
        return true;
    }
    !UNQUOTED_STRING.is_match(segment)
}

/// Quote a key for output. Comma separated keys are split, trimmed and quoted one by one.
pub fn quote_key(key: &str) -> String {
    key.split(',')
        .map(str::trim)
        .map(|segment| {
            if needs_quoting(segment) {
                format!("\"{}\"", segment)
            } else {
                segment.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Quote the key of a scalar entry. Such a key is never a list, so it is quoted whole.
pub fn quote_pair_key(key: &str) -> String {
    if needs_quoting(key) {
        format!("\"{}\"", key)
    } else {
        key.to_string()
    }
}

/// Write the canonical text for `data`.
pub fn write_lockfile<W: Write>(data: &Mapping, out: &mut W) -> fmt::Result {
    out.write_str(V1_HEADER)?;
    out.write_char('\n')?;
    for (key, value) in data {
        out.write_char('\n')?;
        write_entry(out, key, value, 0)?;
    }
    Ok(())
}

pub fn to_lockfile_string(data: &Mapping) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_lockfile(data, &mut out);
    out
}

fn write_entry<W: Write>(out: &mut W, key: &str, value: &Value, indent: usize) -> fmt::Result {
    write!(out, "{:width$}", "", width = indent * 2)?;

    match value {
        Value::Mapping(children) => {
            out.write_str(&quote_key(key))?;
            out.write_str(":\n")?;
            for (child_key, child) in children {
                write_entry(out, child_key, child, indent + 1)?;
            }
            Ok(())
        }
        Value::String(s) => writeln!(out, "{} \"{}\"", quote_pair_key(key), s),
        Value::Integer(n) => writeln!(out, "{} {}", quote_pair_key(key), n),
        Value::Boolean(b) => writeln!(out, "{} {}", quote_pair_key(key), b),
    }
}

struct SortedMapping<'a>(&'a Mapping);

struct SortedValue<'a>(&'a Value);

impl Serialize for SortedMapping<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut entries: Vec<(&String, &Value)> = self.0.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));

        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, value) in entries {
            map.serialize_entry(key, &SortedValue(value))?;
        }
        map.end()
    }
}

impl Serialize for SortedValue<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Value::Mapping(children) => SortedMapping(children).serialize(serializer),
            scalar => scalar.serialize(serializer),
        }
    }
}

/// JSON projection: keys sorted at every level, four space indentation.
pub fn to_json_string(data: &Mapping) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    SortedMapping(data).serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// YAML projection in original key order.
pub fn to_yaml_string(data: &Mapping) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(data)
}
