//! Lockfile loading utilities
//!
//! This module provides `LockfileLoader`, a small wrapper that holds lockfile text read from
//! a file or a string and runs the pipeline stages on it. The `yarnlock` binary loads every
//! input through it.
//!
//! # Example
//!
//! ```rust,ignore
//! use yarn_lockfile::yarn::loader::LockfileLoader;
//!
//! // From file
//! let lock = LockfileLoader::from_path("yarn.lock")?.lockfile()?;
//!
//! // From string, stopping after the lexer
//! let tokens = LockfileLoader::from_string("foo \"bar\"\n").tokenize()?;
//! ```

use std::fs;
use std::path::Path;

use crate::yarn::error::{Error, LexError};
use crate::yarn::lexing::{tokenize_normalized, Token};
use crate::yarn::lockfile::Lockfile;
use crate::yarn::parsing::{self, Parsed};

/// Read a whole lockfile into memory.
pub fn read_source<P: AsRef<Path>>(path: P) -> Result<String, Error> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "reading lockfile");
    Ok(fs::read_to_string(path)?)
}

/// Write lockfile text, replacing any existing file.
pub fn write_source<P: AsRef<Path>>(path: P, text: &str) -> Result<(), Error> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), bytes = text.len(), "writing lockfile");
    Ok(fs::write(path, text)?)
}

/// Lockfile text with shortcuts for each pipeline stage.
pub struct LockfileLoader {
    source: String,
}

impl LockfileLoader {
    /// Load from a file path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Ok(LockfileLoader {
            source: read_source(path)?,
        })
    }

    /// Load from a string
    pub fn from_string<S: Into<String>>(source: S) -> Self {
        LockfileLoader {
            source: source.into(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// The normalized token stream.
    pub fn tokenize(&self) -> Result<Vec<Token>, LexError> {
        tokenize_normalized(&self.source)
    }

    /// The raw parse tree with comments.
    pub fn parse(&self) -> Result<Parsed, Error> {
        parsing::parse(&self.source)
    }

    pub fn lockfile(&self) -> Result<Lockfile, Error> {
        Lockfile::parse(&self.source)
    }
}
