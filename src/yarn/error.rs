//! Error types for every stage of the pipeline
//!
//!     All errors are fatal for the call that produced them: lexing stops at the first
//!     unrecognized character, parsing stops at the first token that matches no production,
//!     and package derivation stops at the first malformed entry.

use std::fmt;

/// Errors raised by the lexer session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    /// No token rule matches at this position. `text` is the rest of the offending line.
    #[error("{line}: Invalid token {text}")]
    InvalidToken { line: usize, text: String },

    /// A line opened more than one indentation level at once.
    #[error("{line}: Invalid indentation, level jumped from {from} to {to}")]
    IndentationJump { line: usize, from: usize, to: usize },
}

impl LexError {
    pub fn line(&self) -> usize {
        match self {
            LexError::InvalidToken { line, .. } | LexError::IndentationJump { line, .. } => *line,
        }
    }
}

/// A token sequence that matches no grammar production.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Line of the unexpected token, `None` at end of input.
    pub line: Option<usize>,
    /// Rendering of the unexpected token, `None` at end of input.
    pub found: Option<String>,
    pub expected: Vec<String>,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.line, &self.found) {
            (Some(line), Some(found)) => write!(f, "{}: Unexpected token {}", line, found)?,
            _ => write!(f, "Unexpected end of input")?,
        }
        if !self.expected.is_empty() {
            write!(f, " (expected {})", self.expected.join(", "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Semantic errors found while building the lockfile model or deriving packages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Package name was not provided")]
    MissingName,

    #[error("Package version was not provided for {key}")]
    MissingVersion { key: String },

    #[error("Malformed package key: {key}")]
    MalformedKey { key: String },

    #[error("Field {field} of {key} has an unexpected type")]
    InvalidField { key: String, field: String },

    #[error("Unsupported yarn.lockfile version: {version}")]
    UnsupportedVersion { version: String },
}

/// Umbrella error for the public entry points.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
