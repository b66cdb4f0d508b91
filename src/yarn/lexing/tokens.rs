//! Token definitions for the lockfile format
//!
//!     Two layers of tokens exist here. [RawToken] is the logos table: it only knows about
//!     character classes and produces one `LineBreak` for every run of line breaks together with
//!     the indentation that follows it. [TokenKind] is what the lexer session hands out: a line
//!     break becomes a Newline that ends the line, followed by the Indent or Dedent event
//!     computed against the current level.
//!
//! Precedence
//!
//!     Logos always takes the longest match, and on equal length the literal `true`/`false`
//!     tokens outrank the unquoted string pattern. So `true` is a boolean, while `true-false`
//!     and `trueish` are single strings. Quoting is the only way to get a string `"true"`.
//!
//!     Unquoted strings never contain `"`, so every string the lexer reads can be written back
//!     inside quotes. A digit run too large for `u64` is read as a string.

use logos::Logos;
use std::fmt;

/// Raw tokens produced by the logos lexer.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r" +")]
pub(crate) enum RawToken {
    // Kept as text; the session decides between NUMBER and an oversized STRING
    #[regex(r"[0-9]+", |lex| lex.slice().to_string())]
    Digits(String),

    #[token("true", |_| true)]
    #[token("false", |_| false)]
    Boolean(bool),

    #[regex(r#""[^"\r\n]*""#, |lex| unquote(lex.slice()))]
    #[regex(r#"[a-zA-Z/.\-][^\s,:"]*"#, |lex| lex.slice().to_string())]
    String(String),

    #[regex(r"#[^\r\n]*", |lex| lex.slice().to_string())]
    Comment(String),

    #[token(",")]
    Comma,

    #[token(":")]
    Colon,

    // Consecutive line breaks (blank lines included) plus the indentation of the next line
    #[regex(r"(\r?\n *)+", line_break)]
    LineBreak(LineBreak),
}

/// A collapsed run of line breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LineBreak {
    /// Number of `\n` characters in the run
    pub newlines: usize,
    /// Spaces after the last `\n`
    pub width: usize,
}

impl LineBreak {
    /// The line break synthesized at end of input.
    pub const END: LineBreak = LineBreak {
        newlines: 0,
        width: 0,
    };
}

fn line_break(lex: &mut logos::Lexer<'_, RawToken>) -> LineBreak {
    let slice = lex.slice();
    let last_newline = slice.rfind('\n').map_or(0, |idx| idx + 1);
    LineBreak {
        newlines: slice.matches('\n').count(),
        width: slice.len() - last_newline,
    }
}

fn unquote(slice: &str) -> String {
    slice[1..slice.len() - 1].to_string()
}

/// The token kinds the grammar consumes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    String(String),
    Number(u64),
    Boolean(bool),
    Comment(String),
    Comma,
    Colon,
    /// End of a non-blank line.
    Newline,
    /// Entered one level deeper; carries the new level.
    Indent(usize),
    /// Left one or more levels; carries how many.
    Dedent(usize),
}

impl TokenKind {
    /// Upper-case kind name, as used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::String(_) => "STRING",
            TokenKind::Number(_) => "NUMBER",
            TokenKind::Boolean(_) => "BOOLEAN",
            TokenKind::Comment(_) => "COMMENT",
            TokenKind::Comma => "COMMA",
            TokenKind::Colon => "COLON",
            TokenKind::Newline => "NEWLINE",
            TokenKind::Indent(_) => "INDENT",
            TokenKind::Dedent(_) => "DEDENT",
        }
    }

    pub fn is_indentation(&self) -> bool {
        matches!(self, TokenKind::Indent(_) | TokenKind::Dedent(_))
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::String(s) | TokenKind::Comment(s) => write!(f, "{}({:?})", self.name(), s),
            TokenKind::Number(n) => write!(f, "{}({})", self.name(), n),
            TokenKind::Boolean(b) => write!(f, "{}({})", self.name(), b),
            TokenKind::Indent(n) | TokenKind::Dedent(n) => write!(f, "{}({})", self.name(), n),
            TokenKind::Comma | TokenKind::Colon | TokenKind::Newline => f.write_str(self.name()),
        }
    }
}

/// A token with the source line it starts on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, line: usize) -> Self {
        Token { kind, line }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}
