//! Lexer
//!
//!     This module turns lockfile text into the token stream the grammar consumes.
//!
//! The Lexing Pipeline
//!
//!     1. Core tokenization using logos. See [tokens](tokens). Runs of line breaks collapse
//!        into one raw LineBreak token that also measures the indentation after it.
//!
//!     2. The lexer session. See [lexer](lexer). Ends every non-blank line with a NEWLINE and
//!        turns LineBreak tokens into INDENT / DEDENT events against the current level. A line
//!        never opens more than one level, and open levels are closed at end of input.
//!
//!     3. Indent normalization. See [normalizer](normalizer). Splits DEDENT(n) into n
//!        DEDENT(1) tokens.
//!
//!     Every stage is pulled one token at a time through [TokenSource]; nothing is buffered
//!     beyond the indentation event queued behind a NEWLINE and the normalizer's pending
//!     dedents.

pub mod lexer;
pub mod normalizer;
pub mod tokens;

pub use lexer::Lexer;
pub use normalizer::IndentNormalizer;
pub use tokens::{Token, TokenKind};

use crate::yarn::error::LexError;

/// A pull-based producer of tokens.
///
/// `Ok(None)` signals the end of the stream. After an error the source is spent.
pub trait TokenSource {
    fn next_token(&mut self) -> Result<Option<Token>, LexError>;
}

/// Build the full lexing pipeline for `source`.
pub fn token_stream(source: &str) -> IndentNormalizer<Lexer<'_>> {
    IndentNormalizer::new(Lexer::new(source))
}

/// Tokenize without normalization: multi-level dedents stay as one token.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).collect()
}

/// Tokenize with normalization, the exact stream the parser sees.
pub fn tokenize_normalized(source: &str) -> Result<Vec<Token>, LexError> {
    token_stream(source).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(tokenize("").unwrap(), vec![]);
        assert_eq!(tokenize_normalized("\n\n").unwrap(), vec![]);
    }

    #[test]
    fn test_normalized_stream_only_has_single_dedents() {
        let tokens = tokenize_normalized("a:\n  b:\n    c:\n      d e\n").unwrap();
        assert!(tokens
            .iter()
            .all(|t| !matches!(t.kind, TokenKind::Dedent(n) if n != 1)));
        let dedents = tokens
            .iter()
            .filter(|t| matches!(t.kind, TokenKind::Dedent(_)))
            .count();
        assert_eq!(dedents, 3);
    }

    #[test]
    fn test_comment_tokens() {
        let tokens = tokenize("# yarn lockfile v1\n\nfoo bar").unwrap();
        assert_eq!(
            tokens[0],
            Token::new(TokenKind::Comment("# yarn lockfile v1".to_string()), 1)
        );
        assert_eq!(tokens[1], Token::new(TokenKind::Newline, 1));
        assert_eq!(tokens[2].line, 3);
    }
}
