//! Indent normalizer
//!
//!     The grammar closes exactly one nesting level per DEDENT, but the lexer reports a return
//!     from level 3 to level 0 as a single DEDENT(3). This wrapper splits such tokens: it hands
//!     out one DEDENT(1) right away and parks the remaining ones on a LIFO stack that is drained
//!     before the wrapped source is asked for more tokens.

use super::tokens::{Token, TokenKind};
use super::TokenSource;
use crate::yarn::error::LexError;

pub struct IndentNormalizer<S> {
    inner: S,
    pending: Vec<Token>,
}

impl<S: TokenSource> IndentNormalizer<S> {
    pub fn new(inner: S) -> Self {
        IndentNormalizer {
            inner,
            pending: Vec::new(),
        }
    }

    /// Number of single-level dedents waiting to be handed out.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: TokenSource> TokenSource for IndentNormalizer<S> {
    fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        if let Some(token) = self.pending.pop() {
            return Ok(Some(token));
        }

        let Some(token) = self.inner.next_token()? else {
            return Ok(None);
        };

        match token.kind {
            TokenKind::Dedent(levels) if levels > 1 => {
                for _ in 1..levels {
                    self.pending
                        .push(Token::new(TokenKind::Dedent(1), token.line));
                }
                Ok(Some(Token::new(TokenKind::Dedent(1), token.line)))
            }
            _ => Ok(Some(token)),
        }
    }
}

impl<S: TokenSource> Iterator for IndentNormalizer<S> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}
