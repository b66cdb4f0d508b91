//! Lexer session
//!
//!     The logos table knows nothing about nesting. This session wraps it and owns the state
//!     that makes the format off-side: the current indentation level and the line counter.
//!     Every collapsed line break that ends a non-blank line first yields a NEWLINE, then is
//!     compared against the current level:
//!
//!         - one level deeper: emit INDENT(new level)
//!         - same level: emit nothing
//!         - shallower: emit a single DEDENT carrying the number of levels closed
//!         - more than one level deeper: fatal [LexError::IndentationJump]
//!
//!     Blank lines and leading line breaks yield no NEWLINE. Indentation is counted in units of
//!     two spaces, odd spaces are dropped. At end of input a final line break is synthesized: an
//!     unterminated last line still gets its NEWLINE, and the sum of DEDENT deltas always equals
//!     the sum of INDENT increments.
//!
//!     Sessions are single use. Once exhausted, or after the first error, they only return
//!     `None`.

use super::tokens::{LineBreak, RawToken, Token, TokenKind};
use super::TokenSource;
use crate::yarn::error::LexError;
use logos::Logos;
use std::cmp::Ordering;

pub struct Lexer<'src> {
    source: &'src str,
    raw: logos::Lexer<'src, RawToken>,
    level: usize,
    line: usize,
    // A token was read since the last NEWLINE
    line_open: bool,
    // Indentation event waiting behind a NEWLINE
    queued: Option<Token>,
    exhausted: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Lexer {
            source,
            raw: RawToken::lexer(source),
            level: 0,
            line: 1,
            line_open: false,
            queued: None,
            exhausted: false,
        }
    }

    /// Current indentation level.
    pub fn level(&self) -> usize {
        self.level
    }

    /// Line the session is currently on (1-based).
    pub fn line(&self) -> usize {
        self.line
    }

    /// NEWLINE for the line that just ended, if any, then the indentation event.
    fn line_end(&mut self, brk: LineBreak) -> Result<Option<Token>, LexError> {
        let newline = self
            .line_open
            .then(|| Token::new(TokenKind::Newline, self.line));
        self.line_open = false;

        let indentation = self
            .line_break(brk)?
            .map(|kind| Token::new(kind, self.line));
        match newline {
            Some(newline) => {
                self.queued = indentation;
                Ok(Some(newline))
            }
            None => Ok(indentation),
        }
    }

    fn digits(&self, digits: String) -> TokenKind {
        match digits.parse::<u64>() {
            Ok(n) => TokenKind::Number(n),
            Err(_) => {
                tracing::debug!(line = self.line, "number out of range, read as a string");
                TokenKind::String(digits)
            }
        }
    }

    fn line_break(&mut self, brk: LineBreak) -> Result<Option<TokenKind>, LexError> {
        self.line += brk.newlines;

        // A break that runs into end of input closes everything; trailing spaces open nothing
        let target = if self.raw.remainder().is_empty() {
            0
        } else {
            brk.width / 2
        };

        match target.cmp(&self.level) {
            Ordering::Greater if target == self.level + 1 => {
                tracing::trace!(line = self.line, level = target, "indent");
                self.level = target;
                Ok(Some(TokenKind::Indent(target)))
            }
            Ordering::Greater => Err(LexError::IndentationJump {
                line: self.line,
                from: self.level,
                to: target,
            }),
            Ordering::Equal => Ok(None),
            Ordering::Less => {
                let delta = self.level - target;
                tracing::trace!(line = self.line, level = target, delta, "dedent");
                self.level = target;
                Ok(Some(TokenKind::Dedent(delta)))
            }
        }
    }

    fn invalid_token(&self) -> LexError {
        let rest = &self.source[self.raw.span().start..];
        let text = rest.split('\n').next().unwrap_or_default();
        LexError::InvalidToken {
            line: self.line,
            text: text.trim_end_matches('\r').to_string(),
        }
    }

    fn fail(&mut self, err: LexError) -> Result<Option<Token>, LexError> {
        self.exhausted = true;
        Err(err)
    }
}

impl TokenSource for Lexer<'_> {
    fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        if let Some(token) = self.queued.take() {
            return Ok(Some(token));
        }
        if self.exhausted {
            return Ok(None);
        }

        loop {
            let raw = match self.raw.next() {
                Some(Ok(raw)) => raw,
                Some(Err(())) => {
                    let err = self.invalid_token();
                    return self.fail(err);
                }
                None => {
                    self.exhausted = true;
                    return self.line_end(LineBreak::END);
                }
            };

            let kind = match raw {
                RawToken::LineBreak(brk) => match self.line_end(brk) {
                    Ok(Some(token)) => return Ok(Some(token)),
                    Ok(None) => continue,
                    Err(err) => return self.fail(err),
                },
                RawToken::Digits(digits) => self.digits(digits),
                RawToken::Boolean(b) => TokenKind::Boolean(b),
                RawToken::String(s) => TokenKind::String(s),
                RawToken::Comment(c) => TokenKind::Comment(c),
                RawToken::Comma => TokenKind::Comma,
                RawToken::Colon => TokenKind::Colon,
            };

            self.line_open = true;
            return Ok(Some(Token::new(kind, self.line)));
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}
