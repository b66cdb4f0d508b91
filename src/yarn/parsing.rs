//! Parser
//!
//!     Consumes the normalized token stream and produces the nested mapping plus the list of
//!     top-level comments. See [grammar](grammar) for the productions.
//!
//!     Tokens are pulled lazily: the lexer session is wrapped in an iterator that chumsky
//!     drains on demand, so nothing past the point of failure is ever tokenized. A lexing error
//!     ends the stream and takes precedence over whatever the grammar made of the truncated
//!     input.

pub mod grammar;

use chumsky::{Parser, Stream};

use crate::yarn::error::{Error, ParseError};
use crate::yarn::lexing::{token_stream, Token, TokenSource};
use crate::yarn::value::Mapping;
use grammar::ParserError;

/// Output of a successful parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parsed {
    pub data: Mapping,
    /// Raw comment lines in source order, `#` markers included.
    pub comments: Vec<String>,
}

/// Parse lockfile text into a [Parsed] tree.
pub fn parse(source: &str) -> Result<Parsed, Error> {
    let mut tokens = token_stream(source);
    let mut lex_error = None;

    let last_line = source.lines().count().max(1);
    let stream = Stream::from_iter(
        last_line..last_line,
        std::iter::from_fn(|| match tokens.next_token() {
            Ok(Some(token)) => {
                let line = token.line;
                Some((token, line..line + 1))
            }
            Ok(None) => None,
            Err(err) => {
                lex_error = Some(err);
                None
            }
        }),
    );

    let result = grammar::lockfile().parse(stream);

    if let Some(err) = lex_error {
        return Err(err.into());
    }

    let parsed = result.map_err(|errors| to_parse_error(&errors))?;
    tracing::debug!(
        entries = parsed.data.len(),
        comments = parsed.comments.len(),
        "parsed lockfile"
    );
    Ok(parsed)
}

fn to_parse_error(errors: &[ParserError]) -> ParseError {
    let Some(err) = errors.first() else {
        return ParseError {
            line: None,
            found: None,
            expected: Vec::new(),
        };
    };

    let found: Option<&Token> = err.found();
    let mut expected: Vec<String> = err
        .expected()
        .map(|token| match token {
            Some(token) => token.kind.name().to_string(),
            None => "end of input".to_string(),
        })
        .chain(err.label().map(str::to_string))
        .collect();
    expected.sort();
    expected.dedup();

    ParseError {
        line: found.map(|token| token.line),
        found: found.map(|token| token.kind.to_string()),
        expected,
    }
}
