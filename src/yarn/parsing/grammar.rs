//! Lockfile grammar written with chumsky combinators
//!
//!     lockfile := block* EOI
//!     block    := title members DEDENT | pair | comment
//!     title    := STRING (COMMA STRING)* COLON NEWLINE INDENT
//!     members  := (title members DEDENT | pair)+
//!     pair     := STRING COLON? (STRING | NUMBER | BOOLEAN) NEWLINE
//!     comment  := COMMENT NEWLINE
//!
//!     The token stream is already normalized, so every DEDENT closes exactly one title.
//!     Entries are folded into an insertion-ordered [Mapping]: a repeated key overwrites the
//!     earlier value in place. Comments are only recognized between top-level blocks and are
//!     collected on the side.

use chumsky::prelude::*;

use super::Parsed;
use crate::yarn::lexing::{Token, TokenKind};
use crate::yarn::value::{Mapping, Value};

/// Type alias for parser error
pub(crate) type ParserError = Simple<Token>;

enum Block {
    Entry(String, Value),
    Comment(String),
}

/// Record the token kinds a primitive accepts in its errors. chumsky leaves the expected set
/// empty when a filter runs into end of input.
fn expecting<O>(
    parser: impl Parser<Token, O, Error = ParserError> + Clone,
    kinds: Vec<TokenKind>,
) -> impl Parser<Token, O, Error = ParserError> + Clone {
    parser.map_err(move |err: ParserError| {
        let hint = Simple::expected_input_found(
            err.span(),
            kinds.iter().cloned().map(|kind| Some(Token::new(kind, 0))),
            err.found().cloned(),
        );
        err.merge(hint)
    })
}

fn string() -> impl Parser<Token, String, Error = ParserError> + Clone {
    let parser = filter_map(|span, token: Token| match token.kind {
        TokenKind::String(s) => Ok(s),
        _ => Err(Simple::expected_input_found(span, Vec::new(), Some(token))),
    });
    expecting(parser, vec![TokenKind::String(String::new())]).labelled("STRING")
}

fn scalar() -> impl Parser<Token, Value, Error = ParserError> + Clone {
    let parser = filter_map(|span, token: Token| match token.kind {
        TokenKind::String(s) => Ok(Value::String(s)),
        TokenKind::Number(n) => Ok(Value::Integer(n)),
        TokenKind::Boolean(b) => Ok(Value::Boolean(b)),
        _ => Err(Simple::expected_input_found(span, Vec::new(), Some(token))),
    });
    expecting(
        parser,
        vec![
            TokenKind::String(String::new()),
            TokenKind::Number(0),
            TokenKind::Boolean(false),
        ],
    )
    .labelled("value")
}

fn comment() -> impl Parser<Token, String, Error = ParserError> + Clone {
    let parser = filter_map(|span, token: Token| match token.kind {
        TokenKind::Comment(c) => Ok(c),
        _ => Err(Simple::expected_input_found(span, Vec::new(), Some(token))),
    });
    expecting(parser, vec![TokenKind::Comment(String::new())])
        .labelled("COMMENT")
        .then_ignore(newline())
}

/// A single token of the given shape.
fn punct(
    kind: TokenKind,
    label: &'static str,
) -> impl Parser<Token, (), Error = ParserError> + Clone {
    let expected = kind.clone();
    let parser = filter(move |t: &Token| match (&t.kind, &expected) {
        (TokenKind::Indent(_), TokenKind::Indent(_)) => true,
        (actual, expected) => actual == expected,
    })
    .ignored();
    expecting(parser, vec![kind]).labelled(label)
}

fn colon() -> impl Parser<Token, (), Error = ParserError> + Clone {
    punct(TokenKind::Colon, "COLON")
}

fn comma() -> impl Parser<Token, (), Error = ParserError> + Clone {
    punct(TokenKind::Comma, "COMMA")
}

fn newline() -> impl Parser<Token, (), Error = ParserError> + Clone {
    punct(TokenKind::Newline, "NEWLINE")
}

fn indent() -> impl Parser<Token, (), Error = ParserError> + Clone {
    punct(TokenKind::Indent(1), "INDENT")
}

fn dedent() -> impl Parser<Token, (), Error = ParserError> + Clone {
    punct(TokenKind::Dedent(1), "DEDENT")
}

/// `foo "bar"` or `foo: "bar"`, ending its line.
fn pair() -> impl Parser<Token, (String, Value), Error = ParserError> + Clone {
    string()
        .then_ignore(colon().or_not())
        .then(scalar())
        .then_ignore(newline())
}

/// `foo:` or `foo, bar:` on a line of its own, followed by the INDENT that opens its members.
/// A list of keys is joined with `", "`.
fn title() -> impl Parser<Token, String, Error = ParserError> + Clone {
    string()
        .separated_by(comma())
        .at_least(1)
        .map(|keys| keys.join(", "))
        .then_ignore(colon())
        .then_ignore(newline())
        .then_ignore(indent())
}

fn members() -> impl Parser<Token, Mapping, Error = ParserError> + Clone {
    recursive(|members| {
        let nested = title()
            .then(members)
            .then_ignore(dedent())
            .map(|(key, children)| (key, Value::Mapping(children)));

        nested
            .or(pair())
            .repeated()
            .at_least(1)
            .map(|entries| entries.into_iter().collect::<Mapping>())
    })
}

fn block() -> impl Parser<Token, Block, Error = ParserError> + Clone {
    let nested = title()
        .then(members())
        .then_ignore(dedent())
        .map(|(key, children)| Block::Entry(key, Value::Mapping(children)));

    choice((
        nested,
        pair().map(|(key, value)| Block::Entry(key, value)),
        comment().map(Block::Comment),
    ))
}

/// The whole-document parser.
pub(crate) fn lockfile() -> impl Parser<Token, Parsed, Error = ParserError> + Clone {
    block().repeated().then_ignore(end()).map(|blocks| {
        let mut parsed = Parsed::default();
        for block in blocks {
            match block {
                Block::Entry(key, value) => {
                    parsed.data.insert(key, value);
                }
                Block::Comment(text) => parsed.comments.push(text),
            }
        }
        parsed
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping;
    use crate::yarn::lexing::tokenize_normalized;

    fn run(source: &str) -> Result<Parsed, Vec<ParserError>> {
        let tokens = tokenize_normalized(source).expect("lex failed");
        lockfile().parse(tokens)
    }

    #[test]
    fn test_pair_forms() {
        assert_eq!(run(r#"foo "bar""#).unwrap().data, mapping! { "foo" => "bar" });
        assert_eq!(run(r#"foo: "bar""#).unwrap().data, mapping! { "foo" => "bar" });
        assert_eq!(run("foo 42").unwrap().data, mapping! { "foo" => 42u64 });
        assert_eq!(run("foo true").unwrap().data, mapping! { "foo" => true });
    }

    #[test]
    fn test_title_list_is_joined() {
        let parsed = run("a@^1, a@^2:\n  version \"1.0.0\"").unwrap();
        assert_eq!(
            parsed.data,
            mapping! { "a@^1, a@^2" => mapping! { "version" => "1.0.0" } }
        );
    }

    #[test]
    fn test_members_merge_nested_titles() {
        let parsed = run("foo:\n  a b\n  bar:\n    c d\n  e f").unwrap();
        assert_eq!(
            parsed.data,
            mapping! {
                "foo" => mapping! {
                    "a" => "b",
                    "bar" => mapping! { "c" => "d" },
                    "e" => "f",
                }
            }
        );
    }

    #[test]
    fn test_comments_are_collected_separately() {
        let parsed = run("# first\nfoo bar\n## second").unwrap();
        assert_eq!(parsed.data, mapping! { "foo" => "bar" });
        assert_eq!(parsed.comments, vec!["# first", "## second"]);
    }

    #[test]
    fn test_title_without_members_fails() {
        assert!(run("foo:").is_err());
        assert!(run("foo:\nbar baz").is_err());
    }

    #[test]
    fn test_pair_ends_at_line_break() {
        assert!(run("foo \"a\" bar \"b\"\n").is_err());
        assert!(run("foo\n\"bar\"\n").is_err());
        assert!(run("foo:\n  bar:\n  baz\n").is_err());
    }

    #[test]
    fn test_title_must_end_its_line() {
        assert!(run("foo: bar:\n  a b\n").is_err());
        assert!(run("foo bar:\n  a b\n").is_err());
    }

    #[test]
    fn test_end_of_input_lists_expected_kinds() {
        let errors = run("foo:").unwrap_err();
        let expected: Vec<_> = errors[0]
            .expected()
            .flatten()
            .map(|token| token.kind.name())
            .collect();
        assert_eq!(errors[0].found(), None);
        assert!(expected.contains(&"INDENT"), "{expected:?}");

        let errors = run("foo").unwrap_err();
        let expected: Vec<_> = errors[0]
            .expected()
            .flatten()
            .map(|token| token.kind.name())
            .collect();
        assert!(expected.contains(&"STRING"), "{expected:?}");
        assert!(expected.contains(&"COLON"), "{expected:?}");
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(run("").unwrap(), Parsed::default());
    }
}
