//! # yarn-lockfile
//!
//! A parser and serializer for the yarn v1 lockfile format.
//!
//! File Layout
//!
//!     Everything lives under the [yarn] module, split the same way the data flows:
//!
//!     src/yarn
//!       ├── lexing       Logos token table, the indentation-aware lexer session and the
//!       │                indent normalizer that splits multi-level dedents
//!       ├── parsing      The chumsky grammar that turns tokens into a nested mapping
//!       ├── value        The closed value variant (string, integer, boolean, mapping)
//!       ├── lockfile     Version validation and the owned mapping
//!       ├── package      Package records derived from top-level entries
//!       ├── serializer   Canonical text output
//!       └── loader       Reading and writing lockfiles on disk
//!
//!     text -> Lexer -> IndentNormalizer -> grammar -> Parsed -> Lockfile -> packages | text

pub mod yarn;

pub use yarn::error::{Error, LexError, ParseError, ValidationError};
pub use yarn::lockfile::{Lockfile, Version};
pub use yarn::package::Package;
pub use yarn::parsing::{parse, Parsed};
pub use yarn::value::{Mapping, Value};
