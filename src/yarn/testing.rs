//! Testing utilities
//!
//!     Two kinds of helpers live here.
//!
//!     Token factories build expected token streams without spelling out every `TokenKind`
//!     constructor. See [factories].
//!
//!     Package assertions check a derived [Package](crate::yarn::package::Package) field by
//!     field with a fluent API, so a failing test names the field that differs:
//!
//!     ```rust,ignore
//!     use crate::yarn::testing::assert_package;
//!
//!     let pkg = lock.packages()?.remove(0);
//!     assert_package(&pkg)
//!         .name("breakfast")
//!         .version("2.0.0")
//!         .url(None)
//!         .path(None);
//!     ```
//!
//!     String fields can also be checked loosely through [TextMatch], e.g.
//!     `.url_matches(TextMatch::StartsWith("https://registry".into()))`.

mod matchers;
mod package_assertions;

pub use matchers::TextMatch;
pub use package_assertions::{assert_package, PackageAssertion};

// Public submodule path: crate::yarn::testing::factories
pub mod factories {
    use crate::yarn::lexing::{Token, TokenKind};

    /// A STRING token kind.
    pub fn string(s: &str) -> TokenKind {
        TokenKind::String(s.to_string())
    }

    /// Drop line numbers, keeping only the kinds.
    pub fn kinds(tokens: Vec<Token>) -> Vec<TokenKind> {
        tokens.into_iter().map(|token| token.kind).collect()
    }
}
