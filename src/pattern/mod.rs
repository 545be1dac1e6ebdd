//! Leaf patterns: literal strings, single-character tests and caller-written
//! attempts.
//!
//! A leaf matcher is built from a [`Pattern`], which the caller picks
//! explicitly:
//!
//! ```rust
//! use tokmatch::{MatchResult, Pattern, Token};
//!
//! let quote = Pattern::literal("\"");
//! let digit = Pattern::class(r"\d").unwrap();
//! let vowel = Pattern::predicate(|c| "aeiou".contains(c));
//! let crlf = Pattern::attempt(|input| match input {
//!     ['\r', '\n', ..] => MatchResult::Matched { len: 2, token: Token::leaf("\r\n") },
//!     _ => MatchResult::Fail,
//! });
//! # let _ = (quote, digit, vowel, crlf);
//! ```

pub mod ast;
pub mod char_class;
pub mod parser;

pub use ast::{Attempt, CharClass, ClassItem, NamedClass, Pattern, Predicate};
pub use char_class::class_matches;
pub use parser::{ClassError, parse_class};

use crate::matcher::{MatchResult, Matcher};

impl Pattern {
    pub fn literal(text: impl Into<String>) -> Self {
        Pattern::Literal(text.into())
    }

    /// Parse a regex-style class such as `[a-z]`, `\d` or `/[+*/-]/`.
    pub fn class(source: &str) -> Result<Self, ClassError> {
        parse_class(source).map(Pattern::Class)
    }

    pub fn predicate(f: impl Fn(char) -> bool + Send + Sync + 'static) -> Self {
        Pattern::Predicate(Predicate::new(f))
    }

    /// Use `f` as the single attempt, repeated within the matcher's bounds.
    pub fn attempt(f: impl Fn(&[char]) -> MatchResult + Send + Sync + 'static) -> Self {
        Pattern::Attempt(Attempt::new(f))
    }

    /// Treat a whole application of `matcher` as one attempt, so it can be
    /// repeated under new bounds.
    pub fn from_matcher(matcher: Matcher) -> Self {
        Pattern::attempt(move |input| matcher.apply_chars(input))
    }
}

impl From<CharClass> for Pattern {
    fn from(class: CharClass) -> Self {
        Pattern::Class(class)
    }
}

impl From<Matcher> for Pattern {
    fn from(matcher: Matcher) -> Self {
        Pattern::from_matcher(matcher)
    }
}
