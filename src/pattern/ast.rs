//! Types describing leaf patterns.

use std::fmt;
use std::sync::Arc;

use crate::matcher::MatchResult;

/// What a leaf matcher tests on each attempt.
///
/// Chosen explicitly by the caller when the matcher is built.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// An exact literal string.
    Literal(String),
    /// A single character tested against a character class.
    Class(CharClass),
    /// A single character tested against an arbitrary predicate.
    Predicate(Predicate),
    /// A caller-written single attempt over the remaining input.
    Attempt(Attempt),
}

/// A single-character class, e.g. `[a-z]` or `\d`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharClass {
    pub negated: bool,
    pub items: Vec<ClassItem>,
}

impl CharClass {
    pub fn new(items: Vec<ClassItem>) -> Self {
        Self {
            negated: false,
            items,
        }
    }

    pub fn negate(mut self) -> Self {
        self.negated = !self.negated;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassItem {
    Single(char),
    Range(char, char),
    Named(NamedClass),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedClass {
    Any,   // .         anything but '\n'
    Digit, // \d        ASCII digit
    Word,  // \w        alphanumeric or '_'
    Space, // \s        whitespace
    Alpha, // [:alpha:]
    Upper, // [:upper:]
    Lower, // [:lower:]
    Alnum, // [:alnum:]
    Punct, // [:punct:] ASCII punctuation
    Print, // [:print:] 0x20..0x7E
}

/// A shareable character predicate.
#[derive(Clone)]
pub struct Predicate(Arc<dyn Fn(char) -> bool + Send + Sync>);

impl Predicate {
    pub fn new(f: impl Fn(char) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn test(&self, ch: char) -> bool {
        (self.0)(ch)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}

/// A shareable single attempt: given the remaining input, consume some
/// prefix of it or fail.
#[derive(Clone)]
pub struct Attempt(Arc<dyn Fn(&[char]) -> MatchResult + Send + Sync>);

impl Attempt {
    pub fn new(f: impl Fn(&[char]) -> MatchResult + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn run(&self, input: &[char]) -> MatchResult {
        (self.0)(input)
    }
}

impl fmt::Debug for Attempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Attempt(..)")
    }
}
