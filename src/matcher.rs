//! Matcher trees: leaves, sequences and alternations under greedy repetition.
//!
//! All offsets and lengths are **character** (not byte) counts.
//!
//! Every matcher has a single attempt (match a literal, test one character,
//! run all children in order, or take the first child that succeeds) which
//! is repeated greedily within its [`Bounds`]. Nothing backtracks: a failed
//! attempt ends the repetition and whatever was matched so far stands.

use std::sync::Arc;

use log::{debug, trace};
use thiserror::Error;

use crate::bounds::{Bounds, BoundsError};
use crate::pattern::{Attempt, CharClass, ClassError, Pattern, Predicate, class_matches};
use crate::token::Token;

/// Errors raised while building a matcher tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("literal pattern must not be empty")]
    EmptyLiteral,
    #[error("{0} needs at least one child matcher")]
    NoChildren(&'static str),
    #[error(transparent)]
    Bounds(#[from] BoundsError),
    #[error(transparent)]
    Class(#[from] ClassError),
}

/// The outcome of applying a matcher to the start of an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    /// No match. Nothing is consumed.
    Fail,
    /// `len` characters were consumed, captured as `token`.
    ///
    /// `len` may be 0 when the matcher allows zero repeats; `token` is then
    /// an empty group.
    Matched { len: usize, token: Token },
}

impl MatchResult {
    pub fn is_match(&self) -> bool {
        matches!(self, MatchResult::Matched { .. })
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, MatchResult::Fail)
    }

    /// Characters consumed; 0 on failure.
    pub fn consumed(&self) -> usize {
        match self {
            MatchResult::Fail => 0,
            MatchResult::Matched { len, .. } => *len,
        }
    }

    pub fn token(&self) -> Option<&Token> {
        match self {
            MatchResult::Fail => None,
            MatchResult::Matched { token, .. } => Some(token),
        }
    }

    /// Split into `(consumed, token)`, with `None` standing for failure.
    pub fn into_parts(self) -> (usize, Option<Token>) {
        match self {
            MatchResult::Fail => (0, None),
            MatchResult::Matched { len, token } => (len, Some(token)),
        }
    }
}

/// A match located by [`Matcher::find`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Found {
    /// Character offset where the match begins.
    pub start: usize,
    /// Characters consumed from `start`.
    pub len: usize,
    pub token: Token,
}

/// A node in an immutable matcher tree.
///
/// Cloning is cheap and shares the tree, so one matcher can be a child of
/// several parents and be applied from several threads at once.
#[derive(Debug, Clone)]
pub struct Matcher {
    node: Arc<Node>,
}

#[derive(Debug)]
enum Node {
    Literal {
        text: String,
        chars: Vec<char>,
        bounds: Bounds,
    },
    Char {
        test: CharTest,
        bounds: Bounds,
    },
    Sequence {
        children: Vec<Matcher>,
        bounds: Bounds,
    },
    Any {
        children: Vec<Matcher>,
        bounds: Bounds,
    },
    Custom {
        attempt: Attempt,
        bounds: Bounds,
    },
}

#[derive(Debug)]
enum CharTest {
    Class(CharClass),
    Predicate(Predicate),
}

impl CharTest {
    fn accepts(&self, ch: char) -> bool {
        match self {
            CharTest::Class(class) => class_matches(class, ch),
            CharTest::Predicate(pred) => pred.test(ch),
        }
    }
}

// ─── Construction ────────────────────────────────────────────────────────────

/// Build a matcher for a literal, a single-character test or a caller's own
/// single attempt.
pub fn match_pattern(pattern: Pattern, bounds: Bounds) -> Result<Matcher, BuildError> {
    let bounds = bounds.validate()?;
    let node = match pattern {
        Pattern::Literal(text) => {
            if text.is_empty() {
                debug!("rejected empty literal pattern");
                return Err(BuildError::EmptyLiteral);
            }
            let chars = text.chars().collect();
            Node::Literal {
                text,
                chars,
                bounds,
            }
        }
        Pattern::Class(class) => Node::Char {
            test: CharTest::Class(class),
            bounds,
        },
        Pattern::Predicate(pred) => Node::Char {
            test: CharTest::Predicate(pred),
            bounds,
        },
        Pattern::Attempt(attempt) => Node::Custom { attempt, bounds },
    };
    Ok(Matcher::from_node(node))
}

/// Build a matcher whose attempt runs every child in order.
pub fn sequence(children: Vec<Matcher>, bounds: Bounds) -> Result<Matcher, BuildError> {
    let bounds = bounds.validate()?;
    if children.is_empty() {
        debug!("rejected sequence with no children");
        return Err(BuildError::NoChildren("sequence"));
    }
    Ok(Matcher::from_node(Node::Sequence { children, bounds }))
}

/// Build a matcher whose attempt takes the first child that succeeds.
pub fn any(children: Vec<Matcher>, bounds: Bounds) -> Result<Matcher, BuildError> {
    let bounds = bounds.validate()?;
    if children.is_empty() {
        debug!("rejected alternation with no children");
        return Err(BuildError::NoChildren("any"));
    }
    Ok(Matcher::from_node(Node::Any { children, bounds }))
}

// ─── Application ─────────────────────────────────────────────────────────────

impl Matcher {
    fn from_node(node: Node) -> Self {
        Self {
            node: Arc::new(node),
        }
    }

    pub fn bounds(&self) -> Bounds {
        match &*self.node {
            Node::Literal { bounds, .. }
            | Node::Char { bounds, .. }
            | Node::Sequence { bounds, .. }
            | Node::Any { bounds, .. }
            | Node::Custom { bounds, .. } => *bounds,
        }
    }

    /// Short name of the node kind, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match &*self.node {
            Node::Literal { .. } => "literal",
            Node::Char { .. } => "char",
            Node::Sequence { .. } => "sequence",
            Node::Any { .. } => "any",
            Node::Custom { .. } => "custom",
        }
    }

    /// Match against the start of `input`.
    pub fn apply(&self, input: &str) -> MatchResult {
        let chars: Vec<char> = input.chars().collect();
        let result = self.apply_chars(&chars);
        trace!(
            "{} matcher over {} chars: {}",
            self.kind(),
            chars.len(),
            match &result {
                MatchResult::Fail => "fail".to_string(),
                MatchResult::Matched { len, .. } => format!("matched {len}"),
            }
        );
        result
    }

    /// Match against the start of an already split input.
    pub fn apply_chars(&self, input: &[char]) -> MatchResult {
        match &*self.node {
            Node::Literal {
                text,
                chars,
                bounds,
            } => repeat(*bounds, input, |rest| match_literal(text, chars, rest)),
            Node::Char { test, bounds } => repeat(*bounds, input, |rest| match_char(test, rest)),
            Node::Sequence { children, bounds } => {
                repeat(*bounds, input, |rest| match_sequence(children, rest))
            }
            Node::Any { children, bounds } => {
                repeat(*bounds, input, |rest| match_any(children, rest))
            }
            Node::Custom { attempt, bounds } => {
                repeat(*bounds, input, |rest| match_custom(attempt, rest))
            }
        }
    }

    /// Find the leftmost offset where this matcher consumes at least one
    /// character.
    pub fn find(&self, input: &str) -> Option<Found> {
        let chars: Vec<char> = input.chars().collect();
        let found = (0..chars.len()).find_map(|start| match self.apply_chars(&chars[start..]) {
            MatchResult::Matched { len, token } if len > 0 => Some(Found { start, len, token }),
            _ => None,
        });
        trace!(
            "{} matcher search over {} chars: {:?}",
            self.kind(),
            chars.len(),
            found.as_ref().map(|f| (f.start, f.len))
        );
        found
    }
}

// ─── Repetition ──────────────────────────────────────────────────────────────

/// Greedily repeat `attempt` within `bounds`, starting at offset 0.
///
/// Stops at end of input, at the maximum, or on the first failed attempt.
/// Fewer repeats than the minimum fails the whole application.
///
/// An attempt that consumes nothing leaves the offset where it was, so every
/// later attempt would give the same token. Those repeats are filled in
/// directly: up to the maximum, or up to the minimum when unbounded.
fn repeat(
    bounds: Bounds,
    input: &[char],
    mut attempt: impl FnMut(&[char]) -> MatchResult,
) -> MatchResult {
    let mut offset = 0usize;
    let mut repeats = Vec::new();

    while offset < input.len() && bounds.allows_another(repeats.len()) {
        match attempt(&input[offset..]) {
            MatchResult::Fail => break,
            MatchResult::Matched { len: 0, token } => {
                let target = match bounds {
                    Bounds::Bounded { max, .. } => max,
                    Bounds::AtLeast(min) => min.max(repeats.len() + 1),
                };
                repeats.resize(target, token);
                break;
            }
            MatchResult::Matched { len, token } => {
                repeats.push(token);
                offset += len;
            }
        }
    }

    if !bounds.satisfied_by(repeats.len()) {
        return MatchResult::Fail;
    }
    MatchResult::Matched {
        len: offset,
        token: Token::from_repeats(repeats),
    }
}

// ─── Single attempts ─────────────────────────────────────────────────────────

fn match_literal(text: &str, chars: &[char], input: &[char]) -> MatchResult {
    if input.starts_with(chars) {
        MatchResult::Matched {
            len: chars.len(),
            token: Token::leaf(text),
        }
    } else {
        MatchResult::Fail
    }
}

fn match_char(test: &CharTest, input: &[char]) -> MatchResult {
    match input.first() {
        Some(&ch) if test.accepts(ch) => MatchResult::Matched {
            len: 1,
            token: Token::from(ch),
        },
        _ => MatchResult::Fail,
    }
}

/// All children in order over consecutive spans; one slot per child.
fn match_sequence(children: &[Matcher], input: &[char]) -> MatchResult {
    let mut offset = 0usize;
    let mut slots = Vec::with_capacity(children.len());
    for child in children {
        match child.apply_chars(&input[offset..]) {
            MatchResult::Fail => return MatchResult::Fail,
            MatchResult::Matched { len, token } => {
                offset += len;
                slots.push(token);
            }
        }
    }
    MatchResult::Matched {
        len: offset,
        token: Token::Group(slots),
    }
}

/// First child to succeed wins.
fn match_any(children: &[Matcher], input: &[char]) -> MatchResult {
    children
        .iter()
        .map(|child| child.apply_chars(input))
        .find(MatchResult::is_match)
        .unwrap_or(MatchResult::Fail)
}

/// Run a caller-supplied attempt, refusing lengths past the end of input.
fn match_custom(attempt: &Attempt, input: &[char]) -> MatchResult {
    match attempt.run(input) {
        MatchResult::Matched { len, .. } if len > input.len() => {
            debug!("custom attempt claimed {len} of {} chars", input.len());
            MatchResult::Fail
        }
        result => result,
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
