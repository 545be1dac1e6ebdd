//! Repetition bounds for matchers.
//!
//! Every matcher repeats its single attempt greedily between a minimum and an
//! optional maximum number of times. "No upper limit" is its own variant.

use std::str::FromStr;

use thiserror::Error;

/// How many times a matcher's single attempt may be repeated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bounds {
    /// Between `min` and `max` repeats, inclusive.
    Bounded { min: usize, max: usize },
    /// At least `n` repeats, no upper limit.
    AtLeast(usize),
}

/// Errors from building or parsing [`Bounds`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoundsError {
    #[error("minimum {min} exceeds maximum {max}")]
    MinExceedsMax { min: usize, max: usize },
    #[error("invalid number in quantifier")]
    InvalidNumber,
    #[error("unexpected character in quantifier: {0:?}")]
    UnexpectedChar(char),
    #[error("unclosed quantifier")]
    Unclosed,
    #[error("empty quantifier")]
    Empty,
}

impl Default for Bounds {
    /// One or more, greedily.
    fn default() -> Self {
        Self::ONE_OR_MORE
    }
}

impl Bounds {
    /// `'*'`: zero or more.
    pub const ZERO_OR_MORE: Bounds = Bounds::AtLeast(0);
    /// `'+'`: one or more.
    pub const ONE_OR_MORE: Bounds = Bounds::AtLeast(1);
    /// `'?'`: zero or one.
    pub const OPTIONAL: Bounds = Bounds::Bounded { min: 0, max: 1 };

    /// Between `min` and `max` repeats. Fails if `min > max`.
    pub fn new(min: usize, max: usize) -> Result<Self, BoundsError> {
        if min > max {
            return Err(BoundsError::MinExceedsMax { min, max });
        }
        Ok(Self::Bounded { min, max })
    }

    pub fn at_least(min: usize) -> Self {
        Self::AtLeast(min)
    }

    pub fn exactly(n: usize) -> Self {
        Self::Bounded { min: n, max: n }
    }

    pub fn min(&self) -> usize {
        match *self {
            Self::Bounded { min, .. } | Self::AtLeast(min) => min,
        }
    }

    /// `None` when unbounded.
    pub fn max(&self) -> Option<usize> {
        match *self {
            Self::Bounded { max, .. } => Some(max),
            Self::AtLeast(_) => None,
        }
    }

    /// True if another attempt may follow `count` recorded repeats.
    pub fn allows_another(&self, count: usize) -> bool {
        self.max().is_none_or(|max| count < max)
    }

    /// True if `count` repeats meet the minimum.
    pub fn satisfied_by(&self, count: usize) -> bool {
        count >= self.min()
    }

    /// Reject hand-built `Bounded` values whose minimum exceeds the maximum.
    pub fn validate(self) -> Result<Self, BoundsError> {
        match self {
            Self::Bounded { min, max } => Self::new(min, max),
            Self::AtLeast(_) => Ok(self),
        }
    }
}

impl FromStr for Bounds {
    type Err = BoundsError;

    /// Parse a quantifier.
    ///
    /// | Text             | Bounds            |
    /// |------------------|-------------------|
    /// | `*`              | zero or more      |
    /// | `+`              | one or more       |
    /// | `?`              | zero or one       |
    /// | `n` / `n,`       | at least n        |
    /// | `,m`             | between 0 and m   |
    /// | `n,m`            | between n and m   |
    ///
    /// The numeric forms may be wrapped in `[...]` or `{...}`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "" => return Err(BoundsError::Empty),
            "*" => return Ok(Self::ZERO_OR_MORE),
            "+" => return Ok(Self::ONE_OR_MORE),
            "?" => return Ok(Self::OPTIONAL),
            _ => {}
        }
        let inner = unwrap_brackets(s)?;
        parse_range(inner)
    }
}

/// Strip one matching pair of `[]` or `{}`.
fn unwrap_brackets(s: &str) -> Result<&str, BoundsError> {
    for (open, close) in [('[', ']'), ('{', '}')] {
        if let Some(rest) = s.strip_prefix(open) {
            return rest.strip_suffix(close).ok_or(BoundsError::Unclosed);
        }
    }
    Ok(s)
}

fn parse_range(s: &str) -> Result<Bounds, BoundsError> {
    let (first, second) = match s.split_once(',') {
        Some((a, b)) => (parse_number(a)?, Some(parse_number(b)?)),
        None => (parse_number(s)?, None),
    };
    match (first, second) {
        (None, None) => Err(BoundsError::Empty),
        (Some(n), None) => Ok(Bounds::AtLeast(n)),
        (None, Some(None)) => Ok(Bounds::ZERO_OR_MORE), // ","
        (Some(n), Some(None)) => Ok(Bounds::AtLeast(n)),
        (None, Some(Some(m))) => Bounds::new(0, m),
        (Some(n), Some(Some(m))) => Bounds::new(n, m),
    }
}

/// Parse an optional decimal number; blank text is `None`.
fn parse_number(s: &str) -> Result<Option<usize>, BoundsError> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }
    if let Some(c) = s.chars().find(|c| !c.is_ascii_digit()) {
        return Err(BoundsError::UnexpectedChar(c));
    }
    s.parse::<usize>()
        .map(Some)
        .map_err(|_| BoundsError::InvalidNumber)
}
