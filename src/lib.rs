//! Greedy, non-backtracking pattern-matching combinators.
//!
//! Build a matcher tree from leaves ([`match_pattern`]) and combinators
//! ([`sequence`], [`any`]), then apply the root to an input. The result says
//! how many characters were consumed from the start of the input and what
//! was captured, or that nothing matched.
//!
//! # Example
//!
//! ```rust
//! use tokmatch::{Bounds, MatchResult, Pattern, Token, any, match_pattern, sequence};
//!
//! let digit = match_pattern(Pattern::class(r"\d")?, Bounds::default())?;
//! let space = match_pattern(Pattern::literal(" "), Bounds::ZERO_OR_MORE)?;
//! let op = match_pattern(Pattern::class("[+*/-]")?, Bounds::exactly(1))?;
//!
//! let expr = sequence(
//!     vec![digit.clone(), space.clone(), op, space, digit],
//!     Bounds::default(),
//! )?;
//!
//! assert_eq!(
//!     expr.apply("1+2"),
//!     MatchResult::Matched {
//!         len: 3,
//!         token: Token::group([
//!             Token::leaf("1"),
//!             Token::empty(),
//!             Token::leaf("+"),
//!             Token::empty(),
//!             Token::leaf("2"),
//!         ]),
//!     }
//! );
//! assert!(expr.apply("a|b").is_fail());
//!
//! let word_or_number = any(
//!     vec![
//!         match_pattern(Pattern::class("[a-zA-Z]")?, Bounds::default())?,
//!         match_pattern(Pattern::class("[0-9]")?, Bounds::default())?,
//!     ],
//!     "1,2".parse()?,
//! )?;
//! assert_eq!(word_or_number.apply("abc123!").consumed(), 6);
//! # Ok::<(), tokmatch::BuildError>(())
//! ```

pub mod bounds;
pub mod matcher;
pub mod pattern;
pub mod token;

pub use bounds::{Bounds, BoundsError};
pub use matcher::{BuildError, Found, MatchResult, Matcher, any, match_pattern, sequence};
pub use pattern::{Attempt, CharClass, ClassError, ClassItem, NamedClass, Pattern, Predicate};
pub use token::Token;
