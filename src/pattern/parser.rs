//! Recursive descent parser for regex-style character classes.
//!
//! A class string describes exactly one character test:
//!
//! | Syntax        | Meaning                                     |
//! |---------------|---------------------------------------------|
//! | `x`           | The literal character `x`                   |
//! | `.`           | Any character except `\n`                   |
//! | `\d` `\w` `\s`| Digit, word, whitespace                     |
//! | `\D` `\W` `\S`| Negations of the above                      |
//! | `\n` `\t` `\r`| Control characters                          |
//! | `\.` `\[` ... | Escaped punctuation                         |
//! | `[abc]`       | Any of the listed characters                |
//! | `[a-z]`       | Character range                             |
//! | `[^...]`      | Negated set                                 |
//! | `[[:alpha:]]` | POSIX named class inside a set              |
//! | `/.../`       | Optional regex-literal delimiters           |

use std::iter::Peekable;
use std::str::Chars;

use phf::{Map, phf_map};
use thiserror::Error;

use super::ast::{CharClass, ClassItem, NamedClass};

/// Errors that can occur while parsing a character class.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassError {
    #[error("empty character class")]
    Empty,
    #[error("unclosed '[' in character class")]
    UnclosedBracket,
    #[error("unclosed '[:' in character class")]
    UnclosedPosixName,
    #[error("'\\' at end of character class")]
    DanglingEscape,
    #[error("unknown escape: \\{0}")]
    UnknownEscape(char),
    #[error("unknown class name: [:{0}:]")]
    UnknownClassName(String),
    #[error("invalid range {0:?}-{1:?}")]
    InvalidRange(char, char),
    #[error("range end must be a single character")]
    InvalidRangeEnd,
    #[error("negated escape \\{0} is not allowed inside '[...]'")]
    NegatedEscapeInBracket(char),
    #[error("unexpected {0:?} after character class")]
    TrailingInput(char),
}

/// Escapes standing for a named class; the uppercase letter negates.
static NAMED_ESCAPES: Map<char, NamedClass> = phf_map! {
    'd' => NamedClass::Digit,
    's' => NamedClass::Space,
    'w' => NamedClass::Word,
};

static CONTROL_ESCAPES: Map<char, char> = phf_map! {
    '0' => '\0',
    'n' => '\n',
    'r' => '\r',
    't' => '\t',
};

/// Please keep names sorted alphabetically.
static POSIX_CLASSES: Map<&'static str, NamedClass> = phf_map! {
    "alnum" => NamedClass::Alnum,
    "alpha" => NamedClass::Alpha,
    "digit" => NamedClass::Digit,
    "lower" => NamedClass::Lower,
    "print" => NamedClass::Print,
    "punct" => NamedClass::Punct,
    "space" => NamedClass::Space,
    "upper" => NamedClass::Upper,
    "word" => NamedClass::Word,
};

/// Parse a character class string into a [`CharClass`].
pub fn parse_class(input: &str) -> Result<CharClass, ClassError> {
    let body = strip_slashes(input);
    let mut parser = Parser {
        chars: body.chars().peekable(),
    };
    let class = parser.parse_atom()?;
    match parser.chars.next() {
        Some(c) => Err(ClassError::TrailingInput(c)),
        None => Ok(class),
    }
}

/// `/x/` is `x`. A lone `/` or `//` is taken literally.
fn strip_slashes(input: &str) -> &str {
    if input.chars().count() >= 3
        && let Some(inner) = input.strip_prefix('/').and_then(|s| s.strip_suffix('/'))
    {
        return inner;
    }
    input
}

enum Escape {
    Item(ClassItem),
    /// A negated named class and the escape letter that produced it.
    Negated(NamedClass, char),
}

struct Parser<'a> {
    chars: Peekable<Chars<'a>>,
}

impl Parser<'_> {
    fn parse_atom(&mut self) -> Result<CharClass, ClassError> {
        match self.chars.next() {
            None => Err(ClassError::Empty),
            Some('.') => Ok(CharClass::new(vec![ClassItem::Named(NamedClass::Any)])),
            Some('[') => self.parse_bracket(),
            Some('\\') => match self.parse_escape()? {
                Escape::Item(item) => Ok(CharClass::new(vec![item])),
                Escape::Negated(named, _) => {
                    Ok(CharClass::new(vec![ClassItem::Named(named)]).negate())
                }
            },
            Some(c) => Ok(CharClass::new(vec![ClassItem::Single(c)])),
        }
    }

    /// Parse the escape after a `\` (which has already been consumed).
    fn parse_escape(&mut self) -> Result<Escape, ClassError> {
        let c = self.chars.next().ok_or(ClassError::DanglingEscape)?;
        if let Some(named) = NAMED_ESCAPES.get(&c) {
            return Ok(Escape::Item(ClassItem::Named(*named)));
        }
        if let Some(named) = NAMED_ESCAPES.get(&c.to_ascii_lowercase()) {
            return Ok(Escape::Negated(*named, c));
        }
        if let Some(ctrl) = CONTROL_ESCAPES.get(&c) {
            return Ok(Escape::Item(ClassItem::Single(*ctrl)));
        }
        if c.is_ascii_punctuation() || c == ' ' {
            return Ok(Escape::Item(ClassItem::Single(c)));
        }
        Err(ClassError::UnknownEscape(c))
    }

    /// Parse a `[...]` set (the opening `[` has already been consumed).
    ///
    /// A `]` directly after `[` or `[^` is literal, as is a `-` at either end.
    fn parse_bracket(&mut self) -> Result<CharClass, ClassError> {
        let negated = self.chars.next_if_eq(&'^').is_some();
        let mut items = Vec::new();
        let mut first = true;

        loop {
            let item = match self.chars.next() {
                None => return Err(ClassError::UnclosedBracket),
                Some(']') if !first => break,
                Some('[') if self.chars.peek() == Some(&':') => {
                    self.chars.next(); // consume ':'
                    ClassItem::Named(self.parse_posix_name()?)
                }
                Some('\\') => match self.parse_escape()? {
                    Escape::Item(item) => item,
                    Escape::Negated(_, letter) => {
                        return Err(ClassError::NegatedEscapeInBracket(letter));
                    }
                },
                Some(c) => ClassItem::Single(c),
            };
            first = false;

            match item {
                ClassItem::Single(lo) if self.at_range_dash() => {
                    self.chars.next(); // consume '-'
                    let hi = self.parse_range_end()?;
                    if hi < lo {
                        return Err(ClassError::InvalidRange(lo, hi));
                    }
                    items.push(ClassItem::Range(lo, hi));
                }
                _ => items.push(item),
            }
        }

        Ok(CharClass { negated, items })
    }

    /// True if the next chars are `-` followed by something other than `]`.
    fn at_range_dash(&self) -> bool {
        let mut ahead = self.chars.clone();
        ahead.next() == Some('-') && !matches!(ahead.next(), None | Some(']'))
    }

    fn parse_range_end(&mut self) -> Result<char, ClassError> {
        match self.chars.next() {
            None => Err(ClassError::UnclosedBracket),
            Some('\\') => match self.parse_escape()? {
                Escape::Item(ClassItem::Single(c)) => Ok(c),
                Escape::Item(_) | Escape::Negated(..) => Err(ClassError::InvalidRangeEnd),
            },
            Some(c) => Ok(c),
        }
    }

    /// Parse `name:]` (the `[:` has already been consumed).
    fn parse_posix_name(&mut self) -> Result<NamedClass, ClassError> {
        let mut name = String::new();
        loop {
            match self.chars.next() {
                None => return Err(ClassError::UnclosedPosixName),
                Some(':') => break,
                Some(c) => name.push(c),
            }
        }
        if self.chars.next() != Some(']') {
            return Err(ClassError::UnclosedPosixName);
        }
        POSIX_CLASSES
            .get(name.as_str())
            .copied()
            .ok_or(ClassError::UnknownClassName(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::char_class::class_matches;

    fn parse_ok(s: &str) -> CharClass {
        parse_class(s).expect("parse should succeed")
    }
    fn parse_err(s: &str) -> ClassError {
        parse_class(s).expect_err("parse should fail")
    }

    #[test]
    fn single_char() {
        assert_eq!(parse_ok(" "), CharClass::new(vec![ClassItem::Single(' ')]));
        assert_eq!(parse_ok("!"), CharClass::new(vec![ClassItem::Single('!')]));
    }

    #[test]
    fn dot_is_any() {
        assert_eq!(
            parse_ok("."),
            CharClass::new(vec![ClassItem::Named(NamedClass::Any)])
        );
    }

    #[test]
    fn named_escapes() {
        assert_eq!(
            parse_ok(r"\d"),
            CharClass::new(vec![ClassItem::Named(NamedClass::Digit)])
        );
        let not_space = parse_ok(r"\S");
        assert!(not_space.negated);
        assert_eq!(
            not_space.items,
            vec![ClassItem::Named(NamedClass::Space)]
        );
    }

    #[test]
    fn control_and_punct_escapes() {
        assert_eq!(parse_ok(r"\t").items, vec![ClassItem::Single('\t')]);
        assert_eq!(parse_ok(r"\.").items, vec![ClassItem::Single('.')]);
        assert_eq!(parse_ok(r"\\").items, vec![ClassItem::Single('\\')]);
    }

    #[test]
    fn slashes_are_stripped() {
        assert_eq!(parse_ok(r"/\d/"), parse_ok(r"\d"));
        assert_eq!(parse_ok("/ /"), parse_ok(" "));
        assert_eq!(parse_ok("/").items, vec![ClassItem::Single('/')]);
    }

    #[test]
    fn bracket_ranges() {
        let cs = parse_ok("[a-zA-Z0-9]");
        assert!(!cs.negated);
        assert_eq!(
            cs.items,
            vec![
                ClassItem::Range('a', 'z'),
                ClassItem::Range('A', 'Z'),
                ClassItem::Range('0', '9'),
            ]
        );
    }

    #[test]
    fn bracket_trailing_dash_is_literal() {
        let cs = parse_ok("[+*/-]");
        assert_eq!(
            cs.items,
            vec![
                ClassItem::Single('+'),
                ClassItem::Single('*'),
                ClassItem::Single('/'),
                ClassItem::Single('-'),
            ]
        );
        for ch in ['+', '*', '/', '-'] {
            assert!(class_matches(&cs, ch), "expected operator: {ch}");
        }
        assert!(!class_matches(&cs, ','));
    }

    #[test]
    fn bracket_leading_bracket_and_negation() {
        let cs = parse_ok("[^]a]");
        assert!(cs.negated);
        assert_eq!(
            cs.items,
            vec![ClassItem::Single(']'), ClassItem::Single('a')]
        );
    }

    #[test]
    fn bracket_posix_and_escape() {
        let cs = parse_ok(r"[[:upper:]\d_]");
        assert_eq!(
            cs.items,
            vec![
                ClassItem::Named(NamedClass::Upper),
                ClassItem::Named(NamedClass::Digit),
                ClassItem::Single('_'),
            ]
        );
    }

    #[test]
    fn errors() {
        assert_eq!(parse_err(""), ClassError::Empty);
        assert_eq!(parse_err("[a-z"), ClassError::UnclosedBracket);
        assert_eq!(parse_err("[z-a]"), ClassError::InvalidRange('z', 'a'));
        assert_eq!(parse_err("\\"), ClassError::DanglingEscape);
        assert_eq!(parse_err(r"\q"), ClassError::UnknownEscape('q'));
        assert_eq!(
            parse_err("[[:nope:]]"),
            ClassError::UnknownClassName("nope".to_string())
        );
        assert_eq!(parse_err("[[:alpha]"), ClassError::UnclosedPosixName);
        assert_eq!(parse_err(r"[\D]"), ClassError::NegatedEscapeInBracket('D'));
        assert_eq!(parse_err(r"[a-\d]"), ClassError::InvalidRangeEnd);
        assert_eq!(parse_err("ab"), ClassError::TrailingInput('b'));
    }
}
