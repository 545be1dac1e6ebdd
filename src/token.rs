//! Token values captured by a successful match.

use std::fmt;

use itertools::Itertools;

/// A captured token: either matched text or an ordered group of sub-tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    Leaf(String),
    Group(Vec<Token>),
}

impl Token {
    /// Build the token for the repeats recorded by one repetition.
    ///
    /// This is the only flattening rule in the crate: a single repeat
    /// collapses to that repeat's token, anything else (including zero
    /// repeats) stays a group.
    pub fn from_repeats(mut repeats: Vec<Token>) -> Token {
        if repeats.len() == 1
            && let Some(only) = repeats.pop()
        {
            return only;
        }
        Token::Group(repeats)
    }

    pub fn leaf(text: impl Into<String>) -> Token {
        Token::Leaf(text.into())
    }

    pub fn group(items: impl IntoIterator<Item = Token>) -> Token {
        Token::Group(items.into_iter().collect())
    }

    /// The empty group yielded by a zero-repeat match.
    pub fn empty() -> Token {
        Token::Group(Vec::new())
    }

    pub fn is_empty_group(&self) -> bool {
        matches!(self, Token::Group(items) if items.is_empty())
    }

    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Token::Leaf(text) => Some(text),
            Token::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&[Token]> {
        match self {
            Token::Leaf(_) => None,
            Token::Group(items) => Some(items),
        }
    }

    /// All leaf text concatenated in order.
    ///
    /// For a successful match this is exactly the consumed input.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }

    fn push_text(&self, out: &mut String) {
        match self {
            Token::Leaf(text) => out.push_str(text),
            Token::Group(items) => items.iter().for_each(|t| t.push_text(out)),
        }
    }

    /// Iterate over leaf strings, depth first.
    pub fn leaves(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        match self {
            Token::Leaf(text) => Box::new(std::iter::once(text.as_str())),
            Token::Group(items) => Box::new(items.iter().flat_map(Token::leaves)),
        }
    }
}

/// Renders the tree with groups in brackets, e.g. `[a, [b, c], []]`.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Leaf(text) => write!(f, "{text:?}"),
            Token::Group(items) => write!(f, "[{}]", items.iter().join(", ")),
        }
    }
}

impl From<&str> for Token {
    fn from(text: &str) -> Self {
        Token::Leaf(text.to_string())
    }
}

impl From<char> for Token {
    fn from(ch: char) -> Self {
        Token::Leaf(ch.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_repeat_collapses() {
        assert_eq!(
            Token::from_repeats(vec![Token::leaf("a")]),
            Token::leaf("a")
        );
    }

    #[test]
    fn zero_repeats_is_empty_group() {
        let t = Token::from_repeats(vec![]);
        assert!(t.is_empty_group());
        assert_eq!(t, Token::empty());
    }

    #[test]
    fn many_repeats_stay_grouped() {
        let t = Token::from_repeats(vec![Token::leaf("a"), Token::leaf("b")]);
        assert_eq!(t, Token::group([Token::leaf("a"), Token::leaf("b")]));
    }

    #[test]
    fn collapse_is_one_level() {
        let inner = Token::group([Token::leaf("x")]);
        assert_eq!(Token::from_repeats(vec![inner.clone()]), inner);
    }

    #[test]
    fn text_concatenates_leaves() {
        let t = Token::group([
            Token::leaf("1"),
            Token::empty(),
            Token::group([Token::leaf("+"), Token::leaf("-")]),
            Token::leaf("2"),
        ]);
        assert_eq!(t.text(), "1+-2");
        assert_eq!(t.leaves().collect::<Vec<_>>(), vec!["1", "+", "-", "2"]);
    }

    #[test]
    fn display_brackets_groups() {
        let t = Token::group([
            Token::leaf("a"),
            Token::group([Token::leaf("b")]),
            Token::empty(),
        ]);
        assert_eq!(t.to_string(), r#"["a", ["b"], []]"#);
    }
}
