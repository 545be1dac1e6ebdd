//! Character class membership tests.

use super::ast::{CharClass, ClassItem, NamedClass};

/// Test whether `ch` is a member of `class`.
pub fn class_matches(class: &CharClass, ch: char) -> bool {
    let base = class.items.iter().any(|item| item_matches(item, ch));
    if class.negated { !base } else { base }
}

fn item_matches(item: &ClassItem, ch: char) -> bool {
    match item {
        ClassItem::Single(c) => *c == ch,
        ClassItem::Range(lo, hi) => *lo <= ch && ch <= *hi,
        ClassItem::Named(named) => named_matches(*named, ch),
    }
}

fn named_matches(named: NamedClass, ch: char) -> bool {
    match named {
        NamedClass::Any => ch != '\n',
        NamedClass::Digit => ch.is_ascii_digit(),
        NamedClass::Word => ch.is_alphanumeric() || ch == '_',
        NamedClass::Space => ch.is_whitespace(),
        NamedClass::Alpha => ch.is_alphabetic(),
        NamedClass::Upper => ch.is_uppercase(),
        NamedClass::Lower => ch.is_lowercase(),
        NamedClass::Alnum => ch.is_alphanumeric(),
        NamedClass::Punct => ch.is_ascii_punctuation(),
        NamedClass::Print => ('\x20'..='\x7e').contains(&ch),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(n: NamedClass) -> CharClass {
        CharClass::new(vec![ClassItem::Named(n)])
    }

    #[test]
    fn digit_matches_ascii_digits_only() {
        assert!(class_matches(&named(NamedClass::Digit), '7'));
        assert!(!class_matches(&named(NamedClass::Digit), 'a'));
        assert!(!class_matches(&named(NamedClass::Digit), '٣'));
    }

    #[test]
    fn negated_digit() {
        let cs = named(NamedClass::Digit).negate();
        assert!(class_matches(&cs, 'a'));
        assert!(!class_matches(&cs, '0'));
    }

    #[test]
    fn any_excludes_newline() {
        assert!(class_matches(&named(NamedClass::Any), 'x'));
        assert!(!class_matches(&named(NamedClass::Any), '\n'));
    }

    #[test]
    fn word_includes_underscore() {
        for ch in ['a', 'Z', '9', '_'] {
            assert!(
                class_matches(&named(NamedClass::Word), ch),
                "expected word: {ch}"
            );
        }
        assert!(!class_matches(&named(NamedClass::Word), '-'));
    }

    #[test]
    fn printable_range() {
        assert!(class_matches(&named(NamedClass::Print), ' '));
        assert!(class_matches(&named(NamedClass::Print), '~'));
        assert!(!class_matches(&named(NamedClass::Print), '\x01'));
        assert!(!class_matches(&named(NamedClass::Print), '\x7f'));
    }

    #[test]
    fn ranges_and_singles() {
        let cs = CharClass::new(vec![
            ClassItem::Range('a', 'z'),
            ClassItem::Single('-'),
        ]);
        assert!(class_matches(&cs, 'a'));
        assert!(class_matches(&cs, 'm'));
        assert!(class_matches(&cs, 'z'));
        assert!(class_matches(&cs, '-'));
        assert!(!class_matches(&cs, 'A'));
    }

    #[test]
    fn empty_negated_class_matches_everything() {
        let cs = CharClass::new(vec![]).negate();
        assert!(class_matches(&cs, 'q'));
    }
}
