//! Attribute value operators
//!
//! Comparisons are case-sensitive byte comparisons; no language-dependent
//! folding is attempted.

use crate::model::AttrOperator;

/// Compare an attribute value (`haystack`) against a selector value (`needle`)
///
/// A haystack shorter than the needle never matches. An empty needle only
/// matches through `=`; the token and substring operators reject it.
pub fn matches(op: AttrOperator, needle: &str, haystack: &str) -> bool {
    if haystack.len() < needle.len() {
        return false;
    }
    match op {
        AttrOperator::Exists => true,
        AttrOperator::Exact => needle == haystack,
        _ if needle.is_empty() => false,
        AttrOperator::Includes => class_tokens(haystack).any(|t| t == needle),
        AttrOperator::DashMatch => haystack.split('-').any(|segment| segment == needle),
        AttrOperator::Substring => haystack.contains(needle),
        AttrOperator::Prefix => haystack.starts_with(needle),
        AttrOperator::Suffix => haystack.ends_with(needle),
    }
}

/// Split a `class` attribute into its tokens
///
/// Any Unicode whitespace run separates tokens.
pub fn class_tokens(value: &str) -> impl Iterator<Item = &str> {
    value.split_whitespace()
}

#[cfg(test)]
mod tests {
    use super::*;
    use AttrOperator::*;

    #[test]
    fn test_operator_literals() {
        assert!(matches(Substring, "ell", "Hello"));
        assert!(matches(Prefix, "He", "Hello"));
        assert!(matches(Suffix, "lo", "Hello"));
        assert!(matches(DashMatch, "en", "en-US"));
        assert!(!matches(Exact, "en", "en-US"));
        assert!(!matches(Exact, "x", "Hi"));
        assert!(!matches(Exact, "Hello", "Hi"));
    }

    #[test]
    fn test_shorter_haystack_fails_everywhere() {
        for op in [Exact, Includes, DashMatch, Substring, Prefix, Suffix] {
            assert!(!matches(op, "Hello", "Hi"), "{op:?}");
        }
    }

    #[test]
    fn test_includes_whole_tokens() {
        assert!(matches(Includes, "b", "a  b\tc"));
        assert!(!matches(Includes, "b", "abc"));
        assert!(!matches(Includes, "a b", "a b"));
    }

    #[test]
    fn test_dash_match_segments() {
        assert!(matches(DashMatch, "en", "en"));
        assert!(matches(DashMatch, "US", "en-US"));
        assert!(!matches(DashMatch, "e", "en-US"));
    }

    #[test]
    fn test_case_sensitive() {
        assert!(!matches(Exact, "hello", "Hello"));
        assert!(!matches(Prefix, "he", "Hello"));
    }

    #[test]
    fn test_empty_needle() {
        assert!(matches(Exact, "", ""));
        assert!(!matches(Exact, "", "x"));
        for op in [Includes, DashMatch, Substring, Prefix, Suffix] {
            assert!(!matches(op, "", "value"), "{op:?}");
        }
    }

    #[test]
    fn test_unicode_whitespace_separates_tokens() {
        assert!(matches(Includes, "b", "a\u{2003}b"));
        assert!(matches(Includes, "b", "a\u{3000}\u{a0}b c"));
        assert_eq!(class_tokens("x\u{2003}y\u{85}z").collect::<Vec<_>>(), ["x", "y", "z"]);
    }
}
