//! A single rewrite rule.
//!
//! ## Rule Text
//!
//! One rule per line:
//! - `left::right` - terminating rule, halts the machine after applying
//! - `left:right` - ordinary rule, the machine keeps going
//!
//! Either side may be empty. An empty `left` matches every state and
//! prepends `right`. Whitespace is significant on both sides.
//!
//! Lines without a colon are not rules (blank lines, comments).
//!
//! ```
//! use markov_engine::core::Rule;
//!
//! let rule = Rule::parse("ab:ba").unwrap().unwrap();
//! assert_eq!(rule.apply("aabb"), (true, "abab".to_string()));
//!
//! assert!(Rule::parse("just a comment").unwrap().is_none());
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::error::{ParseError, Result};

/// The delimiter between the two sides of a rule.
pub const SEPARATOR: char = ':';

/// `left::right`, neither side containing a colon.
static TERMINATING_RULE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^:]*)::([^:]*)$").expect("terminating rule pattern"));

/// `left:right`, neither side containing a colon.
static NONTERMINATING_RULE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^:]*):([^:]*)$").expect("non-terminating rule pattern"));

/// A parsed rewrite rule.
///
/// Rules are plain values: immutable after construction, compared
/// structurally. The two rule forms differ only in `is_terminating`,
/// which the engine consults after a successful match.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rule {
    /// Halts the machine once applied.
    pub is_terminating: bool,

    /// Pattern to search for (may be empty).
    pub left: String,

    /// Replacement text.
    pub right: String,
}

impl Rule {
    /// Create an ordinary (non-terminating) rule.
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            is_terminating: false,
            left: left.into(),
            right: right.into(),
        }
    }

    /// Create a terminating rule.
    pub fn terminating(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            is_terminating: true,
            left: left.into(),
            right: right.into(),
        }
    }

    /// Parse one line of rule text.
    ///
    /// Returns `Ok(None)` for lines without a colon. The terminating form is
    /// tried first, since every `a::b` line also contains a single colon.
    ///
    /// # Errors
    ///
    /// [`ParseError::Syntax`] if the line contains a colon but matches
    /// neither form, e.g. `a:b:c` or `a:::b`.
    pub fn parse(line: &str) -> Result<Option<Rule>> {
        if !line.contains(SEPARATOR) {
            return Ok(None);
        }

        if let Some(caps) = TERMINATING_RULE.captures(line) {
            return Ok(Some(Rule::terminating(&caps[1], &caps[2])));
        }

        if let Some(caps) = NONTERMINATING_RULE.captures(line) {
            return Ok(Some(Rule::new(&caps[1], &caps[2])));
        }

        Err(ParseError::syntax(line))
    }

    /// Try the rule against a state.
    ///
    /// Replaces only the leftmost occurrence of `left`. An empty `left`
    /// always applies and prepends `right`.
    #[must_use]
    pub fn apply(&self, state: &str) -> (bool, String) {
        match self.rewrite(state) {
            Some(next) => (true, next),
            None => (false, state.to_string()),
        }
    }

    /// Like [`apply`](Self::apply), without copying the state on a miss.
    #[must_use]
    pub fn rewrite(&self, state: &str) -> Option<String> {
        if self.left.is_empty() {
            let mut next = String::with_capacity(self.right.len() + state.len());
            next.push_str(&self.right);
            next.push_str(state);
            return Some(next);
        }

        let at = state.find(self.left.as_str())?;
        let mut next = String::with_capacity(state.len() - self.left.len() + self.right.len());
        next.push_str(&state[..at]);
        next.push_str(&self.right);
        next.push_str(&state[at + self.left.len()..]);
        Some(next)
    }

    /// Check whether the rule applies to a state.
    #[inline]
    #[must_use]
    pub fn matches(&self, state: &str) -> bool {
        self.left.is_empty() || state.contains(self.left.as_str())
    }
}

/// Renders the rule in source form. Rules parsed from text print back to
/// an equivalent line.
impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let separator = if self.is_terminating { "::" } else { ":" };
        write!(f, "{}{}{}", self.left, separator, self.right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_terminating() {
        let rule = Rule::parse("a::b").unwrap().unwrap();
        assert!(rule.is_terminating);
        assert_eq!(rule.left, "a");
        assert_eq!(rule.right, "b");
    }

    #[test]
    fn test_parse_nonterminating() {
        let rule = Rule::parse("a:b").unwrap().unwrap();
        assert!(!rule.is_terminating);
        assert_eq!(rule.left, "a");
        assert_eq!(rule.right, "b");
    }

    #[test]
    fn test_parse_no_colon() {
        assert_eq!(Rule::parse("").unwrap(), None);
        assert_eq!(Rule::parse("# binary to unary").unwrap(), None);
    }

    #[test]
    fn test_parse_empty_sides() {
        assert_eq!(Rule::parse(":").unwrap(), Some(Rule::new("", "")));
        assert_eq!(Rule::parse("::").unwrap(), Some(Rule::terminating("", "")));
        assert_eq!(Rule::parse(":x").unwrap(), Some(Rule::new("", "x")));
        assert_eq!(Rule::parse("x::").unwrap(), Some(Rule::terminating("x", "")));
    }

    #[test]
    fn test_parse_keeps_whitespace() {
        let rule = Rule::parse(" a : b ").unwrap().unwrap();
        assert_eq!(rule.left, " a ");
        assert_eq!(rule.right, " b ");
    }

    #[test]
    fn test_parse_malformed() {
        for line in ["a:b:c", ":::", "a:::b", "a::b::c", "a::b:c", "a:b::c"] {
            let err = Rule::parse(line).unwrap_err();
            assert_eq!(err.line(), line);
        }
    }

    #[test]
    fn test_apply_leftmost_occurrence_only() {
        let rule = Rule::new("ab", "x");
        assert_eq!(rule.apply("abab"), (true, "xab".to_string()));
    }

    #[test]
    fn test_apply_empty_left_prepends() {
        let rule = Rule::new("", "X");
        assert_eq!(rule.apply("y"), (true, "Xy".to_string()));
        assert_eq!(rule.apply(""), (true, "X".to_string()));
    }

    #[test]
    fn test_apply_miss() {
        let rule = Rule::new("z", "x");
        assert_eq!(rule.apply("abc"), (false, "abc".to_string()));
        assert_eq!(rule.rewrite("abc"), None);
        assert!(!rule.matches("abc"));
    }

    #[test]
    fn test_apply_multibyte() {
        let rule = Rule::new("β", "ββ");
        assert_eq!(rule.apply("αβγ"), (true, "αββγ".to_string()));
    }

    #[test]
    fn test_display_round_trip() {
        for line in ["a:b", "a::b", ":x", "::", "|0:0||"] {
            let rule = Rule::parse(line).unwrap().unwrap();
            assert_eq!(rule.to_string(), line);
        }
    }
}
