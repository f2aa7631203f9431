//! Needle predicates
//!
//! A needle string selects records one of three ways:
//! - `"*"` matches every record
//! - `=value` matches a field equal to `value` (case-insensitive)
//! - anything else is used verbatim as a case-insensitive pattern, so a
//!   plain needle is a substring match and regex metacharacters in it are
//!   live (inherited contract, kept as-is)
//!
//! The tagged [`Predicate`] keeps the escaping contract auditable; compile
//! it once per operation into a [`Matcher`] before scanning records.

use regex::RegexBuilder;

/// Characters escaped when an exact-match needle is turned into a pattern
const EXACT_ESCAPED: &[char] = &['.', '+', '^', '$', '?', '[', ']'];

/// Parsed form of a needle string
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `"*"` — matches everything
    All,

    /// `=value` — field must equal `value`
    Exact(String),

    /// Verbatim case-insensitive pattern (substring when no metacharacters)
    Pattern(String),
}

impl Predicate {
    /// Parse a needle string
    pub fn parse(needle: &str) -> Self {
        if needle == "*" {
            return Predicate::All;
        }

        match needle.strip_prefix('=') {
            Some(rest) => Predicate::Exact(rest.to_string()),
            None => Predicate::Pattern(needle.to_string()),
        }
    }

    /// Compile into a matcher
    ///
    /// Exact needles are escaped and anchored as `^value$`; pattern needles
    /// compile verbatim. A pattern that fails to compile matches nothing.
    pub fn compile(&self) -> Matcher {
        let pattern = match self {
            Predicate::All => return Matcher::All,
            Predicate::Exact(value) => {
                let mut escaped = String::with_capacity(value.len() + 2);
                escaped.push('^');
                for ch in value.chars() {
                    if EXACT_ESCAPED.contains(&ch) {
                        escaped.push('\\');
                    }
                    escaped.push(ch);
                }
                escaped.push('$');
                escaped
            }
            Predicate::Pattern(pattern) => pattern.clone(),
        };

        match RegexBuilder::new(&pattern).case_insensitive(true).build() {
            Ok(regex) => Matcher::Regex(regex),
            Err(_) => Matcher::Never,
        }
    }

    /// Whether this predicate is the match-everything needle
    pub fn is_all(&self) -> bool {
        matches!(self, Predicate::All)
    }
}

/// Compiled predicate, ready to test field values
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Matches every value
    All,

    /// Case-insensitive regex test
    Regex(regex::Regex),

    /// Matches nothing (needle failed to compile as a pattern)
    Never,
}

impl Matcher {
    /// Test a field value
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Matcher::All => true,
            Matcher::Regex(regex) => regex.is_match(value),
            Matcher::Never => false,
        }
    }
}
