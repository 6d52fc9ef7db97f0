//! ACL pattern language.
//!
//! Patterns are dot-separated segments matched against required access
//! strings:
//! - `*` matches exactly one segment (e.g., `users.*.read`)
//! - `#` matches zero or more characters across segments (e.g., `users.#`)
//! - a leading `!` marks a negation that denies whatever the rest matches
//! - `me`, `my_session` and `edit` are reserved words expanded per identity
//!
//! Compilation escapes the pattern, translates wildcards, substitutes reserved
//! words and anchors the result into a [`regex::Regex`].

mod compiler;
mod reserved;

pub use compiler::{anchor, compile, compile_with, translate_wildcards, CompiledPattern};
pub use reserved::{reserved_words, substitute, ReservedWord, EDIT, EDIT_ALIAS, ME, MY_SESSION};

/// Separator between segments once a pattern has been escaped
pub const SEGMENT_SEPARATOR: &str = r"\.";

/// Single-segment wildcard
pub const SINGLE_WILDCARD: char = '*';

/// Recursive wildcard
pub const RECURSIVE_WILDCARD: char = '#';

/// Prefix marking a negation pattern
pub const NEGATION_PREFIX: char = '!';

/// Splits a leading `!` off a pattern.
///
/// Returns the remainder and whether the pattern was negated.
///
/// ```
/// use acl_engine::pattern::split_negation;
///
/// assert_eq!(split_negation("!users.admin.*"), ("users.admin.*", true));
/// assert_eq!(split_negation("users.*.read"), ("users.*.read", false));
/// ```
pub fn split_negation(pattern: &str) -> (&str, bool) {
    match pattern.strip_prefix(NEGATION_PREFIX) {
        Some(rest) => (rest, true),
        None => (pattern, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_negation_only_strips_one() {
        assert_eq!(split_negation("!!a"), ("!a", true));
        assert_eq!(split_negation("!"), ("", true));
        assert_eq!(split_negation("a.!b"), ("a.!b", false));
    }
}
