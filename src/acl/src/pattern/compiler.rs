//! Translation of ACL patterns into anchored regular expressions

use super::reserved::substitute;
use super::{RECURSIVE_WILDCARD, SEGMENT_SEPARATOR, SINGLE_WILDCARD};
use crate::error::{AclError, Result};
use regex::{Regex, RegexBuilder};

/// Regex fragment for `*`: one segment, shortest run without `.` or `#`
const SINGLE_SEGMENT: &str = "[^.#]*?";

/// Regex fragment for `#`: shortest run of anything, across segments
const ANY_SEGMENTS: &str = ".*?";

/// A separator followed by a recursive wildcard
const SEPARATOR_THEN_ANY: &str = r"\..*?";

/// An anchored matcher compiled from one raw ACL pattern
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    source: String,
    regex: Regex,
}

impl CompiledPattern {
    /// The raw pattern this matcher was compiled from (without any `!`)
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The final anchored expression
    pub fn as_regex_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Returns `true` if the whole `required` string matches
    pub fn is_match(&self, required: &str) -> bool {
        self.regex.is_match(required)
    }
}

/// Escapes literal characters and translates `*` and `#`.
///
/// Every `.` in the output that separates segments is written as `\.`, which
/// is what reserved-word substitution splits on. Neither wildcard fragment
/// contains `\.`.
pub fn translate_wildcards(raw_pattern: &str) -> String {
    let mut expression = String::with_capacity(raw_pattern.len() * 2);
    let mut buf = [0u8; 4];

    for ch in raw_pattern.chars() {
        match ch {
            SINGLE_WILDCARD => expression.push_str(SINGLE_SEGMENT),
            RECURSIVE_WILDCARD => expression.push_str(ANY_SEGMENTS),
            _ => expression.push_str(&regex::escape(ch.encode_utf8(&mut buf))),
        }
    }

    expression
}

/// Anchors a substituted expression.
///
/// A segment made only of `#` may also match zero segments, so the separator
/// next to it becomes optional: `a.#` matches `a` and `#.b` matches `b`.
/// A `#` sharing its segment with other characters keeps both separators,
/// so `a.#b` does not match `ab`.
pub fn anchor(expression: &str) -> String {
    let mut body = String::with_capacity(expression.len() + 16);
    let mut rest = expression;

    if let Some(after) = skip_any_run(rest) {
        if let Some(tail) = after.strip_prefix(SEGMENT_SEPARATOR) {
            body.push_str("(?:");
            body.push_str(&rest[..rest.len() - after.len()]);
            body.push_str(r"\.)?");
            rest = tail;
        }
    }

    while let Some(pos) = rest.find(SEPARATOR_THEN_ANY) {
        let (head, from_separator) = rest.split_at(pos);
        body.push_str(head);

        let wildcard = &from_separator[SEGMENT_SEPARATOR.len()..];
        let after = skip_any_run(wildcard).unwrap_or(wildcard);
        let segment = &wildcard[..wildcard.len() - after.len()];

        if after.is_empty() || after.starts_with(SEGMENT_SEPARATOR) {
            body.push_str(r"(?:\.");
            body.push_str(segment);
            body.push_str(")?");
        } else {
            body.push_str(SEGMENT_SEPARATOR);
            body.push_str(segment);
        }
        rest = after;
    }

    body.push_str(rest);
    format!("^{}$", body)
}

/// Strips a leading run of `#` fragments, or returns `None` if there is none
fn skip_any_run(expression: &str) -> Option<&str> {
    let mut rest = expression.strip_prefix(ANY_SEGMENTS)?;
    while let Some(next) = rest.strip_prefix(ANY_SEGMENTS) {
        rest = next;
    }
    Some(rest)
}

/// Compiles `raw_pattern` for one identity without any caching.
///
/// # Examples
///
/// ```
/// use acl_engine::pattern::compile;
///
/// let pattern = compile("users.me.*", "u1", "s1").unwrap();
/// assert!(pattern.is_match("users.u1.read"));
/// assert!(!pattern.is_match("users.u2.read"));
/// assert!(!pattern.is_match("users.u1.posts.read"));
/// ```
pub fn compile(raw_pattern: &str, subject_id: &str, session_id: &str) -> Result<CompiledPattern> {
    compile_with(raw_pattern, |expression| {
        substitute(expression, subject_id, session_id)
    })
}

/// Compiles `raw_pattern`, delegating reserved-word substitution to
/// `substitute` so callers can memoize that step.
pub fn compile_with<F>(raw_pattern: &str, substitute: F) -> Result<CompiledPattern>
where
    F: FnOnce(&str) -> String,
{
    let translated = translate_wildcards(raw_pattern);
    let substituted = substitute(&translated);
    let anchored = anchor(&substituted);

    // `#` must cover every character `*` can, newlines included
    let regex = RegexBuilder::new(&anchored)
        .dot_matches_new_line(true)
        .build()
        .map_err(|source| AclError::InvalidPattern {
            pattern: raw_pattern.to_string(),
            source,
        })?;

    Ok(CompiledPattern {
        source: raw_pattern.to_string(),
        regex,
    })
}
