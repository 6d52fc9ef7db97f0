//! Reserved-word substitution
//!
//! A reserved word is a whole segment that expands to an alternation of the
//! word itself and a value taken from the caller's identity (or, for `edit`,
//! a fixed alias). Substitution runs on the escaped, wildcard-translated
//! expression, so it splits on the escaped separator `\.`.

use super::SEGMENT_SEPARATOR;

/// Segment replaced by the subject id
pub const ME: &str = "me";
/// Segment replaced by the session id
pub const MY_SESSION: &str = "my_session";
/// Segment aliased to [`EDIT_ALIAS`]
pub const EDIT: &str = "edit";
/// Fixed value `edit` expands to
pub const EDIT_ALIAS: &str = "update";

/// A reserved segment and the value it stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservedWord<'a> {
    word: &'static str,
    value: &'a str,
}

impl<'a> ReservedWord<'a> {
    pub fn new(word: &'static str, value: &'a str) -> Self {
        Self { word, value }
    }

    pub fn word(&self) -> &'static str {
        self.word
    }

    pub fn value(&self) -> &'a str {
        self.value
    }

    /// Regex fragment matching either the word or its value.
    ///
    /// An empty value would turn the segment into an optional one, so it
    /// expands to the literal word alone.
    pub fn replacement(&self) -> String {
        if self.value.is_empty() {
            return regex::escape(self.word);
        }
        format!("({}|{})", regex::escape(self.word), regex::escape(self.value))
    }
}

/// Reserved words for one identity, in substitution order
pub fn reserved_words<'a>(subject_id: &'a str, session_id: &'a str) -> [ReservedWord<'a>; 3] {
    [
        ReservedWord::new(ME, subject_id),
        ReservedWord::new(MY_SESSION, session_id),
        ReservedWord::new(EDIT, EDIT_ALIAS),
    ]
}

/// Replaces every segment of `escaped_expression` that is exactly a reserved
/// word with its alternation.
///
/// # Examples
///
/// ```
/// use acl_engine::pattern::substitute;
///
/// assert_eq!(substitute(r"users\.me\.read", "u1", "s1"), r"users\.(me|u1)\.read");
/// assert_eq!(substitute(r"users\.meme\.read", "u1", "s1"), r"users\.meme\.read");
/// ```
pub fn substitute(escaped_expression: &str, subject_id: &str, session_id: &str) -> String {
    let words = reserved_words(subject_id, session_id);

    escaped_expression
        .split(SEGMENT_SEPARATOR)
        .map(|piece| match words.iter().find(|w| w.word() == piece) {
            Some(word) => word.replacement(),
            None => piece.to_string(),
        })
        .collect::<Vec<_>>()
        .join(SEGMENT_SEPARATOR)
}
