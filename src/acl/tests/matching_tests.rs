//! Matching behaviour of granted ACL patterns against required access strings

use acl_engine::{AccessCheck, AclEngine};
use std::sync::Arc;
use test_case::test_case;

fn access(granted: &[&str]) -> Arc<AccessCheck> {
    AclEngine::default()
        .build_access_check("user-123", "sess-1", granted)
        .unwrap()
}

// ============================================================================
// WILDCARDS
// ============================================================================

#[test_case("a.*.c", "a.b.c", true; "single wildcard one segment")]
#[test_case("a.*.c", "a.b.d.c", false; "single wildcard does not cross dots")]
#[test_case("a.*", "a", false; "single wildcard needs its separator")]
#[test_case("*", "anything", true; "lone single wildcard")]
#[test_case("*", "two.segments", false; "lone single wildcard one segment")]
#[test_case("a.#", "a", true; "recursive wildcard zero segments")]
#[test_case("a.#", "a.b.c.d", true; "recursive wildcard many segments")]
#[test_case("a.#", "ab.c", false; "recursive wildcard keeps boundary")]
#[test_case("#", "", true; "lone recursive wildcard empty")]
#[test_case("#", "anything.at.all", true; "lone recursive wildcard")]
#[test_case("a.#.z", "a.z", true; "inner recursive wildcard zero segments")]
#[test_case("a.#.z", "a.b.c.z", true; "inner recursive wildcard many segments")]
#[test_case("#.audit", "logs.audit", true; "leading recursive wildcard")]
#[test_case("#.audit", "audit", true; "leading recursive wildcard zero segments")]
#[test_case("a#", "abc.d", true; "recursive wildcard inside a segment")]
#[test_case("a.#b", "ab", false; "partial recursive segment keeps separator")]
#[test_case("a.#b", "a.xb", true; "partial recursive segment")]
#[test_case("#", "a\nb", true; "lone recursive wildcard spans newline")]
#[test_case("a.*.#", "a.b", true; "single then recursive")]
#[test_case("a.*.#", "a", false; "single then recursive needs one segment")]
fn wildcard_matching(granted: &str, required: &str, expected: bool) {
    assert_eq!(access(&[granted]).allows(required), expected);
}

// ============================================================================
// RESERVED WORDS
// ============================================================================

#[test_case("users.me.read", "users.user-123.read", true; "me expands to subject")]
#[test_case("users.me.read", "users.user-456.read", false; "me is identity specific")]
#[test_case("users.me.read", "users.me.read", true; "me keeps literal word")]
#[test_case("sessions.my_session.end", "sessions.sess-1.end", true; "my_session expands to session")]
#[test_case("sessions.my_session.end", "sessions.sess-2.end", false; "my_session is session specific")]
#[test_case("docs.1.edit", "docs.1.update", true; "edit aliases update")]
#[test_case("docs.1.edit", "docs.1.edit", true; "edit keeps literal word")]
#[test_case("docs.1.edit", "docs.1.delete", false; "edit is not a wildcard")]
#[test_case("docs.1.editor", "docs.1.updateor", false; "reserved words are whole segments")]
#[test_case("home.x", "huser-123.x", false; "reserved word not a substring")]
fn reserved_word_matching(granted: &str, required: &str, expected: bool) {
    assert_eq!(access(&[granted]).allows(required), expected);
}

// ============================================================================
// NEGATION
// ============================================================================

#[test]
fn test_negation_precedence_independent_of_order() {
    let orders: [&[&str]; 3] = [
        &["users.#", "!users.admin.*"],
        &["!users.admin.*", "users.#"],
        &["users.*.*", "!users.admin.*", "users.admin.read"],
    ];
    for granted in orders {
        let access = access(granted);
        assert!(!access.allows("users.admin.read"), "granted: {:?}", granted);
        assert!(access.allows("users.bob.read"), "granted: {:?}", granted);
    }
}

#[test]
fn test_negation_with_reserved_word() {
    let access = access(&["users.#", "!users.me.delete"]);
    assert!(!access.allows("users.user-123.delete"));
    assert!(access.allows("users.someone.delete"));
}

#[test]
fn test_none_required_ignores_denials() {
    assert!(access(&["!#"]).matches_required_access(None));
    assert!(access(&[]).matches_required_access(None));
}

// ============================================================================
// DEGENERATE PATTERNS
// ============================================================================

#[test]
fn test_empty_pattern_matches_only_empty() {
    let access = access(&[""]);
    assert!(access.allows(""));
    assert!(!access.allows("a"));
}

#[test]
fn test_consecutive_dots_are_literal() {
    let access = access(&["a..b"]);
    assert!(access.allows("a..b"));
    assert!(!access.allows("a.b"));
    assert!(!access.allows("a.x.b"));
}

#[test]
fn test_single_wildcard_accepts_empty_segment() {
    assert!(access(&["a.*.c"]).allows("a..c"));
}

#[test]
fn test_negation_covers_newlines() {
    let access = access(&["users.*", "!users.#"]);
    assert!(!access.allows("users.a\nb"));
    assert!(!access.allows("users.a"));
}

#[test]
fn test_negation_marker_only_at_start() {
    let access = access(&["a.!b"]);
    assert!(access.allows("a.!b"));
    assert!(!access.allows("a.b"));
}

#[test]
fn test_pathological_wildcards_stay_fast() {
    let granted = "#.*.#.*.#.*.#.*.#.*.#.*.#.*.#";
    let required = format!("{}.x", vec!["seg"; 64].join("."));
    let access = access(&[granted]);
    let start = std::time::Instant::now();
    assert!(access.allows(&required));
    assert!(!access.allows("seg#seg"));
    assert!(start.elapsed() < std::time::Duration::from_secs(1));
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn test_user_directory_scenario() {
    let access = access(&["users.*.read", "users.me.update", "!users.admin.*"]);

    assert!(access.allows("users.789.read"));
    assert!(access.allows("users.user-123.update"));
    assert!(!access.allows("users.789.update"));
    assert!(!access.allows("users.admin.read"));
    // `me` stands for the subject id only, never a fragment of it
    assert!(!access.allows("users.123.update"));
    // The alternation keeps the literal reserved word
    assert!(access.allows("users.me.update"));
}

#[test]
fn test_delegation_scenario() {
    let access = access(&["projects.#", "!projects.billing.#"]);

    assert!(access.may_add_access("projects.web.deploy"));
    assert!(!access.may_add_access("projects.billing.read"));
    assert!(access.may_add_access("!x.y.z"));
    assert_eq!(access.may_add_access("x.y.z"), access.allows("x.y.z"));

    assert!(access.may_remove_access("!projects.web.deploy"));
    assert!(!access.may_remove_access("!projects.billing.read"));
}
