//! AccessCheck: allow/deny evaluation over one principal's granted patterns

use crate::engine::AclEngine;
use crate::error::Result;
use crate::pattern::{split_negation, CompiledPattern};
use std::sync::Arc;
use tracing::trace;

/// Immutable evaluator for one `(subject, session, granted patterns)` triple.
///
/// Granted patterns are split into positive and negative matchers. A required
/// access string is allowed when no negative pattern matches it and at least
/// one positive pattern does; any negative match is absolute regardless of
/// where it appeared in the granted list.
///
/// Obtain instances through [`AclEngine::build_access_check`] so repeated
/// requests for the same token reuse one compilation pass.
///
/// # Examples
///
/// ```
/// use acl_engine::AclEngine;
///
/// let engine = AclEngine::default();
/// let access = engine
///     .build_access_check("user-123", "sess-1", &["users.*.read", "!users.admin.*"])
///     .unwrap();
///
/// assert!(access.matches_required_access(Some("users.789.read")));
/// assert!(!access.matches_required_access(Some("users.admin.read")));
/// assert!(access.matches_required_access(None));
/// ```
#[derive(Debug)]
pub struct AccessCheck {
    subject_id: String,
    session_id: String,
    positive: Vec<Arc<CompiledPattern>>,
    negative: Vec<Arc<CompiledPattern>>,
}

impl AccessCheck {
    /// Compiles `granted` using the process-wide engine's caches
    pub fn new<S: AsRef<str>>(subject_id: &str, session_id: &str, granted: &[S]) -> Result<Self> {
        Self::compile(AclEngine::shared(), subject_id, session_id, granted)
    }

    pub(crate) fn compile<S: AsRef<str>>(
        engine: &AclEngine,
        subject_id: &str,
        session_id: &str,
        granted: &[S],
    ) -> Result<Self> {
        let mut positive = Vec::new();
        let mut negative = Vec::new();

        for pattern in granted {
            let (raw, negated) = split_negation(pattern.as_ref());
            let compiled = engine.compile_pattern(raw, subject_id, session_id)?;
            if negated {
                negative.push(compiled);
            } else {
                positive.push(compiled);
            }
        }

        Ok(Self {
            subject_id: subject_id.to_string(),
            session_id: session_id.to_string(),
            positive,
            negative,
        })
    }

    pub fn subject_id(&self) -> &str {
        &self.subject_id
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Raw sources of the positive patterns, in granted order
    pub fn positive_patterns(&self) -> impl Iterator<Item = &str> + '_ {
        self.positive.iter().map(|p| p.source())
    }

    /// Raw sources of the negative patterns with `!` stripped, in granted order
    pub fn negative_patterns(&self) -> impl Iterator<Item = &str> + '_ {
        self.negative.iter().map(|p| p.source())
    }

    /// Decides whether `required` is covered by the granted patterns.
    ///
    /// `None` means the caller needs no protection and is always allowed.
    pub fn matches_required_access(&self, required: Option<&str>) -> bool {
        let Some(required) = required else {
            return true;
        };

        if let Some(denied_by) = self.negative.iter().find(|p| p.is_match(required)) {
            trace!(
                subject = %self.subject_id,
                required,
                pattern = denied_by.source(),
                "denied by negative pattern"
            );
            return false;
        }

        let allowed = self.positive.iter().any(|p| p.is_match(required));
        trace!(subject = %self.subject_id, required, allowed, "evaluated required access");
        allowed
    }

    /// Shorthand for `matches_required_access(Some(required))`
    pub fn allows(&self, required: &str) -> bool {
        self.matches_required_access(Some(required))
    }

    /// Whether this principal may hand `new_pattern` to someone else.
    ///
    /// Negations only restrict access and can always be delegated; anything
    /// else must be covered by the principal's own access.
    pub fn may_add_access(&self, new_pattern: &str) -> bool {
        let (_, negated) = split_negation(new_pattern);
        negated || self.allows(new_pattern)
    }

    /// Whether this principal may revoke `pattern_to_remove` (with or without
    /// its leading `!`) from someone else.
    pub fn may_remove_access(&self, pattern_to_remove: &str) -> bool {
        let (raw, _) = split_negation(pattern_to_remove);
        self.allows(raw)
    }
}
