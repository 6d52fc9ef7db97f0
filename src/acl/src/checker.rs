//! AclChecker: yes/no and delegation questions for business logic

use crate::access::AccessCheck;
use crate::engine::AclEngine;
use crate::error::{AclError, Result};
use crate::principal::Principal;
use std::sync::Arc;

/// Pattern granting unrestricted access
pub const SUPERUSER_PATTERN: &str = "#";

/// Façade over one principal's [`AccessCheck`]
///
/// # Examples
///
/// ```
/// use acl_engine::{AclChecker, Principal};
///
/// let principal = Principal::new(
///     "user-123",
///     "sess-1",
///     vec!["users.*.read".into(), "users.me.update".into(), "!users.admin.*".into()],
/// );
/// let checker = AclChecker::new(&principal).unwrap();
///
/// assert!(checker.has_acl("users.789.read"));
/// assert!(checker.has_acl("users.user-123.update"));
/// assert!(!checker.has_acl("users.admin.read"));
/// assert_eq!(
///     checker.get_failed_patterns(["users.1.read", "users.1.delete"]),
///     vec!["users.1.delete"],
/// );
/// ```
#[derive(Debug, Clone)]
pub struct AclChecker {
    access: Arc<AccessCheck>,
}

impl AclChecker {
    /// Builds a checker through the process-wide engine
    pub fn new(principal: &Principal) -> Result<Self> {
        AclEngine::shared().checker_for(principal)
    }

    pub fn from_access_check(access: Arc<AccessCheck>) -> Self {
        Self { access }
    }

    pub fn access_check(&self) -> &Arc<AccessCheck> {
        &self.access
    }

    pub fn has_acl(&self, pattern: &str) -> bool {
        self.access.matches_required_access(Some(pattern))
    }

    /// `true` as soon as one pattern is granted
    pub fn has_any_acl<I, S>(&self, patterns: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        patterns.into_iter().any(|p| self.has_acl(p.as_ref()))
    }

    /// `false` as soon as one pattern is missing
    pub fn has_all_acls<I, S>(&self, patterns: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        patterns.into_iter().all(|p| self.has_acl(p.as_ref()))
    }

    pub fn is_superuser(&self) -> bool {
        self.has_acl(SUPERUSER_PATTERN)
    }

    /// Granted patterns among `patterns`, in input order
    pub fn get_matching_patterns<I, S>(&self, patterns: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.partition(patterns, true)
    }

    /// Missing patterns among `patterns`, in input order
    pub fn get_failed_patterns<I, S>(&self, patterns: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.partition(patterns, false)
    }

    pub fn can_grant_acl(&self, pattern: &str) -> bool {
        self.access.may_add_access(pattern)
    }

    pub fn can_revoke_acl(&self, pattern: &str) -> bool {
        self.access.may_remove_access(pattern)
    }

    /// Like [`has_acl`](Self::has_acl) but returns `AclError::AccessDenied`
    pub fn require_acl(&self, pattern: &str) -> Result<()> {
        if self.has_acl(pattern) {
            Ok(())
        } else {
            Err(AclError::AccessDenied {
                required: pattern.to_string(),
            })
        }
    }

    /// Fails with every missing pattern if any is not granted
    pub fn require_all_acls<I, S>(&self, patterns: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let missing = self.get_failed_patterns(patterns);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(AclError::MissingAcls { missing })
        }
    }

    fn partition<I, S>(&self, patterns: I, granted: bool) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        patterns
            .into_iter()
            .filter(|p| self.has_acl(p.as_ref()) == granted)
            .map(|p| p.as_ref().to_string())
            .collect()
    }
}
