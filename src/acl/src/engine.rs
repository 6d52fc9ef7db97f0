//! ACL engine: owns the substitution, compilation and access-check caches
//!
//! ```text
//! build_access_check ──► [access-check cache]
//!                              │ miss
//!                              ▼
//!                   compile_pattern (per granted) ──► [compilation cache]
//!                                                          │ miss
//!                                                          ▼
//!                                       substitute ──► [substitution cache]
//! ```
//!
//! Every cache key includes the subject and session ids, so two identities
//! never share an entry.

use crate::access::AccessCheck;
use crate::cache::{compute_key, BoundedCache, CacheStats};
use crate::checker::AclChecker;
use crate::config::CacheConfig;
use crate::error::Result;
use crate::pattern::{self, CompiledPattern};
use crate::principal::Principal;

use std::sync::{Arc, OnceLock};
use tracing::{debug, info, warn};

static SHARED_ENGINE: OnceLock<AclEngine> = OnceLock::new();

/// Key namespaces, so equal parts in different caches never look alike
const SUBSTITUTION_KEY: &str = "substitution";
const COMPILATION_KEY: &str = "compilation";
const ACCESS_CHECK_KEY: &str = "access_check";

/// Statistics for all three caches
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineStats {
    pub substitution: CacheStats,
    pub compilation: CacheStats,
    pub access_check: CacheStats,
}

/// Composition root of the ACL engine
///
/// # Thread Safety
///
/// `AclEngine` is `Send + Sync`; share it by reference or inside an `Arc`.
///
/// # Examples
///
/// ```
/// use acl_engine::{AclEngine, CacheConfig};
///
/// let engine = AclEngine::new(CacheConfig::default());
///
/// let first = engine.build_access_check("u1", "s1", &["users.me.read"]).unwrap();
/// let second = engine.build_access_check("u1", "s1", &["users.me.read"]).unwrap();
/// assert!(std::sync::Arc::ptr_eq(&first, &second));
///
/// assert!(first.matches_required_access(Some("users.u1.read")));
/// ```
pub struct AclEngine {
    config: CacheConfig,
    substitutions: BoundedCache<Arc<str>>,
    compiled: BoundedCache<Arc<CompiledPattern>>,
    access_checks: BoundedCache<Arc<AccessCheck>>,
}

impl AclEngine {
    /// Creates an engine with empty caches sized by `config`
    pub fn new(config: CacheConfig) -> Self {
        info!(
            substitution_capacity = config.substitution_capacity,
            compilation_capacity = config.compilation_capacity,
            access_check_capacity = config.access_check_capacity,
            "AclEngine initialized"
        );

        Self {
            substitutions: BoundedCache::new(SUBSTITUTION_KEY, config.substitution_capacity),
            compiled: BoundedCache::new(COMPILATION_KEY, config.compilation_capacity),
            access_checks: BoundedCache::new(ACCESS_CHECK_KEY, config.access_check_capacity),
            config,
        }
    }

    /// Process-wide engine, configured from the environment on first use.
    ///
    /// Invalid environment overrides are logged and the defaults are used.
    pub fn shared() -> &'static AclEngine {
        SHARED_ENGINE.get_or_init(|| {
            let config = CacheConfig::from_env().unwrap_or_else(|err| {
                warn!(error = %err, "ignoring ACL cache configuration from environment");
                CacheConfig::default()
            });
            AclEngine::new(config)
        })
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Memoized reserved-word substitution of an escaped expression
    pub fn substitute(&self, escaped_expression: &str, subject_id: &str, session_id: &str) -> String {
        let key = compute_key([SUBSTITUTION_KEY, escaped_expression, subject_id, session_id]);
        let substituted = self.substitutions.get_or_insert_with(key, || {
            Arc::from(pattern::substitute(escaped_expression, subject_id, session_id))
        });
        substituted.to_string()
    }

    /// Memoized compilation of one raw (non-negated) pattern for an identity
    pub fn compile_pattern(
        &self,
        raw_pattern: &str,
        subject_id: &str,
        session_id: &str,
    ) -> Result<Arc<CompiledPattern>> {
        let key = compute_key([COMPILATION_KEY, raw_pattern, subject_id, session_id]);
        self.compiled.get_or_try_insert_with(key, || {
            debug!(pattern = raw_pattern, subject = subject_id, "compiling ACL pattern");
            pattern::compile_with(raw_pattern, |expression| {
                self.substitute(expression, subject_id, session_id)
            })
            .map(Arc::new)
            .map_err(|err| {
                warn!(pattern = raw_pattern, error = %err, "failed to compile ACL pattern");
                err
            })
        })
    }

    /// Returns the cached `AccessCheck` for this identity and granted list,
    /// building it on first use.
    ///
    /// The granted list is keyed in order; the same patterns in a different
    /// order build a separate but equivalent instance.
    pub fn build_access_check<S: AsRef<str>>(
        &self,
        subject_id: &str,
        session_id: &str,
        granted: &[S],
    ) -> Result<Arc<AccessCheck>> {
        let count = granted.len().to_string();
        let key = compute_key(
            [ACCESS_CHECK_KEY, subject_id, session_id, count.as_str()]
                .into_iter()
                .chain(granted.iter().map(|p| p.as_ref())),
        );

        self.access_checks.get_or_try_insert_with(key, || {
            debug!(
                subject = subject_id,
                session = session_id,
                granted = granted.len(),
                "building AccessCheck"
            );
            AccessCheck::compile(self, subject_id, session_id, granted).map(Arc::new)
        })
    }

    /// Builds a façade for `principal` backed by the cached `AccessCheck`
    pub fn checker_for(&self, principal: &Principal) -> Result<AclChecker> {
        let access = self.build_access_check(
            &principal.subject_id,
            &principal.session_id,
            principal.granted.as_slice(),
        )?;
        Ok(AclChecker::from_access_check(access))
    }

    /// Statistics for every cache
    pub fn stats(&self) -> EngineStats {
        EngineStats {
            substitution: self.substitutions.stats(),
            compilation: self.compiled.stats(),
            access_check: self.access_checks.stats(),
        }
    }

    /// Drops every cached entry and resets statistics
    pub fn clear_caches(&self) {
        self.access_checks.clear();
        self.compiled.clear();
        self.substitutions.clear();
        debug!("ACL engine caches cleared");
    }
}

impl Default for AclEngine {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
