//! # ACL Pattern Evaluation Engine
//!
//! Decides whether a principal's granted ACL patterns cover a required access
//! string such as `users.123.read`. Supports:
//! - Single-segment (`*`) and recursive (`#`) wildcards
//! - Negation patterns (`!`) that override any positive grant
//! - Identity-dependent reserved words (`me`, `my_session`) and the `edit`
//!   alias for `update`
//! - Bounded LRU caching of substitutions, compiled patterns and whole
//!   evaluators, always keyed by identity
//! - Delegation checks (may a principal grant or revoke a pattern)
//!
//! ## Example
//!
//! ```rust
//! use acl_engine::{AclEngine, CacheConfig, Principal};
//!
//! # fn example() -> acl_engine::Result<()> {
//! let engine = AclEngine::new(CacheConfig::default());
//!
//! let principal = Principal::new(
//!     "user-123",
//!     "sess-1",
//!     vec!["users.*.read".into(), "users.me.update".into(), "!users.admin.*".into()],
//! );
//! let checker = engine.checker_for(&principal)?;
//!
//! assert!(checker.has_acl("users.789.read"));
//! assert!(checker.has_acl("users.user-123.update"));
//! assert!(!checker.has_acl("users.admin.read"));
//! assert!(!checker.is_superuser());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod access;
pub mod cache;
pub mod checker;
pub mod config;
pub mod engine;
pub mod error;
pub mod pattern;
pub mod principal;

pub use access::AccessCheck;
pub use cache::{BoundedCache, CacheStats};
pub use checker::{AclChecker, SUPERUSER_PATTERN};
pub use config::CacheConfig;
pub use engine::{AclEngine, EngineStats};
pub use error::{AclError, Result};
pub use pattern::CompiledPattern;
pub use principal::Principal;
