//! Authenticated identity consumed by the engine

use crate::error::{AclError, Result};
use serde::{Deserialize, Serialize};

/// The identity and granted ACL list of an already-validated token.
///
/// Token validation happens upstream; this struct only carries what the
/// engine needs. Claims may name the subject `sub` or `auth_id` and the
/// granted list `acl`.
///
/// ```
/// use acl_engine::Principal;
///
/// let claims = serde_json::json!({
///     "sub": "user-123",
///     "session_id": "sess-9",
///     "acl": ["users.me.#"],
/// });
/// let principal = Principal::from_claims(claims).unwrap();
/// assert_eq!(principal.subject_id, "user-123");
/// assert_eq!(principal.granted, vec!["users.me.#"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    #[serde(alias = "sub", alias = "auth_id")]
    pub subject_id: String,

    #[serde(default)]
    pub session_id: String,

    #[serde(default, alias = "acl")]
    pub granted: Vec<String>,
}

impl Principal {
    pub fn new(
        subject_id: impl Into<String>,
        session_id: impl Into<String>,
        granted: Vec<String>,
    ) -> Self {
        Self {
            subject_id: subject_id.into(),
            session_id: session_id.into(),
            granted,
        }
    }

    /// Reads a principal out of decoded token claims.
    ///
    /// # Errors
    ///
    /// Returns `AclError::InvalidClaims` if the subject is missing or a field
    /// has the wrong type.
    pub fn from_claims(claims: serde_json::Value) -> Result<Self> {
        serde_json::from_value(claims).map_err(AclError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_canonical_field_names() {
        let principal = Principal::from_claims(json!({
            "subject_id": "u1",
            "session_id": "s1",
            "granted": ["a.b", "!a.c"],
        }))
        .unwrap();
        assert_eq!(
            principal,
            Principal::new("u1", "s1", vec!["a.b".to_string(), "!a.c".to_string()])
        );
    }

    #[test]
    fn test_auth_id_alias() {
        let principal = Principal::from_claims(json!({ "auth_id": "svc-1", "acl": [] })).unwrap();
        assert_eq!(principal.subject_id, "svc-1");
        assert_eq!(principal.session_id, "");
        assert!(principal.granted.is_empty());
    }

    #[test]
    fn test_missing_subject() {
        let err = Principal::from_claims(json!({ "acl": ["a"] })).unwrap_err();
        assert!(matches!(err, AclError::InvalidClaims(_)));
    }

    #[test]
    fn test_wrong_granted_type() {
        let err = Principal::from_claims(json!({ "sub": "u1", "acl": "a.b" })).unwrap_err();
        assert!(matches!(err, AclError::InvalidClaims(_)));
    }
}
