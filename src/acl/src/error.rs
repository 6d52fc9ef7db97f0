//! Error types for the ACL engine

use thiserror::Error;

/// ACL engine errors
#[derive(Debug, Error)]
pub enum AclError {
    /// A granted pattern could not be compiled into a matcher
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Required access is not covered by the granted patterns
    #[error("Access denied: missing '{required}'")]
    AccessDenied { required: String },

    /// Several required patterns are not covered
    #[error("Access denied: missing {}", .missing.join(", "))]
    MissingAcls { missing: Vec<String> },

    /// Token claims do not describe a principal
    #[error("Invalid claims: {0}")]
    InvalidClaims(#[from] serde_json::Error),

    /// Invalid engine configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for ACL operations
pub type Result<T> = std::result::Result<T, AclError>;
