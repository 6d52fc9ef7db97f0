//! Cache capacity configuration

use crate::error::{AclError, Result};
use serde::{Deserialize, Serialize};

/// Environment variable overriding [`CacheConfig::substitution_capacity`]
pub const ENV_SUBSTITUTION_CACHE_SIZE: &str = "ACL_SUBSTITUTION_CACHE_SIZE";
/// Environment variable overriding [`CacheConfig::compilation_capacity`]
pub const ENV_COMPILATION_CACHE_SIZE: &str = "ACL_COMPILATION_CACHE_SIZE";
/// Environment variable overriding [`CacheConfig::access_check_capacity`]
pub const ENV_ACCESS_CHECK_CACHE_SIZE: &str = "ACL_ACCESS_CHECK_CACHE_SIZE";

/// Capacities of the three engine caches
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Maximum number of memoized reserved-word substitutions
    #[serde(default = "default_substitution_capacity")]
    pub substitution_capacity: usize,

    /// Maximum number of compiled patterns
    #[serde(default = "default_compilation_capacity")]
    pub compilation_capacity: usize,

    /// Maximum number of `AccessCheck` instances
    #[serde(default = "default_access_check_capacity")]
    pub access_check_capacity: usize,
}

fn default_substitution_capacity() -> usize {
    2048
}

fn default_compilation_capacity() -> usize {
    2048
}

fn default_access_check_capacity() -> usize {
    512
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            substitution_capacity: default_substitution_capacity(),
            compilation_capacity: default_compilation_capacity(),
            access_check_capacity: default_access_check_capacity(),
        }
    }
}

impl CacheConfig {
    /// Builds a config from the defaults, overridden by any `ACL_*_CACHE_SIZE`
    /// environment variables that are set.
    ///
    /// # Errors
    ///
    /// Returns `AclError::InvalidConfig` if a variable is not a positive integer.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        let overrides = [
            (ENV_SUBSTITUTION_CACHE_SIZE, &mut config.substitution_capacity),
            (ENV_COMPILATION_CACHE_SIZE, &mut config.compilation_capacity),
            (ENV_ACCESS_CHECK_CACHE_SIZE, &mut config.access_check_capacity),
        ];
        for (name, slot) in overrides {
            if let Some(raw) = lookup(name) {
                *slot = raw.trim().parse().map_err(|_| {
                    AclError::InvalidConfig(format!("{} must be an integer, got '{}'", name, raw))
                })?;
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Rejects zero capacities
    pub fn validate(&self) -> Result<()> {
        let capacities = [
            ("substitution_capacity", self.substitution_capacity),
            ("compilation_capacity", self.compilation_capacity),
            ("access_check_capacity", self.access_check_capacity),
        ];
        for (name, value) in capacities {
            if value == 0 {
                return Err(AclError::InvalidConfig(format!("{} must be greater than 0", name)));
            }
        }
        Ok(())
    }
}
