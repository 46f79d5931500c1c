//! Cache configuration

use crate::error::ConfigResult;
use crate::validation::{validate_positive, Validatable};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Whether the best-effort cache is enabled at all
    #[serde(default = "super::utils::default_true")]
    pub enabled: bool,

    /// Default TTL for cached list pages
    #[serde(with = "super::utils::serde_duration", default = "default_ttl")]
    pub default_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            default_ttl: default_ttl(),
        }
    }
}

impl Validatable for CacheConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.enabled {
            validate_positive(self.default_ttl.as_secs(), "default_ttl", self.domain_name())?;
        }
        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "cache"
    }
}

fn default_ttl() -> Duration {
    Duration::from_secs(60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_cache_skips_ttl_check() {
        let config = CacheConfig {
            enabled: false,
            default_ttl: Duration::from_secs(0),
        };
        assert!(config.validate().is_ok());
    }
}
