//! HTTP server and session configuration

use crate::error::ConfigResult;
use crate::validation::{validate_positive, validate_required_string, Validatable};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Session token verification configuration
    #[serde(default)]
    pub auth: AuthConfig,

    /// CORS allowed origins (`*` for any)
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

/// Session token verification
///
/// Token issuance lives with the external auth provider; this service only
/// verifies signatures and expiry on what it receives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HMAC secret shared with the auth provider
    #[serde(default = "default_session_secret")]
    pub session_secret: String,

    /// Validity window for extranet invite tokens
    #[serde(with = "super::utils::serde_duration", default = "default_invite_ttl")]
    pub invite_token_ttl: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            auth: AuthConfig::default(),
            cors_origins: default_cors_origins(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_secret: default_session_secret(),
            invite_token_ttl: default_invite_ttl(),
        }
    }
}

impl Validatable for ServerConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_required_string(&self.bind_address, "bind_address", self.domain_name())?;
        validate_positive(self.port, "port", self.domain_name())?;
        self.auth.validate()?;
        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "server"
    }
}

impl Validatable for AuthConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_required_string(&self.session_secret, "session_secret", self.domain_name())?;

        if self.session_secret.len() < 32 {
            return Err(self.validation_error("session_secret must be at least 32 characters long"));
        }

        validate_positive(
            self.invite_token_ttl.as_secs(),
            "invite_token_ttl",
            self.domain_name(),
        )?;

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "server.auth"
    }
}

// Default value functions
fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_session_secret() -> String {
    // Development-only default; deployments override it
    "change-me-in-production-0123456789abcdef".to_string()
}

fn default_invite_ttl() -> Duration {
    // 24 hours from issuance
    Duration::from_secs(24 * 3600)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.auth.invite_token_ttl, Duration::from_secs(86400));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_short_secret_rejected() {
        let mut config = ServerConfig::default();
        config.auth.session_secret = "short".to_string();
        assert!(config.validate().is_err());
    }
}
