//! Mail provider configuration

use crate::error::ConfigResult;
use crate::validation::{validate_required_string, validate_url, Validatable};
use serde::{Deserialize, Serialize};

/// Mail provider configuration
///
/// Delivery goes through a third-party HTTP API; only the endpoint, key
/// and sender identity live here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Provider API endpoint
    pub api_url: String,

    /// Provider API key
    pub api_key: String,

    /// Sender address on outbound mail
    #[serde(default = "default_from_address")]
    pub from_address: String,

    /// Public base URL used to build links inside emails
    #[serde(default = "default_app_base_url")]
    pub app_base_url: String,
}

impl Validatable for MailConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_url(&self.api_url, "api_url", self.domain_name())?;
        validate_required_string(&self.api_key, "api_key", self.domain_name())?;
        validate_required_string(&self.from_address, "from_address", self.domain_name())?;
        validate_url(&self.app_base_url, "app_base_url", self.domain_name())?;
        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "mail"
    }
}

fn default_from_address() -> String {
    "no-reply@cursus.app".to_string()
}

fn default_app_base_url() -> String {
    "http://localhost:8080".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_valid_api_url() {
        let config = MailConfig {
            api_url: "not a url".to_string(),
            api_key: "key".to_string(),
            from_address: default_from_address(),
            app_base_url: default_app_base_url(),
        };
        assert!(config.validate().is_err());
    }
}
