//! Domain-specific configuration modules

pub mod cache;
pub mod database;
pub mod logging;
pub mod mail;
pub mod server;
pub mod uploads;
pub mod utils;

use crate::error::ConfigResult;
use crate::validation::Validatable;
use serde::{Deserialize, Serialize};

/// Main Cursus configuration combining all domains
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CursusConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: server::ServerConfig,

    /// Database configuration
    #[serde(default)]
    pub database: database::DatabaseConfig,

    /// Caching configuration
    #[serde(default)]
    pub cache: cache::CacheConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: logging::LoggingConfig,

    /// Upload policy configuration
    #[serde(default)]
    pub uploads: uploads::UploadsConfig,

    /// Mail provider configuration (optional; invitations are logged
    /// instead of sent when absent)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mail: Option<mail::MailConfig>,
}

impl CursusConfig {
    /// Validate all domain configurations
    pub fn validate_all(&self) -> ConfigResult<()> {
        self.server.validate()?;
        self.database.validate()?;
        self.cache.validate()?;
        self.logging.validate()?;
        self.uploads.validate()?;

        if let Some(ref mail) = self.mail {
            mail.validate()?;
        }

        Ok(())
    }

    /// Generate a sample configuration file
    pub fn generate_sample() -> String {
        let config = CursusConfig::default();
        serde_yaml::to_string(&config)
            .unwrap_or_else(|_| "# Failed to generate sample config".to_string())
    }
}
