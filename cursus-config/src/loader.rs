//! Configuration loading and environment variable handling

use crate::domains::CursusConfig;
use crate::error::{ConfigError, ConfigResult};
use std::path::Path;

/// Configuration loader with environment variable support
pub struct ConfigLoader {
    /// Environment variable prefix
    prefix: String,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new config loader with default prefix
    pub fn new() -> Self {
        Self {
            prefix: "CURSUS".to_string(),
        }
    }

    /// Create a new config loader with custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Load configuration from a YAML file with environment overrides
    pub fn from_file(&self, path: impl AsRef<Path>) -> ConfigResult<CursusConfig> {
        let content = std::fs::read_to_string(path)?;
        let mut config: CursusConfig = serde_yaml::from_str(&content)?;

        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env(&self) -> ConfigResult<CursusConfig> {
        let mut config = CursusConfig::default();
        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;
        Ok(config)
    }

    /// Load configuration with fallback chain
    pub fn load(&self, config_path: Option<impl AsRef<Path>>) -> ConfigResult<CursusConfig> {
        match config_path {
            Some(path) => self.from_file(path),
            None => self.from_env(),
        }
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(&self, config: &mut CursusConfig) -> ConfigResult<()> {
        if let Ok(addr) = self.get_env_var("BIND_ADDRESS") {
            config.server.bind_address = addr;
        }

        if let Ok(port) = self.get_env_var("PORT") {
            config.server.port = port
                .parse()
                .map_err(|e| ConfigError::EnvError(format!("Invalid PORT: {}", e)))?;
        }

        if let Ok(secret) = self.get_env_var("SESSION_SECRET") {
            config.server.auth.session_secret = secret;
        }

        if let Ok(url) = self.get_env_var("DATABASE_URL") {
            config.database.url = url;
        }

        if let Ok(max) = self.get_env_var("DATABASE_MAX_CONNECTIONS") {
            config.database.max_connections = max.parse().map_err(|e| {
                ConfigError::EnvError(format!("Invalid DATABASE_MAX_CONNECTIONS: {}", e))
            })?;
        }

        if let Ok(enabled) = self.get_env_var("CACHE_ENABLED") {
            config.cache.enabled = enabled
                .parse()
                .map_err(|e| ConfigError::EnvError(format!("Invalid CACHE_ENABLED: {}", e)))?;
        }

        if let Ok(level) = self.get_env_var("LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(dir) = self.get_env_var("UPLOADS_DIR") {
            config.uploads.dir = dir;
        }

        // Mail is only configured when both endpoint and key are present
        if let (Ok(api_url), Ok(api_key)) = (
            self.get_env_var("MAIL_API_URL"),
            self.get_env_var("MAIL_API_KEY"),
        ) {
            let mut mail = config.mail.clone().unwrap_or(crate::domains::mail::MailConfig {
                api_url: String::new(),
                api_key: String::new(),
                from_address: "no-reply@cursus.app".to_string(),
                app_base_url: "http://localhost:8080".to_string(),
            });
            mail.api_url = api_url;
            mail.api_key = api_key;
            config.mail = Some(mail);
        }

        Ok(())
    }

    /// Get environment variable with prefix
    fn get_env_var(&self, name: &str) -> Result<String, std::env::VarError> {
        std::env::var(format!("{}_{}", self.prefix, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "server:\n  port: 9090\ndatabase:\n  url: \"sqlite::memory:\""
        )
        .unwrap();

        let loader = ConfigLoader::with_prefix("CURSUS_TEST_NONE");
        let config = loader.from_file(file.path()).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.database.url, "sqlite::memory:");
        // Untouched domains keep their defaults
        assert!(config.cache.enabled);
    }

    #[test]
    fn test_env_override() {
        std::env::set_var("CURSUS_TESTA_PORT", "7070");
        let loader = ConfigLoader::with_prefix("CURSUS_TESTA");
        let config = loader.from_env().unwrap();
        assert_eq!(config.server.port, 7070);
        std::env::remove_var("CURSUS_TESTA_PORT");
    }
}
