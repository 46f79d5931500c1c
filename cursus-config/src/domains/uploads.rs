//! Upload policy configuration

use crate::error::ConfigResult;
use crate::validation::{validate_positive, validate_required_string, Validatable};
use serde::{Deserialize, Serialize};

/// Upload policy for ticket attachments
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadsConfig {
    /// Directory the attachment files are written under
    #[serde(default = "default_dir")]
    pub dir: String,

    /// Maximum accepted file size in bytes
    #[serde(default = "default_max_size_bytes")]
    pub max_size_bytes: usize,

    /// MIME type allow-list
    #[serde(default = "default_allowed_mime_types")]
    pub allowed_mime_types: Vec<String>,
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            max_size_bytes: default_max_size_bytes(),
            allowed_mime_types: default_allowed_mime_types(),
        }
    }
}

impl UploadsConfig {
    /// Whether the given content type is on the allow-list
    pub fn is_allowed_mime(&self, content_type: &str) -> bool {
        self.allowed_mime_types.iter().any(|m| m == content_type)
    }
}

impl Validatable for UploadsConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_required_string(&self.dir, "dir", self.domain_name())?;
        validate_positive(self.max_size_bytes, "max_size_bytes", self.domain_name())?;
        if self.allowed_mime_types.is_empty() {
            return Err(self.validation_error("allowed_mime_types cannot be empty"));
        }
        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "uploads"
    }
}

fn default_dir() -> String {
    "uploads".to_string()
}

fn default_max_size_bytes() -> usize {
    // 10 MB
    10 * 1024 * 1024
}

fn default_allowed_mime_types() -> Vec<String> {
    vec![
        "image/jpeg".to_string(),
        "image/png".to_string(),
        "image/gif".to_string(),
        "image/webp".to_string(),
        "application/pdf".to_string(),
        "application/msword".to_string(),
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_list() {
        let config = UploadsConfig::default();
        assert!(config.is_allowed_mime("application/pdf"));
        assert!(config.is_allowed_mime("image/png"));
        assert!(!config.is_allowed_mime("application/x-msdownload"));
    }

    #[test]
    fn test_default_max_size_is_ten_megabytes() {
        assert_eq!(UploadsConfig::default().max_size_bytes, 10 * 1024 * 1024);
    }
}
