//! Error message sanitization to prevent internal data leakage
//!
//! Storage and provider errors can embed connection strings, file paths or
//! SQL fragments. Anything surfaced to a user goes through here first; the
//! original error is only ever written to the server log.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Sanitized error that is safe to return to users
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct SanitizedError {
    /// User-safe error message
    pub message: String,
    /// Generic error code for client handling
    pub error_code: Option<String>,
}

impl SanitizedError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error_code: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.error_code = Some(code.into());
        self
    }
}

static SENSITIVE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        // Database connection strings
        Regex::new(r"(?i)(postgresql|mysql|sqlite)://\S+").unwrap(),
        // Tokens, keys, secrets
        Regex::new(r"(?i)(jwt|token|key|secret|password)[=:\s]+[A-Za-z0-9+/=_-]{16,}").unwrap(),
        // File paths
        Regex::new(r"(/[A-Za-z0-9_\-./]+){2,}").unwrap(),
        // IP addresses
        Regex::new(r"\b(?:[0-9]{1,3}\.){3}[0-9]{1,3}\b").unwrap(),
        // SQL schema fragments
        Regex::new(r"(?i)(table|column|constraint|index)\s+[A-Za-z0-9_]+").unwrap(),
    ]
});

const MAX_MESSAGE_LENGTH: usize = 200;

/// Converts internal errors to user-safe messages
#[derive(Debug, Clone, Default)]
pub struct ErrorSanitizer;

impl ErrorSanitizer {
    pub fn new() -> Self {
        Self
    }

    /// Sanitize any error's display output
    pub fn sanitize_error<E: std::fmt::Display>(&self, error: &E) -> SanitizedError {
        self.sanitize_message(&error.to_string())
    }

    /// Redact sensitive fragments and clamp length
    pub fn sanitize_message(&self, message: &str) -> SanitizedError {
        let mut sanitized = message.to_string();
        for pattern in SENSITIVE_PATTERNS.iter() {
            sanitized = pattern.replace_all(&sanitized, "[REDACTED]").to_string();
        }

        if sanitized.chars().count() > MAX_MESSAGE_LENGTH {
            sanitized = sanitized.chars().take(MAX_MESSAGE_LENGTH).collect::<String>() + "…";
        }

        // A message that was mostly redaction tells the user nothing useful
        if sanitized.contains("[REDACTED]") {
            SanitizedError::new("Une erreur interne est survenue").with_code("INTERNAL_ERROR")
        } else {
            SanitizedError::new(sanitized)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redacts_connection_strings() {
        let sanitizer = ErrorSanitizer::new();
        let result =
            sanitizer.sanitize_message("cannot reach postgresql://user:pw@db.internal:5432/app");
        assert!(!result.message.contains("db.internal"));
        assert_eq!(result.error_code.as_deref(), Some("INTERNAL_ERROR"));
    }

    #[test]
    fn test_passes_clean_messages() {
        let sanitizer = ErrorSanitizer::new();
        let result = sanitizer.sanitize_message("Le nom est requis");
        assert_eq!(result.message, "Le nom est requis");
        assert!(result.error_code.is_none());
    }

    #[test]
    fn test_clamps_length() {
        let sanitizer = ErrorSanitizer::new();
        let long = "x".repeat(500);
        let result = sanitizer.sanitize_message(&long);
        assert!(result.message.chars().count() <= MAX_MESSAGE_LENGTH + 1);
    }
}
