//! Unified API error type and field-level error accumulation

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reserved key for whole-operation errors not attributable to one field
pub const FORM_ERROR_KEY: &str = "_form";

/// Field name → list of human-readable messages
///
/// Serializes as a plain JSON object so UIs can attach messages to inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against a field
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Record a whole-operation message under the reserved `_form` key
    pub fn add_form(&mut self, message: impl Into<String>) {
        self.add(FORM_ERROR_KEY, message);
    }

    /// Build a single-field error in one call
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Build a `_form`-only error in one call
    pub fn form(message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add_form(message);
        errors
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.0.iter()
    }

    /// Fold into a result: `Ok(value)` when no error was recorded
    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

/// Unified API error carried across crate boundaries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Machine-readable error code (e.g. `NOT_FOUND`)
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Field-level details for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldErrors>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            fields: None,
        }
    }

    pub fn not_found(entity: &str, id: &str) -> Self {
        Self::new("NOT_FOUND", format!("{} '{}' introuvable", entity, id))
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new("UNAUTHORIZED", message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new("FORBIDDEN", message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new("CONFLICT", message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new("SERVICE_UNAVAILABLE", message)
    }

    pub fn validation(fields: FieldErrors) -> Self {
        Self {
            code: "VALIDATION_ERROR".to_string(),
            message: "La saisie contient des erreurs".to_string(),
            fields: Some(fields),
        }
    }

    /// HTTP status this error maps to
    pub fn http_status_code(&self) -> u16 {
        match self.code.as_str() {
            "NOT_FOUND" => 404,
            "BAD_REQUEST" | "VALIDATION_ERROR" => 400,
            "UNAUTHORIZED" => 401,
            "FORBIDDEN" => 403,
            "CONFLICT" => 409,
            "SERVICE_UNAVAILABLE" => 503,
            _ => 500,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_errors_accumulate() {
        let mut errors = FieldErrors::new();
        errors.add("email", "format invalide");
        errors.add("email", "déjà utilisé");
        errors.add_form("opération refusée");

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["email"].as_array().unwrap().len(), 2);
        assert_eq!(json[FORM_ERROR_KEY][0], "opération refusée");
    }

    #[test]
    fn test_into_result() {
        let empty = FieldErrors::new();
        assert!(empty.into_result(1).is_ok());

        let errors = FieldErrors::single("nom", "requis");
        assert!(errors.into_result(1).is_err());
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::not_found("Salle", "7").http_status_code(), 404);
        assert_eq!(ApiError::validation(FieldErrors::form("x")).http_status_code(), 400);
        assert_eq!(ApiError::internal_error("boom").http_status_code(), 500);
    }
}
