//! Field-level input validation
//!
//! Validators accumulate human-readable messages into a [`FieldErrors`]
//! map instead of failing on the first problem, so a form submission gets
//! every complaint at once. Validation always runs before any storage
//! call.

use cursus_api_types::FieldErrors;
use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

/// Ceiling applied to every free-text field
pub const MAX_STRING_LENGTH: usize = 10_000;

/// Ceiling for names, labels and other short identifiers
pub const MAX_NAME_LENGTH: usize = 255;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap());

/// Normalize an optional text field: trim, and treat empty or
/// whitespace-only submissions as absent.
///
/// This is the persistence convention for every optional string column -
/// an empty string is never stored as data distinct from "not set".
/// Normalizing an already-normalized value is a no-op.
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    match value {
        None => None,
        Some(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
    }
}

/// Accumulating input validator
#[derive(Debug, Clone)]
pub struct InputValidator {
    max_string_length: usize,
}

impl Default for InputValidator {
    fn default() -> Self {
        Self {
            max_string_length: MAX_STRING_LENGTH,
        }
    }
}

impl InputValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a required text field; returns the trimmed value on success
    pub fn required_string(
        &self,
        errors: &mut FieldErrors,
        field: &str,
        value: &str,
        max_len: usize,
    ) -> Option<String> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            errors.add(field, "Ce champ est requis");
            return None;
        }
        let max = max_len.min(self.max_string_length);
        if trimmed.chars().count() > max {
            errors.add(field, format!("{} caractères maximum", max));
            return None;
        }
        Some(trimmed.to_string())
    }

    /// Validate an optional text field; empty submissions become `None`
    pub fn optional_string(
        &self,
        errors: &mut FieldErrors,
        field: &str,
        value: Option<String>,
        max_len: usize,
    ) -> Option<String> {
        let normalized = normalize_optional(value)?;
        let max = max_len.min(self.max_string_length);
        if normalized.chars().count() > max {
            errors.add(field, format!("{} caractères maximum", max));
            return None;
        }
        Some(normalized)
    }

    /// Validate a required email address
    pub fn email(&self, errors: &mut FieldErrors, field: &str, value: &str) -> Option<String> {
        let trimmed = self.required_string(errors, field, value, MAX_NAME_LENGTH)?;
        if !EMAIL_RE.is_match(&trimmed) {
            errors.add(field, "Adresse email invalide");
            return None;
        }
        Some(trimmed.to_lowercase())
    }

    /// Validate a UUID-formatted field
    pub fn uuid(&self, errors: &mut FieldErrors, field: &str, value: &str) -> Option<Uuid> {
        match Uuid::parse_str(value.trim()) {
            Ok(uuid) => Some(uuid),
            Err(_) => {
                errors.add(field, "Identifiant invalide");
                None
            }
        }
    }

    /// Validate an optional non-negative integer
    pub fn non_negative(
        &self,
        errors: &mut FieldErrors,
        field: &str,
        value: Option<i32>,
    ) -> Option<i32> {
        match value {
            Some(v) if v < 0 => {
                errors.add(field, "Doit être positif ou nul");
                None
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_optional_empty_string() {
        assert_eq!(normalize_optional(Some("".to_string())), None);
        assert_eq!(normalize_optional(Some("   ".to_string())), None);
        assert_eq!(normalize_optional(None), None);
        assert_eq!(
            normalize_optional(Some("  salle A  ".to_string())),
            Some("salle A".to_string())
        );
    }

    #[test]
    fn test_normalize_optional_is_idempotent() {
        let once = normalize_optional(Some("".to_string()));
        let twice = normalize_optional(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_required_string() {
        let validator = InputValidator::new();
        let mut errors = FieldErrors::new();

        assert_eq!(
            validator.required_string(&mut errors, "nom", "  Salle B  ", 255),
            Some("Salle B".to_string())
        );
        assert!(errors.is_empty());

        assert_eq!(validator.required_string(&mut errors, "nom", "   ", 255), None);
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_email_validation() {
        let validator = InputValidator::new();
        let mut errors = FieldErrors::new();

        assert_eq!(
            validator.email(&mut errors, "email", "Jean.Dupont@Example.org"),
            Some("jean.dupont@example.org".to_string())
        );
        assert!(errors.is_empty());

        assert_eq!(validator.email(&mut errors, "email", "pas-un-email"), None);
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_non_negative() {
        let validator = InputValidator::new();
        let mut errors = FieldErrors::new();

        assert_eq!(validator.non_negative(&mut errors, "capacite", Some(12)), Some(12));
        assert_eq!(validator.non_negative(&mut errors, "capacite", None), None);
        assert!(errors.is_empty());

        assert_eq!(validator.non_negative(&mut errors, "capacite", Some(-1)), None);
        assert!(!errors.is_empty());
    }
}
