//! Web-specific error types and conversions
//!
//! Every failure that crosses the HTTP boundary is rendered as
//! `{"error": {"code", "message", "fields"?}}` where `fields` maps field
//! names to message lists, with the reserved `_form` key for
//! whole-operation problems.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cursus_api_types::{ApiError, FieldErrors};
use cursus_core::ErrorSanitizer;
use serde_json::json;
use thiserror::Error;

/// Web-specific error type for HTTP API operations
#[derive(Debug, Error)]
pub enum WebError {
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("Non authentifié")]
    Unauthorized,

    #[error("{message}")]
    Forbidden { message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    Conflict { message: String },

    #[error("Internal server error: {message}")]
    Internal { message: String },

    #[error("Service unavailable: {message}")]
    ServiceUnavailable { message: String },

    #[error("Validation failed")]
    Validation { fields: FieldErrors },
}

/// Result type for web operations
pub type WebResult<T> = Result<T, WebError>;

impl WebError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebError::BadRequest { .. } | WebError::Validation { .. } => StatusCode::BAD_REQUEST,
            WebError::Unauthorized => StatusCode::UNAUTHORIZED,
            WebError::Forbidden { .. } => StatusCode::FORBIDDEN,
            WebError::NotFound { .. } => StatusCode::NOT_FOUND,
            WebError::Conflict { .. } => StatusCode::CONFLICT,
            WebError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            WebError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            WebError::BadRequest { .. } => "BAD_REQUEST",
            WebError::Unauthorized => "UNAUTHORIZED",
            WebError::Forbidden { .. } => "FORBIDDEN",
            WebError::NotFound { .. } => "NOT_FOUND",
            WebError::Conflict { .. } => "CONFLICT",
            WebError::ServiceUnavailable { .. } => "SERVICE_UNAVAILABLE",
            WebError::Internal { .. } => "INTERNAL_ERROR",
            WebError::Validation { .. } => "VALIDATION_ERROR",
        }
    }

    // Common error constructors

    pub fn bad_request(message: impl Into<String>) -> Self {
        WebError::BadRequest {
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        WebError::Forbidden {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        WebError::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        WebError::Conflict {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        WebError::Internal {
            message: message.into(),
        }
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        WebError::ServiceUnavailable {
            message: message.into(),
        }
    }

    pub fn validation(fields: FieldErrors) -> Self {
        WebError::Validation { fields }
    }

    /// Single-field validation error in one call
    pub fn validation_single(field: impl Into<String>, message: impl Into<String>) -> Self {
        WebError::Validation {
            fields: FieldErrors::single(field, message),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Internal messages may carry backend details; sanitize before
        // they reach a client. The full error was already logged upstream.
        let safe_message = match &self {
            WebError::Internal { .. } => {
                let sanitizer = ErrorSanitizer::default();
                sanitizer.sanitize_error(&self).message
            }
            WebError::Validation { .. } => "La saisie contient des erreurs".to_string(),
            other => other.to_string(),
        };

        let error_response = match &self {
            WebError::Validation { fields } => {
                json!({
                    "error": {
                        "code": self.error_code(),
                        "message": safe_message,
                        "fields": fields
                    }
                })
            }
            _ => {
                json!({
                    "error": {
                        "code": self.error_code(),
                        "message": safe_message
                    }
                })
            }
        };

        (status, Json(error_response)).into_response()
    }
}

impl From<WebError> for ApiError {
    fn from(error: WebError) -> Self {
        match error {
            WebError::Validation { fields } => ApiError::validation(fields),
            other => ApiError::new(other.error_code(), other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(WebError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            WebError::validation_single("nom", "requis").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            WebError::conflict("déjà présent").status_code(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_unauthorized_message_is_french() {
        assert_eq!(WebError::Unauthorized.to_string(), "Non authentifié");
    }
}
