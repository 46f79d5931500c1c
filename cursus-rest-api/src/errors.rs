//! REST API error type and HTTP mapping
//!
//! Storage errors are mapped here, at the action boundary: validation and
//! permission failures were already caught before any storage call, raw
//! backend messages are logged server-side and sanitized before they
//! reach a client, and constraint violations carry their friendly text.

use axum::response::{IntoResponse, Response};
use cursus_api_types::FieldErrors;
use cursus_core::ErrorSanitizer;
use cursus_interfaces::DatabaseError;
use cursus_rbac::RbacError;
use cursus_web::WebError;
use thiserror::Error;
use tracing::error;

/// REST API specific error type
#[derive(Error, Debug)]
pub enum RestError {
    #[error("{0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Validation failed")]
    Validation(FieldErrors),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Rbac(#[from] RbacError),

    #[error(transparent)]
    Web(#[from] WebError),
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

impl RestError {
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        RestError::NotFound(format!("{} '{}' introuvable", entity, id))
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        RestError::BadRequest(message.into())
    }

    pub fn validation(fields: FieldErrors) -> Self {
        RestError::Validation(fields)
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let web_error = match self {
            RestError::NotFound(message) => WebError::not_found(message),
            RestError::BadRequest(message) => WebError::bad_request(message),
            RestError::Conflict(message) => WebError::conflict(message),
            RestError::Validation(fields) => WebError::validation(fields),
            RestError::ServiceUnavailable(message) => WebError::service_unavailable(message),
            RestError::InternalError(message) => {
                error!(%message, "internal error");
                WebError::internal(message)
            }
            RestError::Web(web_error) => web_error,

            RestError::Rbac(rbac_error) => match rbac_error {
                RbacError::Unauthenticated => WebError::Unauthorized,
                RbacError::PermissionDenied { .. } => WebError::forbidden(rbac_error.to_string()),
                RbacError::Lookup { message } => {
                    error!(%message, "membership lookup failed");
                    WebError::internal(message)
                }
            },

            RestError::Database(db_error) => match db_error {
                DatabaseError::NotFound { .. } => WebError::not_found(db_error.to_string()),
                DatabaseError::Validation { message } => WebError::Validation {
                    fields: FieldErrors::form(message),
                },
                DatabaseError::Constraint { message } => WebError::conflict(message),
                DatabaseError::Connection { message } => {
                    error!(%message, "database unavailable");
                    WebError::service_unavailable("Base de données indisponible")
                }
                DatabaseError::Internal { message } => {
                    error!(%message, "database error");
                    let sanitized = ErrorSanitizer::default().sanitize_message(&message);
                    WebError::internal(sanitized.message)
                }
            },
        };

        web_error.into_response()
    }
}
