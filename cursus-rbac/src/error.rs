//! RBAC error types

use thiserror::Error;

/// Errors raised while resolving a tenant or checking a capability
#[derive(Debug, Error)]
pub enum RbacError {
    /// No valid session or no resolvable organization membership
    #[error("Non authentifié")]
    Unauthenticated,

    /// Valid session, insufficient role for the requested action
    #[error("Permission refusée pour {action}")]
    PermissionDenied { action: String },

    /// Membership lookup failed at the storage layer
    #[error("Membership lookup failed: {message}")]
    Lookup { message: String },
}

impl RbacError {
    pub fn permission_denied(action: impl Into<String>) -> Self {
        RbacError::PermissionDenied {
            action: action.into(),
        }
    }
}

/// Result type for RBAC operations
pub type RbacResult<T> = Result<T, RbacError>;
