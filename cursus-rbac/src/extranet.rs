//! Extranet routing table and redirect error codes
//!
//! The invite/auth callback resolves to exactly one of: the password-setup
//! route (first login), the role-specific landing route, or the login page
//! with a machine-readable error code in the query string.

use cursus_api_types::ExtranetRole;

/// Route where a first-time user sets their password
pub const PASSWORD_SETUP_ROUTE: &str = "/extranet/definir-mot-de-passe";

/// Login page that receives redirect error codes
pub const LOGIN_ROUTE: &str = "/connexion";

/// Role-specific landing route after a successful login
pub fn landing_route(role: ExtranetRole) -> &'static str {
    match role {
        ExtranetRole::Formateur => "/formateur",
        ExtranetRole::Apprenant => "/apprenant",
        ExtranetRole::ContactClient => "/entreprise",
    }
}

/// Machine-readable error codes surfaced on the login redirect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRedirectError {
    /// Neither a provider pair nor a custom token was supplied
    MissingParams,
    /// Unknown, expired, or already-consumed token
    InvalidOrExpiredLink,
    /// The access exists but has been revoked
    NoAccess,
}

impl AuthRedirectError {
    pub fn as_code(&self) -> &'static str {
        match self {
            AuthRedirectError::MissingParams => "missing_params",
            AuthRedirectError::InvalidOrExpiredLink => "invalid_or_expired_link",
            AuthRedirectError::NoAccess => "no_access",
        }
    }

    /// Full redirect target for this error
    pub fn redirect_target(&self) -> String {
        format!("{}?error={}", LOGIN_ROUTE, self.as_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_role_has_a_landing_route() {
        for role in ExtranetRole::ALL {
            assert!(landing_route(role).starts_with('/'));
        }
    }

    #[test]
    fn test_error_redirect_targets() {
        assert_eq!(
            AuthRedirectError::InvalidOrExpiredLink.redirect_target(),
            "/connexion?error=invalid_or_expired_link"
        );
        assert_eq!(
            AuthRedirectError::MissingParams.redirect_target(),
            "/connexion?error=missing_params"
        );
    }
}
