//! Session-token authentication extractor
//!
//! Token issuance belongs to the external auth provider; this side only
//! verifies the HMAC signature and expiry of what arrives in the
//! `Authorization: Bearer` header. A missing or invalid token is the
//! terminal "Non authentifié" failure - there is no retry.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::{header::AUTHORIZATION, request::Parts};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::errors::WebError;

/// Claims carried by a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User id
    pub sub: String,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

/// Verifies (and, for tests and tooling, issues) session tokens
#[derive(Clone)]
pub struct SessionVerifier {
    decoding_key: DecodingKey,
    encoding_key: EncodingKey,
    validation: Validation,
}

impl SessionVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            validation: Validation::default(),
        }
    }

    /// Verify a bearer token and return its claims
    pub fn verify(&self, token: &str) -> Result<SessionClaims, WebError> {
        decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| WebError::Unauthorized)
    }

    /// Issue a token for a user id, valid for `ttl_secs`
    pub fn issue(&self, user_id: i32, ttl_secs: i64) -> Result<String, WebError> {
        let claims = SessionClaims {
            sub: user_id.to_string(),
            exp: chrono::Utc::now().timestamp() + ttl_secs,
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| WebError::internal(format!("token encoding failed: {}", e)))
    }
}

/// The authenticated caller, as far as the transport can tell.
/// Organization membership is resolved separately against storage.
#[derive(Debug, Clone, Copy)]
pub struct AuthContext {
    pub user_id: i32,
}

impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
    SessionVerifier: FromRef<S>,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let verifier = SessionVerifier::from_ref(state);

        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(WebError::Unauthorized)?;

        let claims = verifier.verify(token)?;
        let user_id = claims.sub.parse::<i32>().map_err(|_| WebError::Unauthorized)?;

        Ok(AuthContext { user_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let verifier = SessionVerifier::new("a-test-secret-that-is-long-enough!!");
        let token = verifier.issue(42, 3600).unwrap();
        let claims = verifier.verify(&token).unwrap();
        assert_eq!(claims.sub, "42");
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let verifier = SessionVerifier::new("a-test-secret-that-is-long-enough!!");
        let token = verifier.issue(42, -3600).unwrap();
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let issuer = SessionVerifier::new("a-test-secret-that-is-long-enough!!");
        let other = SessionVerifier::new("another-secret-that-is-long-enough!");
        let token = issuer.issue(42, 3600).unwrap();
        assert!(other.verify(&token).is_err());
    }
}
