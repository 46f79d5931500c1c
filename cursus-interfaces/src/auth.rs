//! External auth provider contract
//!
//! Verification of provider-issued `token_hash`/`type` pairs is fully
//! delegated; this seam only reports whether the pair resolves to an
//! identity. Session issuance and password storage never touch this
//! codebase.

use async_trait::async_trait;

/// Verifies provider-issued one-time credentials
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Resolve a `token_hash`/`type` pair to the verified email, or `None`
    /// when the provider rejects it.
    async fn verify_token_hash(&self, token_hash: &str, otp_type: &str) -> Option<String>;
}

/// Provider stub used when no external provider is configured: every pair
/// is rejected, so provider-path callbacks redirect to the error route.
pub struct UnconfiguredAuthProvider;

#[async_trait]
impl AuthProvider for UnconfiguredAuthProvider {
    async fn verify_token_hash(&self, _token_hash: &str, _otp_type: &str) -> Option<String> {
        None
    }
}
