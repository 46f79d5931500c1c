//! Application context for dependency injection
//!
//! One context struct carries every dependency the handlers need; tests
//! swap in in-memory repositories and stub providers without touching the
//! router.

use axum::extract::FromRef;
use cursus_config::domains::uploads::UploadsConfig;
use cursus_interfaces::{AuthProvider, EmailService, RepositoryFactory};
use cursus_web::SessionVerifier;
use std::sync::Arc;

/// Context shared by all REST handlers
#[derive(Clone)]
pub struct AppContext {
    /// Repository factory for database operations
    pub repositories: Arc<dyn RepositoryFactory>,
    /// Invitation email dispatch (best effort)
    pub mailer: Arc<dyn EmailService>,
    /// External auth provider for token_hash verification
    pub auth_provider: Arc<dyn AuthProvider>,
    /// Session token verification
    pub verifier: SessionVerifier,
    /// Upload policy (size ceiling, MIME allow-list, target directory)
    pub uploads: UploadsConfig,
    /// Whether a mail provider is configured (drives the health check)
    pub mail_configured: bool,
    /// Public base URL for links inside emails
    pub app_base_url: String,
}

impl FromRef<AppContext> for SessionVerifier {
    fn from_ref(ctx: &AppContext) -> Self {
        ctx.verifier.clone()
    }
}
