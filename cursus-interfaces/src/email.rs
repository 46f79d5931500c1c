//! Email delivery contract
//!
//! Delivery itself is an external provider concern; this trait is the
//! narrow seam the handlers call through. Invitation dispatch is a
//! best-effort side effect - callers log failures and move on.

use async_trait::async_trait;

/// An outbound email
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body_html: String,
}

/// Email delivery errors
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("Email provider error: {message}")]
    Provider { message: String },

    #[error("Email service not configured: {message}")]
    Configuration { message: String },
}

/// Email delivery service
#[async_trait]
pub trait EmailService: Send + Sync {
    async fn send(&self, message: EmailMessage) -> Result<(), EmailError>;
}
