//! Email dispatch implementations
//!
//! Delivery goes through the provider's HTTP API; when no provider is
//! configured, outbound mail is logged instead so invite flows keep
//! working in development.

use async_trait::async_trait;
use cursus_config::domains::mail::MailConfig;
use cursus_interfaces::{EmailError, EmailMessage, EmailService};
use serde_json::json;
use tracing::info;

/// Provider-backed mailer
pub struct HttpMailer {
    client: reqwest::Client,
    config: MailConfig,
}

impl HttpMailer {
    pub fn new(config: MailConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl EmailService for HttpMailer {
    async fn send(&self, message: EmailMessage) -> Result<(), EmailError> {
        let payload = json!({
            "from": self.config.from_address,
            "to": message.to,
            "subject": message.subject,
            "html": message.body_html,
        });

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| EmailError::Provider {
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(EmailError::Provider {
                message: format!("provider returned {}", response.status()),
            });
        }

        Ok(())
    }
}

/// Logging-only mailer used when no provider is configured
pub struct LogMailer;

#[async_trait]
impl EmailService for LogMailer {
    async fn send(&self, message: EmailMessage) -> Result<(), EmailError> {
        info!(to = %message.to, subject = %message.subject, "mail provider not configured, logging email instead");
        Ok(())
    }
}
