//! HTTP email delivery.
//!
//! Email is always best-effort relative to the triggering request: a
//! registration or password-reset succeeds even when the notification
//! cannot be delivered. Failures are logged, never propagated.

use serde::Serialize;
use tracing::{error, info, warn};

use staylink_core::config::EmailConfig;

/// Sends transactional email through an HTTP delivery provider.
#[derive(Debug, Clone)]
pub struct EmailNotifier {
    client: reqwest::Client,
    config: EmailConfig,
}

#[derive(Debug, Serialize)]
struct OutboundEmail<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

impl EmailNotifier {
    /// Creates a new notifier from email configuration.
    pub fn new(config: EmailConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Whether debug deployments may return secrets in response bodies
    /// instead of emailing them.
    pub fn debug_expose_secrets(&self) -> bool {
        self.config.debug_expose_secrets
    }

    /// Send an email. Returns whether delivery was handed off successfully.
    pub async fn send(&self, to: &str, subject: &str, html: &str) -> bool {
        if !self.config.enabled {
            warn!(to = %to, subject = %subject, "Email sending disabled; skipping delivery");
            return false;
        }

        let body = OutboundEmail {
            from: &self.config.from_address,
            to,
            subject,
            html,
        };

        let result = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await;

        match result {
            Ok(resp) if resp.status().is_success() => {
                info!(to = %to, subject = %subject, "Email dispatched");
                true
            }
            Ok(resp) => {
                error!(
                    to = %to,
                    status = %resp.status(),
                    "Email provider rejected message"
                );
                false
            }
            Err(e) => {
                error!(to = %to, error = %e, "Failed to reach email provider");
                false
            }
        }
    }
}
