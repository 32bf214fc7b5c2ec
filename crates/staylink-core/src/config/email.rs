//! Outbound email configuration.

use serde::{Deserialize, Serialize};

/// Settings for the HTTP email delivery provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Whether outbound email is enabled at all.
    #[serde(default)]
    pub enabled: bool,
    /// Base URL of the email delivery API.
    #[serde(default)]
    pub api_url: String,
    /// API key for the delivery provider.
    #[serde(default)]
    pub api_key: String,
    /// From address for all outbound mail.
    #[serde(default = "default_from_address")]
    pub from_address: String,
    /// In debug deployments, secret tokens and codes are returned in the
    /// response body instead of (or in addition to) being emailed. Never
    /// enable in production.
    #[serde(default)]
    pub debug_expose_secrets: bool,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_url: String::new(),
            api_key: String::new(),
            from_address: default_from_address(),
            debug_expose_secrets: false,
        }
    }
}

fn default_from_address() -> String {
    "no-reply@staylink.example".to_string()
}
