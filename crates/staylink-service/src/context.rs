//! Request-scoped client metadata threaded into audit writes.

use serde::{Deserialize, Serialize};

/// Where a request came from, for consent and GDPR audit entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientMeta {
    /// Client IP address, from `X-Forwarded-For` or the socket.
    pub ip_address: Option<String>,
    /// Client User-Agent header.
    pub user_agent: Option<String>,
}

impl ClientMeta {
    /// Creates metadata from already-extracted header values.
    pub fn new(ip_address: Option<String>, user_agent: Option<String>) -> Self {
        Self {
            ip_address,
            user_agent,
        }
    }
}
