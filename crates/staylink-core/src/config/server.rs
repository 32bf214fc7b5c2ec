//! HTTP server configuration.

use serde::{Deserialize, Serialize};

/// HTTP server and frontend-facing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allowed CORS origins. `*` allows any origin.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
    /// Base URL of the frontend, used to build reset and verification links.
    #[serde(default = "default_frontend_url")]
    pub frontend_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
            frontend_url: default_frontend_url(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_frontend_url() -> String {
    "http://localhost:3000".to_string()
}
