//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate, with environment variables prefixed `STAYLINK__` layered
//! on top. The loaded [`AppConfig`] is constructed once at startup and passed
//! into every component that needs it; there is no ambient global.

pub mod auth;
pub mod email;
pub mod gdpr;
pub mod logging;
pub mod server;

use serde::{Deserialize, Serialize};

pub use self::auth::AuthConfig;
pub use self::email::EmailConfig;
pub use self::gdpr::GdprConfig;
pub use self::logging::LoggingConfig;
pub use self::server::ServerConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database connection settings for both logical stores.
    pub database: DatabaseConfig,
    /// Authentication and token settings.
    pub auth: AuthConfig,
    /// GDPR lifecycle settings.
    #[serde(default)]
    pub gdpr: GdprConfig,
    /// Outbound email settings.
    #[serde(default)]
    pub email: EmailConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Connection settings for the two logical relational stores.
///
/// The business store holds profiles, listings, collaborations, and chat;
/// the auth store holds users, single-use tokens, consent history, and GDPR
/// requests. A single logical operation (registration) can span both, which
/// is why it cannot rely on one database transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL for the business store.
    pub business_url: String,
    /// PostgreSQL connection URL for the auth store.
    pub auth_url: String,
    /// Maximum number of connections per pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections per pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Connection acquire timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    /// Statement timeout in seconds; a hung query aborts rather than
    /// hanging the request indefinitely.
    #[serde(default = "default_command_timeout")]
    pub command_timeout_seconds: u64,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `STAYLINK`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("STAYLINK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    2
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_command_timeout() -> u64 {
    60
}
