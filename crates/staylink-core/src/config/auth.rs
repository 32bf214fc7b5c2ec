//! Authentication and token configuration.

use serde::{Deserialize, Serialize};

/// Authentication, session-token, and single-use-token configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Session token TTL in minutes.
    #[serde(default = "default_token_ttl")]
    pub jwt_ttl_minutes: u64,
    /// Password reset token TTL in hours.
    #[serde(default = "default_reset_ttl")]
    pub reset_token_ttl_hours: u64,
    /// Email verification link token TTL in hours.
    #[serde(default = "default_verification_token_ttl")]
    pub verification_token_ttl_hours: u64,
    /// Email verification code TTL in minutes.
    #[serde(default = "default_verification_code_ttl")]
    pub verification_code_ttl_minutes: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            jwt_ttl_minutes: default_token_ttl(),
            reset_token_ttl_hours: default_reset_ttl(),
            verification_token_ttl_hours: default_verification_token_ttl(),
            verification_code_ttl_minutes: default_verification_code_ttl(),
            password_min_length: default_password_min(),
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_token_ttl() -> u64 {
    60 * 24
}

fn default_reset_ttl() -> u64 {
    1
}

fn default_verification_token_ttl() -> u64 {
    48
}

fn default_verification_code_ttl() -> u64 {
    15
}

fn default_password_min() -> usize {
    8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.jwt_ttl_minutes, 1440);
        assert_eq!(config.reset_token_ttl_hours, 1);
        assert_eq!(config.verification_code_ttl_minutes, 15);
        assert_eq!(config.password_min_length, 8);
    }
}
