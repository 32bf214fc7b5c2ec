//! Session token creation and verification.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;

use staylink_core::config::AuthConfig;
use staylink_core::error::AppError;
use staylink_entity::user::User;

use super::claims::Claims;

/// Why a presented token failed verification.
///
/// The two kinds produce different user-facing instructions, so they are
/// kept distinct all the way to the HTTP boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Well-formed but past its expiry.
    #[error("token has expired")]
    Expired,
    /// Undecodable, bad signature, or otherwise not a valid token.
    #[error("token is malformed or has an invalid signature")]
    Malformed,
}

/// A freshly issued session token.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct IssuedToken {
    /// The encoded JWT.
    pub token: String,
    /// When it expires.
    pub expires_at: DateTime<Utc>,
    /// Remaining validity in seconds, for `expires_in` response fields.
    pub expires_in_seconds: i64,
}

/// Creates and verifies signed session tokens.
///
/// Tokens are stateless: there is no session table and no revocation list.
/// A leaked but unexpired token stays valid until natural expiry.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_minutes: i64,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("ttl_minutes", &self.ttl_minutes)
            .finish()
    }
}

impl TokenIssuer {
    /// Creates a new issuer from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        // No leeway: an expired token must report as expired immediately.
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            ttl_minutes: config.jwt_ttl_minutes as i64,
        }
    }

    /// Issues a session token for the given user with the default TTL.
    pub fn issue(&self, user: &User) -> Result<IssuedToken, AppError> {
        self.issue_with_ttl(user, chrono::Duration::minutes(self.ttl_minutes))
    }

    /// Issues a session token with an explicit TTL.
    pub fn issue_with_ttl(
        &self,
        user: &User,
        ttl: chrono::Duration,
    ) -> Result<IssuedToken, AppError> {
        let now = Utc::now();
        let expires_at = now + ttl;

        let claims = Claims {
            sub: Some(user.id),
            email: user.email.clone(),
            role: user.role,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode session token: {e}")))?;

        Ok(IssuedToken {
            token,
            expires_at,
            expires_in_seconds: (expires_at - now).num_seconds(),
        })
    }

    /// Verifies signature and expiry, returning the claims on success.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            })
    }

    /// Inspects the expiry claim WITHOUT verifying the signature.
    ///
    /// Returns `None` when the token cannot be decoded at all — the caller
    /// must not treat that as "not expired"; an undecodable token is garbage,
    /// not a fresh one, and the two produce different user-facing messages.
    pub fn is_expired(&self, token: &str) -> Option<bool> {
        let exp = peek_claim_exp(token)?;
        Some(Utc::now().timestamp() >= exp)
    }
}

/// Decode the payload segment of a JWT and read its `exp` claim, skipping
/// signature verification entirely.
fn peek_claim_exp(token: &str) -> Option<i64> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.as_bytes()).ok()?;
    let value: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    value.get("exp")?.as_i64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use staylink_entity::user::{UserRole, UserStatus};
    use uuid::Uuid;

    fn test_user() -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            email: "alice@example.com".to_string(),
            password_hash: String::new(),
            name: "Alice".to_string(),
            role: UserRole::Creator,
            status: UserStatus::Pending,
            email_verified: false,
            terms_accepted_at: Some(now),
            terms_version: Some("1.0".to_string()),
            privacy_accepted_at: Some(now),
            privacy_version: Some("1.0".to_string()),
            marketing_consent: false,
            marketing_consent_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(&AuthConfig {
            jwt_secret: "unit-test-secret".to_string(),
            ..AuthConfig::default()
        })
    }

    #[test]
    fn test_round_trip() {
        let issuer = issuer();
        let user = test_user();
        let issued = issuer.issue(&user).unwrap();

        let claims = issuer.verify(&issued.token).unwrap();
        assert_eq!(claims.sub, Some(user.id));
        assert_eq!(claims.email, user.email);
        assert_eq!(claims.role, UserRole::Creator);
    }

    #[test]
    fn test_expired_token_is_expired_not_malformed() {
        let issuer = issuer();
        let user = test_user();
        let issued = issuer
            .issue_with_ttl(&user, chrono::Duration::seconds(-60))
            .unwrap();

        assert_eq!(issuer.verify(&issued.token), Err(TokenError::Expired));
        assert_eq!(issuer.is_expired(&issued.token), Some(true));
    }

    #[test]
    fn test_garbage_token_is_unknown_expiry() {
        let issuer = issuer();
        assert_eq!(issuer.is_expired("not-a-token"), None);
        assert_eq!(issuer.verify("not-a-token"), Err(TokenError::Malformed));
    }

    #[test]
    fn test_tampered_signature_is_malformed() {
        let issuer = issuer();
        let user = test_user();
        let mut token = issuer.issue(&user).unwrap().token;
        token.push('x');
        assert_eq!(issuer.verify(&token), Err(TokenError::Malformed));
        // Expiry can still be peeked without the signature.
        assert_eq!(issuer.is_expired(&token), Some(false));
    }
}
