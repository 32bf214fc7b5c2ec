//! Account service — registration saga, login, and single-use token flows.

use std::sync::Arc;

use tracing::{error, info, warn};
use uuid::Uuid;

use staylink_auth::jwt::{IssuedToken, TokenError, TokenIssuer};
use staylink_auth::password::PasswordHasher;
use staylink_core::config::AuthConfig;
use staylink_core::error::AppError;
use staylink_core::result::AppResult;
use staylink_database::repositories::consent::ConsentRepository;
use staylink_database::repositories::profile::ProfileRepository;
use staylink_database::repositories::token::TokenLedger;
use staylink_database::repositories::user::UserRepository;
use staylink_entity::consent::{ConsentType, NewConsentRecord};
use staylink_entity::user::model::CreateUser;
use staylink_entity::user::{User, UserRole};

use crate::ClientMeta;
use crate::consent::record_consent_best_effort;
use crate::email::EmailNotifier;
use crate::secrets::{generate_numeric_code, generate_url_token};

/// Input for user registration.
#[derive(Debug, Clone)]
pub struct RegisterInput {
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Display name; defaults to the email prefix when absent.
    pub name: Option<String>,
    /// Requested marketplace role (creator or hotel).
    pub role: UserRole,
    /// Terms of Service acceptance. Must be true.
    pub terms_accepted: bool,
    /// Privacy Policy acceptance. Must be true.
    pub privacy_accepted: bool,
    /// Optional marketing consent.
    pub marketing_consent: bool,
    /// Version of the accepted Terms.
    pub terms_version: Option<String>,
    /// Version of the accepted Privacy Policy.
    pub privacy_version: Option<String>,
}

/// A user plus their freshly issued session token.
#[derive(Debug, Clone)]
pub struct AuthOutcome {
    /// The authenticated user.
    pub user: User,
    /// The issued session token.
    pub token: IssuedToken,
}

/// Best-effort token introspection result.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TokenValidation {
    /// Whether the token is valid right now.
    pub valid: bool,
    /// Whether the token is well-formed but expired.
    pub expired: bool,
    /// Subject, when valid.
    pub user_id: Option<Uuid>,
    /// Email claim, when valid.
    pub email: Option<String>,
    /// Role claim, when valid.
    #[serde(rename = "type")]
    pub role: Option<UserRole>,
}

/// Account lifecycle service.
#[derive(Debug, Clone)]
pub struct AccountService {
    users: Arc<UserRepository>,
    profiles: Arc<ProfileRepository>,
    tokens: Arc<TokenLedger>,
    consent: Arc<ConsentRepository>,
    hasher: Arc<PasswordHasher>,
    issuer: Arc<TokenIssuer>,
    notifier: Arc<EmailNotifier>,
    auth_config: AuthConfig,
    frontend_url: String,
}

impl AccountService {
    /// Creates a new account service.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        users: Arc<UserRepository>,
        profiles: Arc<ProfileRepository>,
        tokens: Arc<TokenLedger>,
        consent: Arc<ConsentRepository>,
        hasher: Arc<PasswordHasher>,
        issuer: Arc<TokenIssuer>,
        notifier: Arc<EmailNotifier>,
        auth_config: AuthConfig,
        frontend_url: String,
    ) -> Self {
        Self {
            users,
            profiles,
            tokens,
            consent,
            hasher,
            issuer,
            notifier,
            auth_config,
            frontend_url,
        }
    }

    /// Register a new creator or hotel account.
    ///
    /// The user row lands in the auth store, then the role profile is
    /// created in the business store. The two stores share no transaction,
    /// so a profile failure triggers a compensating delete of the user row
    /// rather than leaving an orphaned account behind.
    pub async fn register(&self, input: RegisterInput, meta: &ClientMeta) -> AppResult<AuthOutcome> {
        if !input.terms_accepted || !input.privacy_accepted {
            return Err(AppError::validation(
                "You must accept the Terms of Service and Privacy Policy to register",
            ));
        }
        if input.role == UserRole::Admin {
            return Err(AppError::validation(
                "Admin accounts cannot be self-registered",
            ));
        }
        if input.password.len() < self.auth_config.password_min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.auth_config.password_min_length
            )));
        }

        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::conflict("Email already registered"));
        }

        let name = match input.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => default_name_from_email(&input.email),
        };

        let password_hash = self.hasher.hash_password(&input.password)?;

        let user = self
            .users
            .create(&CreateUser {
                email: input.email.clone(),
                password_hash,
                name: name.clone(),
                role: input.role,
                terms_version: input.terms_version.clone(),
                privacy_version: input.privacy_version.clone(),
                marketing_consent: input.marketing_consent,
            })
            .await?;

        // Post-creation work in the business store. On failure, delete the
        // user row so the account cannot exist without its profile.
        let profile_result = match input.role {
            UserRole::Creator => self
                .profiles
                .create_creator(user.id, &name)
                .await
                .map(|_| ()),
            UserRole::Hotel => self.profiles.create_hotel(user.id, &name).await.map(|_| ()),
            UserRole::Admin => unreachable!("rejected above"),
        };

        if let Err(e) = profile_result {
            error!(
                user_id = %user.id,
                error = %e,
                "Profile creation failed after user insert; deleting user row"
            );
            if let Err(delete_err) = self.users.delete(user.id).await {
                error!(
                    user_id = %user.id,
                    error = %delete_err,
                    "Compensating delete failed; orphaned user row remains"
                );
            }
            return Err(AppError::internal("Registration failed"));
        }

        // Consent audit rows are best-effort; losing one is logged, not fatal.
        for (consent_type, given, version) in [
            (ConsentType::Terms, true, input.terms_version.clone()),
            (ConsentType::Privacy, true, input.privacy_version.clone()),
            (ConsentType::Marketing, input.marketing_consent, None),
        ] {
            record_consent_best_effort(
                &self.consent,
                NewConsentRecord {
                    user_id: Some(user.id),
                    consent_type,
                    consent_given: given,
                    version,
                    ip_address: meta.ip_address.clone(),
                    user_agent: meta.user_agent.clone(),
                },
            )
            .await;
        }

        self.send_verification_link(&user).await;

        let token = self.issuer.issue(&user)?;

        info!(user_id = %user.id, role = %user.role, "User registered");
        Ok(AuthOutcome { user, token })
    }

    /// Verify credentials and issue a session token.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthOutcome> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::authentication("Invalid email or password"))?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            return Err(AppError::authentication("Invalid email or password"));
        }

        if user.is_suspended() {
            return Err(AppError::authorization(
                "Your account has been suspended. Contact support.",
            ));
        }

        let token = self.issuer.issue(&user)?;

        info!(user_id = %user.id, "Login successful");
        Ok(AuthOutcome { user, token })
    }

    /// Best-effort token introspection. Never fails; the outcome is carried
    /// in the body booleans.
    pub fn validate_token(&self, token: &str) -> TokenValidation {
        match self.issuer.verify(token) {
            Ok(claims) => TokenValidation {
                valid: true,
                expired: false,
                user_id: claims.sub,
                email: Some(claims.email),
                role: Some(claims.role),
            },
            Err(TokenError::Expired) => TokenValidation {
                valid: false,
                expired: true,
                user_id: None,
                email: None,
                role: None,
            },
            Err(TokenError::Malformed) => TokenValidation {
                valid: false,
                expired: false,
                user_id: None,
                email: None,
                role: None,
            },
        }
    }

    /// Start a password reset.
    ///
    /// Returns the reset token only when debug exposure is enabled. Whether
    /// the email exists is never revealed to the caller; an unknown address
    /// is logged and reported as success upstream.
    pub async fn forgot_password(&self, email: &str) -> AppResult<Option<String>> {
        let Some(user) = self.users.find_by_email(email).await? else {
            info!(email = %email, "Password reset requested for unknown email");
            return Ok(None);
        };

        if user.is_suspended() {
            warn!(user_id = %user.id, "Password reset requested for suspended account");
            return Ok(None);
        }

        let token = generate_url_token();
        self.tokens
            .issue_password_reset(
                user.id,
                &token,
                self.auth_config.reset_token_ttl_hours as i64,
            )
            .await?;

        let link = format!("{}/reset-password?token={}", self.frontend_url, token);
        let html = format!(
            "<p>Hello {},</p><p>Click <a href=\"{link}\">here</a> to reset your password. \
             The link is valid for {} hour(s).</p>",
            user.name, self.auth_config.reset_token_ttl_hours
        );
        self.notifier
            .send(&user.email, "Reset your StayLink password", &html)
            .await;

        info!(user_id = %user.id, "Password reset token issued");
        Ok(self.notifier.debug_expose_secrets().then_some(token))
    }

    /// Complete a password reset with a single-use token.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> AppResult<()> {
        if new_password.len() < self.auth_config.password_min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.auth_config.password_min_length
            )));
        }

        let record = self
            .tokens
            .find_valid_password_reset(token)
            .await?
            .ok_or_else(|| AppError::validation("Invalid or expired reset token"))?;

        // Consume before writing the new hash; a concurrent second use of
        // the same token loses the conditional update and fails here.
        if !self.tokens.consume_password_reset(token).await? {
            return Err(AppError::validation("Invalid or expired reset token"));
        }

        let password_hash = self.hasher.hash_password(new_password)?;
        self.users
            .update_password(record.user_id, &password_hash)
            .await?;

        info!(user_id = %record.user_id, "Password reset completed");
        Ok(())
    }

    /// Verify an email address with a link token.
    ///
    /// Always resolves; the outcome is carried in the returned flag so the
    /// endpoint can answer 200 regardless (anti-enumeration).
    pub async fn verify_email_token(&self, token: &str) -> AppResult<(bool, Option<String>)> {
        let Some(record) = self.tokens.find_valid_email_verification(token).await? else {
            return Ok((false, None));
        };

        if !self.tokens.consume_email_verification(token).await? {
            return Ok((false, None));
        }

        self.users.set_email_verified(record.user_id).await?;
        info!(user_id = %record.user_id, "Email verified via link token");
        Ok((true, Some(record.email)))
    }

    /// Issue and send a 6-digit verification code for an email.
    ///
    /// Works before registration as well; codes are keyed by the bare email.
    /// Returns the code only when debug exposure is enabled.
    pub async fn send_verification_code(&self, email: &str) -> AppResult<Option<String>> {
        let code = generate_numeric_code();
        self.tokens
            .issue_verification_code(
                email,
                &code,
                self.auth_config.verification_code_ttl_minutes as i64,
            )
            .await?;

        let html = format!(
            "<p>Your StayLink verification code is <strong>{code}</strong>. \
             It expires in {} minutes.</p>",
            self.auth_config.verification_code_ttl_minutes
        );
        self.notifier
            .send(email, "Your StayLink verification code", &html)
            .await;

        info!(email = %email, "Verification code issued");
        Ok(self.notifier.debug_expose_secrets().then_some(code))
    }

    /// Verify an email address with a 6-digit code.
    pub async fn verify_email_code(&self, email: &str, code: &str) -> AppResult<bool> {
        let Some(record) = self.tokens.find_valid_verification_code(email, code).await? else {
            return Ok(false);
        };

        if !self.tokens.consume_verification_code(record.id).await? {
            return Ok(false);
        }

        // The code may predate the account; flag the user when one exists.
        if let Some(user) = self.users.find_by_email(email).await? {
            self.users.set_email_verified(user.id).await?;
        }

        info!(email = %email, "Email verified via code");
        Ok(true)
    }

    /// Issue a fresh verification link token and email it. Failure to send
    /// never fails the caller.
    async fn send_verification_link(&self, user: &User) {
        let token = generate_url_token();
        if let Err(e) = self
            .tokens
            .issue_email_verification(
                user.id,
                &token,
                self.auth_config.verification_token_ttl_hours as i64,
            )
            .await
        {
            error!(user_id = %user.id, error = %e, "Failed to issue verification token");
            return;
        }

        let link = format!("{}/verify-email?token={}", self.frontend_url, token);
        let html = format!(
            "<p>Welcome to StayLink, {}!</p>\
             <p>Please <a href=\"{link}\">verify your email address</a>.</p>",
            user.name
        );
        self.notifier
            .send(&user.email, "Verify your StayLink email", &html)
            .await;
    }
}

/// Default display name: the email prefix, capitalized.
fn default_name_from_email(email: &str) -> String {
    let prefix = email.split('@').next().unwrap_or(email);
    let mut chars = prefix.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => prefix.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_name_from_email() {
        assert_eq!(default_name_from_email("alice@example.com"), "Alice");
        assert_eq!(default_name_from_email("bob.smith@x.io"), "Bob.smith");
    }
}
