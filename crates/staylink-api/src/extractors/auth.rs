//! Bearer-token extractors built on the access resolver.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use staylink_core::error::AppError;
use staylink_entity::user::User;

use crate::state::AppState;

/// Pull the raw bearer token out of the Authorization header.
pub fn bearer_token(parts: &Parts) -> Result<String, AppError> {
    let header = parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::authentication("Missing Authorization header"))?;

    header
        .strip_prefix("Bearer ")
        .map(str::to_string)
        .ok_or_else(|| AppError::authentication("Invalid Authorization header format"))
}

/// The raw bearer token, for handlers that pick a resolver variant at
/// runtime (e.g. collaboration endpoints where either side may act).
#[derive(Debug, Clone)]
pub struct Bearer(pub String);

impl FromRequestParts<AppState> for Bearer {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        bearer_token(parts).map(Bearer)
    }
}

/// A resolved user that may still be pending verification.
///
/// Consent and GDPR endpoints must work before the account is verified.
#[derive(Debug, Clone)]
pub struct AuthUserAllowPending(pub User);

impl FromRequestParts<AppState> for AuthUserAllowPending {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let user = state.resolver.resolve_allow_pending(&token).await?;
        Ok(AuthUserAllowPending(user))
    }
}

/// Best-effort identification for endpoints serving both anonymous and
/// authenticated callers (cookie consent). Never rejects.
#[derive(Debug, Clone)]
pub struct OptionalUserId(pub Option<Uuid>);

impl FromRequestParts<AppState> for OptionalUserId {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = bearer_token(parts)
            .ok()
            .and_then(|token| state.issuer.verify(&token).ok())
            .and_then(|claims| claims.sub);
        Ok(OptionalUserId(user_id))
    }
}
