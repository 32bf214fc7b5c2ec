//! Client metadata extraction for audit trails.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use staylink_service::ClientMeta;

/// Extracts the client IP (first `X-Forwarded-For` hop) and User-Agent.
/// Never rejects.
#[derive(Debug, Clone)]
pub struct ClientMetaExt(pub ClientMeta);

impl<S: Send + Sync> FromRequestParts<S> for ClientMetaExt {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let ip_address = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(|v| v.trim().to_string());

        let user_agent = parts
            .headers
            .get("user-agent")
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        Ok(ClientMetaExt(ClientMeta::new(ip_address, user_agent)))
    }
}
