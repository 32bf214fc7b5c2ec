//! Consent handlers — status, marketing consent, cookies, history.

use axum::Json;
use axum::extract::{Query, State};

use staylink_core::error::AppError;
use staylink_core::types::pagination::{PageRequest, PageResponse};
use staylink_entity::consent::{ConsentRecord, CookieConsent};
use staylink_service::consent::ConsentStatus;

use crate::dto::request::{
    CookieConsentQuery, CookieConsentRequest, PageQuery, UpdateMarketingConsentRequest,
};
use crate::dto::response::MarketingConsentResponse;
use crate::extractors::{AuthUserAllowPending, ClientMetaExt, OptionalUserId};
use crate::handlers::validate_body;
use crate::state::AppState;

/// GET /api/consent/me
pub async fn get_status(
    State(state): State<AppState>,
    AuthUserAllowPending(user): AuthUserAllowPending,
) -> Json<ConsentStatus> {
    Json(state.consent_service.status(&user))
}

/// PUT /api/consent/me
pub async fn update_marketing(
    State(state): State<AppState>,
    AuthUserAllowPending(user): AuthUserAllowPending,
    ClientMetaExt(meta): ClientMetaExt,
    Json(req): Json<UpdateMarketingConsentRequest>,
) -> Result<Json<MarketingConsentResponse>, AppError> {
    let (marketing_consent, marketing_consent_at) = state
        .consent_service
        .update_marketing_consent(user.id, req.marketing_consent, &meta)
        .await?;

    let action = if marketing_consent { "given" } else { "withdrawn" };
    Ok(Json(MarketingConsentResponse {
        marketing_consent,
        marketing_consent_at,
        message: format!("Marketing consent {action} successfully"),
    }))
}

/// POST /api/consent/cookies — anonymous or authenticated.
pub async fn store_cookies(
    State(state): State<AppState>,
    OptionalUserId(user_id): OptionalUserId,
    ClientMetaExt(meta): ClientMetaExt,
    Json(req): Json<CookieConsentRequest>,
) -> Result<Json<CookieConsent>, AppError> {
    validate_body(&req)?;

    let stored = state
        .consent_service
        .store_cookie_consent(
            &req.visitor_id,
            user_id,
            req.functional,
            req.analytics,
            req.marketing,
            &meta,
        )
        .await?;

    Ok(Json(stored))
}

/// GET /api/consent/cookies?visitor_id=
pub async fn get_cookies(
    State(state): State<AppState>,
    Query(query): Query<CookieConsentQuery>,
) -> Result<Json<CookieConsent>, AppError> {
    state
        .consent_service
        .cookie_consent(&query.visitor_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("No cookie consent recorded for this visitor"))
}

/// GET /api/consent/history
pub async fn history(
    State(state): State<AppState>,
    AuthUserAllowPending(user): AuthUserAllowPending,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageResponse<ConsentRecord>>, AppError> {
    let page = PageRequest::new(query.page.unwrap_or(1), query.page_size.unwrap_or(25));
    let history = state.consent_service.history(user.id, &page).await?;
    Ok(Json(history))
}
