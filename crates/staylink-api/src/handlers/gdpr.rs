//! GDPR handlers — export and deletion lifecycle.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;

use staylink_core::error::AppError;

use crate::dto::request::ExportDownloadQuery;
use crate::dto::response::{DeletionCancelResponse, GdprRequestResponse};
use crate::extractors::{AuthUserAllowPending, ClientMetaExt};
use crate::state::AppState;

/// POST /api/gdpr/export-request
pub async fn request_export(
    State(state): State<AppState>,
    AuthUserAllowPending(user): AuthUserAllowPending,
    ClientMetaExt(meta): ClientMetaExt,
) -> Result<(StatusCode, Json<GdprRequestResponse>), AppError> {
    let request = state.gdpr_service.request_export(user.id, &meta).await?;

    Ok((
        StatusCode::CREATED,
        Json(GdprRequestResponse::from_request(
            &request,
            Some(
                "Your data export request has been received. You will be notified when it is \
                 ready for download."
                    .to_string(),
            ),
        )),
    ))
}

/// GET /api/gdpr/export-download?token=
pub async fn download_export(
    State(state): State<AppState>,
    AuthUserAllowPending(user): AuthUserAllowPending,
    Query(query): Query<ExportDownloadQuery>,
) -> Result<impl IntoResponse, AppError> {
    let data = state.gdpr_service.download_export(user.id, &query.token).await?;

    let disposition = format!("attachment; filename=staylink-data-export-{}.json", user.id);
    Ok((
        [(header::CONTENT_DISPOSITION, disposition)],
        Json(data),
    ))
}

/// GET /api/gdpr/export-status
pub async fn export_status(
    State(state): State<AppState>,
    AuthUserAllowPending(user): AuthUserAllowPending,
) -> Result<Json<GdprRequestResponse>, AppError> {
    let request = state.gdpr_service.export_status(user.id).await?;
    Ok(Json(GdprRequestResponse::from_request(&request, None)))
}

/// POST /api/gdpr/delete-request — idempotent while one is pending.
pub async fn request_deletion(
    State(state): State<AppState>,
    AuthUserAllowPending(user): AuthUserAllowPending,
    ClientMetaExt(meta): ClientMetaExt,
) -> Result<(StatusCode, Json<GdprRequestResponse>), AppError> {
    let outcome = state.gdpr_service.request_deletion(user.id, &meta).await?;

    let message = if outcome.already_pending {
        "You already have a pending deletion request.".to_string()
    } else {
        let scheduled = outcome
            .request
            .expires_at
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "the scheduled date".to_string());
        format!(
            "Your account deletion request has been received. Your account will be deleted on \
             {scheduled}. You can cancel this request before then."
        )
    };

    Ok((
        StatusCode::CREATED,
        Json(GdprRequestResponse::from_request(
            &outcome.request,
            Some(message),
        )),
    ))
}

/// POST /api/gdpr/delete-cancel
pub async fn cancel_deletion(
    State(state): State<AppState>,
    AuthUserAllowPending(user): AuthUserAllowPending,
    ClientMetaExt(meta): ClientMetaExt,
) -> Result<Json<DeletionCancelResponse>, AppError> {
    state.gdpr_service.cancel_deletion(user.id, &meta).await?;

    Ok(Json(DeletionCancelResponse {
        message: "Your account deletion request has been cancelled. Your account will remain \
                  active."
            .to_string(),
        cancelled: true,
    }))
}

/// GET /api/gdpr/delete-status
pub async fn deletion_status(
    State(state): State<AppState>,
    AuthUserAllowPending(user): AuthUserAllowPending,
) -> Result<Json<GdprRequestResponse>, AppError> {
    let request = state.gdpr_service.deletion_status(user.id).await?;
    Ok(Json(GdprRequestResponse::from_request(&request, None)))
}
