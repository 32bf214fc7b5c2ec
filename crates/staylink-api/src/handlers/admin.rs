//! Admin handlers — user lifecycle status management.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use staylink_core::error::AppError;

use crate::dto::request::ChangeUserStatusRequest;
use crate::dto::response::UserResponse;
use crate::extractors::Bearer;
use crate::state::AppState;

/// PUT /api/admin/users/{id}/status — verify, reject, or suspend a user.
pub async fn change_user_status(
    State(state): State<AppState>,
    Bearer(token): Bearer,
    Path(user_id): Path<Uuid>,
    Json(req): Json<ChangeUserStatusRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let admin = state.resolver.resolve_admin(&token).await?;

    let updated = state.users.update_status(user_id, req.status).await?;

    tracing::info!(
        admin_id = %admin.id,
        user_id = %user_id,
        status = %req.status,
        "User status changed"
    );

    Ok(Json(UserResponse::from(&updated)))
}
