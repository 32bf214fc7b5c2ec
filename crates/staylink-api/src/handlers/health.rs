//! Health check handlers.

use axum::Json;
use axum::extract::State;

use staylink_core::error::AppError;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /api/health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        database: None,
    })
}

/// GET /api/health/detailed — pings both stores.
pub async fn detailed_health(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, AppError> {
    let database = state.pools.health_check().await?;
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        database: Some(database),
    }))
}
