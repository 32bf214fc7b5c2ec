//! Route definitions for the StayLink HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`. The router
//! receives `AppState` and passes it to all handlers via Axum's `State`
//! extractor.

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(consent_routes())
        .merge(gdpr_routes())
        .merge(collaboration_routes())
        .merge(admin_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Auth endpoints: registration, login, token and single-use token flows.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/validate-token", post(handlers::auth::validate_token))
        .route("/auth/me", get(handlers::auth::me))
        .route("/auth/forgot-password", post(handlers::auth::forgot_password))
        .route("/auth/reset-password", post(handlers::auth::reset_password))
        .route("/auth/verify-email", get(handlers::auth::verify_email))
        .route(
            "/auth/send-verification-code",
            post(handlers::auth::send_verification_code),
        )
        .route(
            "/auth/verify-email-code",
            post(handlers::auth::verify_email_code),
        )
}

/// Consent endpoints.
fn consent_routes() -> Router<AppState> {
    Router::new()
        .route("/consent/me", get(handlers::consent::get_status))
        .route("/consent/me", put(handlers::consent::update_marketing))
        .route("/consent/cookies", post(handlers::consent::store_cookies))
        .route("/consent/cookies", get(handlers::consent::get_cookies))
        .route("/consent/history", get(handlers::consent::history))
}

/// GDPR data-subject-rights endpoints.
fn gdpr_routes() -> Router<AppState> {
    Router::new()
        .route("/gdpr/export-request", post(handlers::gdpr::request_export))
        .route("/gdpr/export-download", get(handlers::gdpr::download_export))
        .route("/gdpr/export-status", get(handlers::gdpr::export_status))
        .route("/gdpr/delete-request", post(handlers::gdpr::request_deletion))
        .route("/gdpr/delete-cancel", post(handlers::gdpr::cancel_deletion))
        .route("/gdpr/delete-status", get(handlers::gdpr::deletion_status))
}

/// Collaboration negotiation and chat endpoints.
fn collaboration_routes() -> Router<AppState> {
    Router::new()
        .route("/collaborations", post(handlers::collaboration::create))
        .route("/collaborations", get(handlers::collaboration::list))
        .route("/collaborations/{id}", get(handlers::collaboration::get))
        .route(
            "/collaborations/{id}/respond",
            post(handlers::collaboration::respond),
        )
        .route(
            "/collaborations/{id}/terms",
            put(handlers::collaboration::propose_terms),
        )
        .route(
            "/collaborations/{id}/agree",
            post(handlers::collaboration::agree),
        )
        .route(
            "/collaborations/{id}/cancel",
            post(handlers::collaboration::cancel),
        )
        .route(
            "/collaborations/{id}/complete",
            post(handlers::collaboration::complete),
        )
        .route(
            "/collaborations/{id}/messages",
            get(handlers::collaboration::list_messages),
        )
        .route(
            "/collaborations/{id}/messages",
            post(handlers::collaboration::post_message),
        )
}

/// Admin endpoints.
fn admin_routes() -> Router<AppState> {
    Router::new().route(
        "/admin/users/{id}/status",
        put(handlers::admin::change_user_status),
    )
}

/// Health check endpoints (no auth required).
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/health/detailed", get(handlers::health::detailed_health))
}

/// Build the CORS layer from configuration.
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use tower_http::cors::Any;

    let origins = &state.config.server.cors_origins;

    let mut cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any);

    if origins.iter().any(|o| o == "*") {
        cors = cors.allow_origin(Any);
    } else {
        let parsed: Vec<axum::http::HeaderValue> =
            origins.iter().filter_map(|o| o.parse().ok()).collect();
        cors = cors.allow_origin(parsed);
    }

    cors
}
