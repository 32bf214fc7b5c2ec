//! StayLink server — creator/hotel collaboration platform backend.
//!
//! Entry point that wires all crates together and starts the HTTP server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use staylink_core::config::AppConfig;
use staylink_core::error::AppError;

#[tokio::main]
async fn main() {
    let env = std::env::var("STAYLINK_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting StayLink v{}", env!("CARGO_PKG_VERSION"));

    // ── Store pools ──────────────────────────────────────────────
    let pools = staylink_database::StorePools::connect(&config.database).await?;

    // ── Repositories ─────────────────────────────────────────────
    use staylink_database::repositories;
    let user_repo = Arc::new(repositories::user::UserRepository::new(
        pools.auth().clone(),
    ));
    let token_ledger = Arc::new(repositories::token::TokenLedger::new(pools.auth().clone()));
    let consent_repo = Arc::new(repositories::consent::ConsentRepository::new(
        pools.auth().clone(),
    ));
    let gdpr_repo = Arc::new(repositories::gdpr::GdprRepository::new(pools.auth().clone()));
    let profile_repo = Arc::new(repositories::profile::ProfileRepository::new(
        pools.business().clone(),
    ));
    let collaboration_repo = Arc::new(repositories::collaboration::CollaborationRepository::new(
        pools.business().clone(),
    ));
    let chat_repo = Arc::new(repositories::chat::ChatRepository::new(
        pools.business().clone(),
    ));

    // ── Auth components ──────────────────────────────────────────
    let password_hasher = Arc::new(staylink_auth::password::PasswordHasher::new());
    let issuer = Arc::new(staylink_auth::jwt::TokenIssuer::new(&config.auth));
    let resolver = Arc::new(staylink_auth::resolver::AccessResolver::new(
        Arc::clone(&issuer),
        Arc::clone(&user_repo),
        Arc::clone(&profile_repo),
    ));

    // ── Services ─────────────────────────────────────────────────
    let notifier = Arc::new(staylink_service::email::EmailNotifier::new(
        config.email.clone(),
    ));
    let account_service = Arc::new(staylink_service::account::AccountService::new(
        Arc::clone(&user_repo),
        Arc::clone(&profile_repo),
        Arc::clone(&token_ledger),
        Arc::clone(&consent_repo),
        Arc::clone(&password_hasher),
        Arc::clone(&issuer),
        Arc::clone(&notifier),
        config.auth.clone(),
        config.server.frontend_url.clone(),
    ));
    let consent_service = Arc::new(staylink_service::consent::ConsentService::new(
        Arc::clone(&user_repo),
        Arc::clone(&consent_repo),
    ));
    let gdpr_service = Arc::new(staylink_service::gdpr::GdprService::new(
        Arc::clone(&user_repo),
        Arc::clone(&profile_repo),
        Arc::clone(&collaboration_repo),
        Arc::clone(&consent_repo),
        Arc::clone(&gdpr_repo),
        config.gdpr.clone(),
    ));
    let collaboration_service = Arc::new(staylink_service::collaboration::CollaborationService::new(
        Arc::clone(&collaboration_repo),
        Arc::clone(&chat_repo),
        Arc::clone(&profile_repo),
    ));

    // ── HTTP server ──────────────────────────────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let app_state = staylink_api::state::AppState {
        config: Arc::new(config),
        pools: pools.clone(),
        issuer,
        resolver,
        users: user_repo,
        account_service,
        consent_service,
        gdpr_service,
        collaboration_service,
    };

    let app = staylink_api::router::build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("StayLink server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    pools.close().await;
    tracing::info!("StayLink server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
