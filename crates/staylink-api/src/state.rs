//! Application state shared across all handlers.

use std::sync::Arc;

use staylink_auth::jwt::TokenIssuer;
use staylink_auth::resolver::AccessResolver;
use staylink_core::config::AppConfig;
use staylink_database::StorePools;
use staylink_database::repositories::user::UserRepository;
use staylink_service::account::AccountService;
use staylink_service::collaboration::CollaborationService;
use staylink_service::consent::ConsentService;
use staylink_service::gdpr::GdprService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// The two store pools (for health checks).
    pub pools: StorePools,
    /// Session token issuer.
    pub issuer: Arc<TokenIssuer>,
    /// Identity & access resolver.
    pub resolver: Arc<AccessResolver>,
    /// User repository (admin status management).
    pub users: Arc<UserRepository>,
    /// Account lifecycle service.
    pub account_service: Arc<AccountService>,
    /// Consent service.
    pub consent_service: Arc<ConsentService>,
    /// GDPR lifecycle service.
    pub gdpr_service: Arc<GdprService>,
    /// Collaboration negotiation service.
    pub collaboration_service: Arc<CollaborationService>,
}
