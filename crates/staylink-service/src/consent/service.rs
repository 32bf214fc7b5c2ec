//! Consent service — status reads, marketing consent updates, cookie
//! preferences, and the append-only audit trail.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use staylink_core::result::AppResult;
use staylink_core::types::pagination::{PageRequest, PageResponse};
use staylink_database::repositories::consent::ConsentRepository;
use staylink_database::repositories::user::UserRepository;
use staylink_entity::consent::{ConsentRecord, ConsentType, CookieConsent, NewConsentRecord};
use staylink_entity::user::User;

use crate::ClientMeta;

/// Append a consent audit entry without letting a failure propagate.
///
/// Audit writes are best-effort relative to the primary action: losing an
/// audit row is logged, never fatal, and never rolls the primary change back.
pub async fn record_consent_best_effort(repo: &ConsentRepository, record: NewConsentRecord) {
    if let Err(e) = repo.append(&record).await {
        warn!(
            consent_type = %record.consent_type,
            error = %e,
            "Failed to append consent audit entry"
        );
    }
}

/// Current consent state for a user, derived from the user row.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ConsentStatus {
    /// Whether Terms of Service were accepted.
    pub terms_accepted: bool,
    /// When Terms were accepted.
    pub terms_accepted_at: Option<DateTime<Utc>>,
    /// Accepted Terms version.
    pub terms_version: Option<String>,
    /// Whether the Privacy Policy was accepted.
    pub privacy_accepted: bool,
    /// When the Privacy Policy was accepted.
    pub privacy_accepted_at: Option<DateTime<Utc>>,
    /// Accepted Privacy Policy version.
    pub privacy_version: Option<String>,
    /// Current marketing consent.
    pub marketing_consent: bool,
    /// When marketing consent was last changed.
    pub marketing_consent_at: Option<DateTime<Utc>>,
}

impl From<&User> for ConsentStatus {
    fn from(user: &User) -> Self {
        Self {
            terms_accepted: user.terms_accepted_at.is_some(),
            terms_accepted_at: user.terms_accepted_at,
            terms_version: user.terms_version.clone(),
            privacy_accepted: user.privacy_accepted_at.is_some(),
            privacy_accepted_at: user.privacy_accepted_at,
            privacy_version: user.privacy_version.clone(),
            marketing_consent: user.marketing_consent,
            marketing_consent_at: user.marketing_consent_at,
        }
    }
}

/// Consent management service.
#[derive(Debug, Clone)]
pub struct ConsentService {
    users: Arc<UserRepository>,
    consent: Arc<ConsentRepository>,
}

impl ConsentService {
    /// Creates a new consent service.
    pub fn new(users: Arc<UserRepository>, consent: Arc<ConsentRepository>) -> Self {
        Self { users, consent }
    }

    /// Current consent state for a resolved user.
    pub fn status(&self, user: &User) -> ConsentStatus {
        ConsentStatus::from(user)
    }

    /// Update marketing consent and append its audit entry.
    pub async fn update_marketing_consent(
        &self,
        user_id: Uuid,
        consent_given: bool,
        meta: &ClientMeta,
    ) -> AppResult<(bool, Option<DateTime<Utc>>)> {
        let updated = self
            .users
            .update_marketing_consent(user_id, consent_given)
            .await?;

        record_consent_best_effort(
            &self.consent,
            NewConsentRecord {
                user_id: Some(user_id),
                consent_type: ConsentType::Marketing,
                consent_given,
                version: None,
                ip_address: meta.ip_address.clone(),
                user_agent: meta.user_agent.clone(),
            },
        )
        .await;

        let action = if consent_given { "given" } else { "withdrawn" };
        info!(user_id = %user_id, action = %action, "Marketing consent updated");

        Ok(updated)
    }

    /// Store cookie consent for a visitor, anonymous or authenticated.
    pub async fn store_cookie_consent(
        &self,
        visitor_id: &str,
        user_id: Option<Uuid>,
        functional: bool,
        analytics: bool,
        marketing: bool,
        meta: &ClientMeta,
    ) -> AppResult<CookieConsent> {
        let stored = self
            .consent
            .upsert_cookie_consent(visitor_id, user_id, functional, analytics, marketing)
            .await?;

        record_consent_best_effort(
            &self.consent,
            NewConsentRecord {
                user_id,
                consent_type: ConsentType::Cookies,
                consent_given: functional || analytics || marketing,
                version: None,
                ip_address: meta.ip_address.clone(),
                user_agent: meta.user_agent.clone(),
            },
        )
        .await;

        Ok(stored)
    }

    /// Fetch cookie consent for a visitor.
    pub async fn cookie_consent(&self, visitor_id: &str) -> AppResult<Option<CookieConsent>> {
        self.consent.find_cookie_consent(visitor_id).await
    }

    /// A user's consent history, newest first.
    pub async fn history(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ConsentRecord>> {
        self.consent.history(user_id, page).await
    }
}
