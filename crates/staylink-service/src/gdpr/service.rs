//! GDPR lifecycle manager — time-delayed deletion with a cancellation
//! window, and data export with a bounded download window.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use staylink_core::config::GdprConfig;
use staylink_core::error::AppError;
use staylink_core::result::AppResult;
use staylink_core::types::pagination::PageRequest;
use staylink_database::repositories::collaboration::CollaborationRepository;
use staylink_database::repositories::consent::ConsentRepository;
use staylink_database::repositories::gdpr::GdprRepository;
use staylink_database::repositories::profile::ProfileRepository;
use staylink_database::repositories::user::UserRepository;
use staylink_entity::consent::{ConsentType, NewConsentRecord};
use staylink_entity::gdpr::{GdprRequest, GdprRequestStatus, GdprRequestType};

use crate::ClientMeta;
use crate::consent::record_consent_best_effort;
use crate::secrets::generate_url_token;

/// Reason stamped on user-cancelled deletion requests.
const CANCELLED_BY_USER: &str = "User cancelled";

/// Outcome of a deletion request, including the idempotent repeat case.
#[derive(Debug, Clone)]
pub struct DeletionOutcome {
    /// The pending request (existing or newly created).
    pub request: GdprRequest,
    /// Whether a request already existed.
    pub already_pending: bool,
}

/// GDPR data-subject-rights service.
#[derive(Debug, Clone)]
pub struct GdprService {
    users: Arc<UserRepository>,
    profiles: Arc<ProfileRepository>,
    collaborations: Arc<CollaborationRepository>,
    consent: Arc<ConsentRepository>,
    requests: Arc<GdprRepository>,
    config: GdprConfig,
}

impl GdprService {
    /// Creates a new GDPR service.
    pub fn new(
        users: Arc<UserRepository>,
        profiles: Arc<ProfileRepository>,
        collaborations: Arc<CollaborationRepository>,
        consent: Arc<ConsentRepository>,
        requests: Arc<GdprRepository>,
        config: GdprConfig,
    ) -> Self {
        Self {
            users,
            profiles,
            collaborations,
            consent,
            requests,
            config,
        }
    }

    /// File a data export request and process it synchronously.
    ///
    /// Rejected while another export is pending or processing. Processing
    /// runs within this request; a production deployment would offload it,
    /// but that is deliberately not done here.
    pub async fn request_export(&self, user_id: Uuid, meta: &ClientMeta) -> AppResult<GdprRequest> {
        if let Some(existing) = self
            .requests
            .find_active(user_id, GdprRequestType::Export)
            .await?
        {
            info!(user_id = %user_id, request_id = %existing.id, "Export already in flight");
            return Err(AppError::conflict(
                "You already have a pending export request. Please wait for it to complete.",
            ));
        }

        let download_token = generate_url_token();
        let expires_at = Utc::now() + Duration::days(self.config.export_validity_days);

        let request = self
            .requests
            .create_export(
                user_id,
                &download_token,
                expires_at,
                meta.ip_address.as_deref(),
            )
            .await?;

        self.process_export(user_id, request.id).await;

        info!(user_id = %user_id, request_id = %request.id, "Data export requested");

        self.requests
            .find_latest(user_id, GdprRequestType::Export)
            .await?
            .ok_or_else(|| AppError::internal("Export request disappeared during processing"))
    }

    /// Run the collection step: pending -> processing -> completed.
    ///
    /// On failure the request is rolled back to `pending` so it stays
    /// retryable instead of stranding in `processing`.
    async fn process_export(&self, user_id: Uuid, request_id: Uuid) {
        let run = async {
            self.requests
                .update_status(request_id, GdprRequestStatus::Processing)
                .await?;
            // The snapshot is assembled to validate collectability; the
            // download endpoint re-collects fresh data on demand.
            self.collect_user_data(user_id).await?;
            self.requests.mark_completed(request_id).await
        };

        if let Err(e) = run.await {
            error!(
                user_id = %user_id,
                request_id = %request_id,
                error = %e,
                "Export processing failed; rolling back to pending"
            );
            if let Err(rollback_err) = self
                .requests
                .update_status(request_id, GdprRequestStatus::Pending)
                .await
            {
                error!(
                    request_id = %request_id,
                    error = %rollback_err,
                    "Failed to roll export request back to pending"
                );
            }
        }
    }

    /// Download a completed export.
    ///
    /// Failure modes in order: unknown token (404), foreign token (403),
    /// expired link (410), not yet completed (202).
    pub async fn download_export(
        &self,
        user_id: Uuid,
        token: &str,
    ) -> AppResult<serde_json::Value> {
        let request = self
            .requests
            .find_by_download_token(token)
            .await?
            .ok_or_else(|| AppError::not_found("Invalid or expired download token"))?;

        if request.user_id != user_id {
            return Err(AppError::authorization(
                "You don't have permission to download this export",
            ));
        }

        if request.is_past_expiry(Utc::now()) {
            return Err(AppError::gone(
                "This download link has expired. Please request a new export.",
            ));
        }

        if request.status != GdprRequestStatus::Completed {
            return Err(AppError::processing(
                "Your export is still being processed. Please try again later.",
            ));
        }

        let data = self.collect_user_data(user_id).await?;
        info!(user_id = %user_id, request_id = %request.id, "Data export downloaded");
        Ok(data)
    }

    /// Status of the most recent export request.
    pub async fn export_status(&self, user_id: Uuid) -> AppResult<GdprRequest> {
        self.requests
            .find_latest(user_id, GdprRequestType::Export)
            .await?
            .ok_or_else(|| AppError::not_found("No export request found"))
    }

    /// File an account deletion request with a grace period.
    ///
    /// Idempotent: a second request while one is pending returns the
    /// existing request instead of erroring.
    pub async fn request_deletion(
        &self,
        user_id: Uuid,
        meta: &ClientMeta,
    ) -> AppResult<DeletionOutcome> {
        if let Some(existing) = self
            .requests
            .find_active(user_id, GdprRequestType::Deletion)
            .await?
        {
            return Ok(DeletionOutcome {
                request: existing,
                already_pending: true,
            });
        }

        let scheduled_deletion = Utc::now() + Duration::days(self.config.deletion_grace_days);
        let request = self
            .requests
            .create_deletion(user_id, scheduled_deletion, meta.ip_address.as_deref())
            .await?;

        record_consent_best_effort(
            &self.consent,
            NewConsentRecord {
                user_id: Some(user_id),
                consent_type: ConsentType::DeletionRequest,
                consent_given: true,
                version: None,
                ip_address: meta.ip_address.clone(),
                user_agent: meta.user_agent.clone(),
            },
        )
        .await;

        info!(
            user_id = %user_id,
            scheduled = %scheduled_deletion,
            "Account deletion requested"
        );

        Ok(DeletionOutcome {
            request,
            already_pending: false,
        })
    }

    /// Cancel a pending deletion request during its grace window.
    pub async fn cancel_deletion(&self, user_id: Uuid, meta: &ClientMeta) -> AppResult<()> {
        let pending = self
            .requests
            .find_pending_deletion(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("No pending deletion request found"))?;

        self.requests.cancel(pending.id, CANCELLED_BY_USER).await?;

        record_consent_best_effort(
            &self.consent,
            NewConsentRecord {
                user_id: Some(user_id),
                consent_type: ConsentType::DeletionCancelled,
                consent_given: false,
                version: None,
                ip_address: meta.ip_address.clone(),
                user_agent: meta.user_agent.clone(),
            },
        )
        .await;

        info!(user_id = %user_id, request_id = %pending.id, "Account deletion cancelled");
        Ok(())
    }

    /// Status of the most recent deletion request.
    pub async fn deletion_status(&self, user_id: Uuid) -> AppResult<GdprRequest> {
        self.requests
            .find_latest(user_id, GdprRequestType::Deletion)
            .await?
            .ok_or_else(|| AppError::not_found("No deletion request found"))
    }

    /// Gather a snapshot of the user's data across both stores.
    async fn collect_user_data(&self, user_id: Uuid) -> AppResult<serde_json::Value> {
        let mut map = serde_json::Map::new();
        map.insert("export_date".to_string(), json!(Utc::now().to_rfc3339()));

        if let Some(user) = self.users.find_by_id(user_id).await? {
            map.insert("user".to_string(), serde_json::to_value(&user)?);
        }

        let export_page = PageRequest::new(1, 100);

        if let Some(creator) = self.profiles.find_creator_by_user(user_id).await? {
            map.insert("creator_profile".to_string(), serde_json::to_value(&creator)?);
            let collaborations = self
                .collaborations
                .list_for_creator(creator.id, None, &export_page)
                .await?;
            map.insert(
                "collaborations".to_string(),
                serde_json::to_value(&collaborations.items)?,
            );
        }

        if let Some(hotel) = self.profiles.find_hotel_by_user(user_id).await? {
            map.insert("hotel_profile".to_string(), serde_json::to_value(&hotel)?);
            let collaborations = self
                .collaborations
                .list_for_hotel(hotel.id, None, &export_page)
                .await?;
            map.insert(
                "hotel_collaborations".to_string(),
                serde_json::to_value(&collaborations.items)?,
            );
        }

        let history = self.consent.history(user_id, &export_page).await?;
        map.insert(
            "consent_history".to_string(),
            serde_json::to_value(&history.items)?,
        );

        Ok(serde_json::Value::Object(map))
    }
}
