//! Collaboration negotiation state machine.
//!
//! Every transition appends a system-authored chat message in the SAME
//! transaction as the status or term change — the chat thread doubles as
//! the audit log of the negotiation, and a transition without its message
//! is incomplete.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use staylink_core::error::AppError;
use staylink_core::result::AppResult;
use staylink_core::types::pagination::{PageRequest, PageResponse};
use staylink_database::repositories::chat::ChatRepository;
use staylink_database::repositories::collaboration::CollaborationRepository;
use staylink_database::repositories::profile::ProfileRepository;
use staylink_entity::chat::ChatMessage;
use staylink_entity::collaboration::model::NewCollaboration;
use staylink_entity::collaboration::terms::validate_typed_terms;
use staylink_entity::collaboration::{
    Collaboration, CollaborationStatus, CollaborationType, InitiatorType, PlatformDeliverables,
    TermsPatch,
};

/// The acting side of a collaboration operation: which party, and which
/// profile row backs them.
#[derive(Debug, Clone, Copy)]
pub struct Participant {
    /// Which side is acting.
    pub side: InitiatorType,
    /// The acting side's profile ID (creator or hotel profile).
    pub profile_id: Uuid,
}

impl Participant {
    /// A creator acting through their profile.
    pub fn creator(profile_id: Uuid) -> Self {
        Self {
            side: InitiatorType::Creator,
            profile_id,
        }
    }

    /// A hotel acting through their profile.
    pub fn hotel(profile_id: Uuid) -> Self {
        Self {
            side: InitiatorType::Hotel,
            profile_id,
        }
    }

    fn is_party_to(&self, collaboration: &Collaboration) -> bool {
        match self.side {
            InitiatorType::Creator => collaboration.creator_id == self.profile_id,
            InitiatorType::Hotel => collaboration.hotel_id == self.profile_id,
        }
    }

    fn label(&self) -> &'static str {
        match self.side {
            InitiatorType::Creator => "The creator",
            InitiatorType::Hotel => "The hotel",
        }
    }
}

/// Input for opening a collaboration proposal.
#[derive(Debug, Clone)]
pub struct CreateCollaborationInput {
    /// The listing the proposal is about.
    pub listing_id: Uuid,
    /// The invited creator (hotel-initiated proposals only).
    pub creator_id: Option<Uuid>,
    /// Creator's pitch (required for creator-initiated proposals).
    pub why_great_fit: Option<String>,
    /// Consent flag (must be true for creator applications).
    pub consent: Option<bool>,
    /// Compensation model (required for hotel-initiated proposals).
    pub collaboration_type: Option<CollaborationType>,
    /// Minimum nights for a free stay.
    pub free_stay_min_nights: Option<i32>,
    /// Maximum nights for a free stay.
    pub free_stay_max_nights: Option<i32>,
    /// Payment amount.
    pub paid_amount: Option<Decimal>,
    /// Discount percentage.
    pub discount_percentage: Option<i32>,
    /// Proposed check-in date.
    pub travel_date_from: Option<NaiveDate>,
    /// Proposed check-out date.
    pub travel_date_to: Option<NaiveDate>,
    /// Preferred months.
    pub preferred_months: Option<Vec<String>>,
    /// Platform deliverables commitment.
    pub platform_deliverables: Vec<PlatformDeliverables>,
}

/// Collaboration negotiation service.
#[derive(Debug, Clone)]
pub struct CollaborationService {
    collaborations: Arc<CollaborationRepository>,
    chat: Arc<ChatRepository>,
    profiles: Arc<ProfileRepository>,
}

impl CollaborationService {
    /// Creates a new collaboration service.
    pub fn new(
        collaborations: Arc<CollaborationRepository>,
        chat: Arc<ChatRepository>,
        profiles: Arc<ProfileRepository>,
    ) -> Self {
        Self {
            collaborations,
            chat,
            profiles,
        }
    }

    /// A creator applies for a collaboration on a listing.
    pub async fn create_as_creator(
        &self,
        creator_profile_id: Uuid,
        input: CreateCollaborationInput,
    ) -> AppResult<Collaboration> {
        if input.why_great_fit.as_deref().unwrap_or("").trim().is_empty() {
            return Err(AppError::validation(
                "why_great_fit is required for creator applications",
            ));
        }
        if input.consent != Some(true) {
            return Err(AppError::validation(
                "consent must be true for creator applications",
            ));
        }
        self.validate_common(&input)?;

        let listing = self
            .profiles
            .find_listing(input.listing_id)
            .await?
            .ok_or_else(|| AppError::not_found("Listing not found"))?;

        self.check_no_active_duplicate(creator_profile_id, input.listing_id)
            .await?;

        let collaboration = self
            .collaborations
            .create(&new_collaboration(
                InitiatorType::Creator,
                creator_profile_id,
                listing.hotel_profile_id,
                &input,
            )?)
            .await?;

        info!(
            collaboration_id = %collaboration.id,
            creator_id = %creator_profile_id,
            "Creator applied for collaboration"
        );
        Ok(collaboration)
    }

    /// A hotel invites a creator to collaborate on one of its listings.
    pub async fn create_as_hotel(
        &self,
        hotel_profile_id: Uuid,
        input: CreateCollaborationInput,
    ) -> AppResult<Collaboration> {
        let creator_id = input
            .creator_id
            .ok_or_else(|| AppError::validation("creator_id is required for hotel invitations"))?;
        let collaboration_type = input.collaboration_type.ok_or_else(|| {
            AppError::validation("collaboration_type is required for hotel invitations")
        })?;

        validate_typed_terms(
            collaboration_type,
            input.free_stay_min_nights,
            input.free_stay_max_nights,
            input.paid_amount,
            input.discount_percentage,
        )?;
        self.validate_common(&input)?;

        let listing = self
            .profiles
            .find_listing(input.listing_id)
            .await?
            .ok_or_else(|| AppError::not_found("Listing not found"))?;

        if listing.hotel_profile_id != hotel_profile_id {
            return Err(AppError::authorization(
                "Listing does not belong to the authenticated hotel",
            ));
        }

        if self.profiles.find_creator_by_id(creator_id).await?.is_none() {
            return Err(AppError::not_found("Creator not found"));
        }

        self.check_no_active_duplicate(creator_id, input.listing_id)
            .await?;

        let collaboration = self
            .collaborations
            .create(&new_collaboration(
                InitiatorType::Hotel,
                creator_id,
                hotel_profile_id,
                &input,
            )?)
            .await?;

        info!(
            collaboration_id = %collaboration.id,
            hotel_id = %hotel_profile_id,
            "Hotel invited creator to collaborate"
        );
        Ok(collaboration)
    }

    /// The receiving side accepts or declines a pending proposal.
    pub async fn respond(
        &self,
        actor: Participant,
        collaboration_id: Uuid,
        accept: bool,
    ) -> AppResult<Collaboration> {
        let collaboration = self.load_for(actor, collaboration_id).await?;

        if actor.side == collaboration.initiator_type {
            return Err(AppError::authorization(
                "Only the receiving side can respond to a proposal",
            ));
        }

        let next = if accept {
            CollaborationStatus::Accepted
        } else {
            CollaborationStatus::Declined
        };
        ensure_transition(collaboration.status, next)?;

        let mut tx = self.collaborations.begin().await?;
        let updated = self
            .collaborations
            .mark_responded(&mut tx, collaboration_id, next)
            .await?;
        let note = if accept {
            format!("{} accepted the collaboration proposal.", actor.label())
        } else {
            format!("{} declined the collaboration proposal.", actor.label())
        };
        self.chat
            .insert_system(&mut tx, collaboration_id, &note)
            .await?;
        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit response: {e}")))?;

        info!(
            collaboration_id = %collaboration_id,
            status = %updated.status,
            "Collaboration response recorded"
        );
        Ok(updated)
    }

    /// Either party proposes modified terms.
    ///
    /// Moves the proposal to `negotiating`, bumps the term version, resets
    /// the counterparty's agreement stamp, and stamps the proposer's own.
    pub async fn propose_terms(
        &self,
        actor: Participant,
        collaboration_id: Uuid,
        patch: TermsPatch,
    ) -> AppResult<Collaboration> {
        if patch.is_empty() {
            return Err(AppError::validation("No term changes supplied"));
        }
        patch.validate()?;

        let collaboration = self.load_for(actor, collaboration_id).await?;
        if !collaboration.status.accepts_term_proposals() {
            return Err(AppError::conflict(format!(
                "Terms cannot be modified while the collaboration is {}",
                collaboration.status
            )));
        }

        let mut tx = self.collaborations.begin().await?;
        let updated = self
            .collaborations
            .apply_terms_patch(&mut tx, collaboration_id, &patch, actor.side)
            .await?;
        let note = format!(
            "{} proposed updated terms ({}). Awaiting counterparty agreement.",
            actor.label(),
            describe_patch(&patch)
        );
        self.chat
            .insert_system(&mut tx, collaboration_id, &note)
            .await?;
        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit term proposal: {e}")))?;

        info!(
            collaboration_id = %collaboration_id,
            terms_version = updated.terms_version,
            "Terms proposal recorded"
        );
        Ok(updated)
    }

    /// One side agrees to the current term set; when both sides have
    /// agreed, the collaboration moves to `accepted`.
    pub async fn agree(
        &self,
        actor: Participant,
        collaboration_id: Uuid,
    ) -> AppResult<Collaboration> {
        let collaboration = self.load_for(actor, collaboration_id).await?;
        if !collaboration.status.accepts_term_proposals() {
            return Err(AppError::conflict(format!(
                "Agreement cannot be recorded while the collaboration is {}",
                collaboration.status
            )));
        }

        let mut tx = self.collaborations.begin().await?;
        let mut updated = self
            .collaborations
            .record_agreement(&mut tx, collaboration_id, actor.side)
            .await?;

        if updated.both_agreed() {
            updated = self
                .collaborations
                .mark_accepted(&mut tx, collaboration_id)
                .await?;
            self.chat
                .insert_system(
                    &mut tx,
                    collaboration_id,
                    "Both parties agreed to the terms. The collaboration is now accepted.",
                )
                .await?;
        } else {
            let note = format!("{} agreed to the current terms.", actor.label());
            self.chat
                .insert_system(&mut tx, collaboration_id, &note)
                .await?;
        }
        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit agreement: {e}")))?;

        info!(
            collaboration_id = %collaboration_id,
            status = %updated.status,
            "Agreement recorded"
        );
        Ok(updated)
    }

    /// Either party cancels an accepted collaboration.
    pub async fn cancel(
        &self,
        actor: Participant,
        collaboration_id: Uuid,
    ) -> AppResult<Collaboration> {
        let collaboration = self.load_for(actor, collaboration_id).await?;
        ensure_transition(collaboration.status, CollaborationStatus::Cancelled)?;

        let mut tx = self.collaborations.begin().await?;
        let updated = self
            .collaborations
            .mark_cancelled(&mut tx, collaboration_id)
            .await?;
        let note = format!("{} cancelled the collaboration.", actor.label());
        self.chat
            .insert_system(&mut tx, collaboration_id, &note)
            .await?;
        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit cancellation: {e}")))?;

        info!(collaboration_id = %collaboration_id, "Collaboration cancelled");
        Ok(updated)
    }

    /// Mark an accepted collaboration completed once deliverables are done.
    pub async fn complete(
        &self,
        actor: Participant,
        collaboration_id: Uuid,
    ) -> AppResult<Collaboration> {
        let collaboration = self.load_for(actor, collaboration_id).await?;
        ensure_transition(collaboration.status, CollaborationStatus::Completed)?;

        let mut tx = self.collaborations.begin().await?;
        let updated = self
            .collaborations
            .mark_completed(&mut tx, collaboration_id)
            .await?;
        self.chat
            .insert_system(
                &mut tx,
                collaboration_id,
                "All deliverables are done. The collaboration is completed.",
            )
            .await?;
        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit completion: {e}")))?;

        info!(collaboration_id = %collaboration_id, "Collaboration completed");
        Ok(updated)
    }

    /// Fetch a collaboration the actor participates in.
    pub async fn get(&self, actor: Participant, collaboration_id: Uuid) -> AppResult<Collaboration> {
        self.load_for(actor, collaboration_id).await
    }

    /// List a creator's collaborations.
    pub async fn list_for_creator(
        &self,
        creator_profile_id: Uuid,
        status: Option<CollaborationStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Collaboration>> {
        self.collaborations
            .list_for_creator(creator_profile_id, status, page)
            .await
    }

    /// List a hotel's collaborations.
    pub async fn list_for_hotel(
        &self,
        hotel_profile_id: Uuid,
        status: Option<CollaborationStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Collaboration>> {
        self.collaborations
            .list_for_hotel(hotel_profile_id, status, page)
            .await
    }

    /// Post a user message to an active collaboration's chat thread.
    pub async fn post_message(
        &self,
        actor: Participant,
        sender_user_id: Uuid,
        collaboration_id: Uuid,
        content: &str,
    ) -> AppResult<ChatMessage> {
        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::validation("Message content is required"));
        }

        let collaboration = self.load_for(actor, collaboration_id).await?;
        if !collaboration.status.is_active() {
            return Err(AppError::conflict(format!(
                "Cannot message on a {} collaboration",
                collaboration.status
            )));
        }

        self.chat
            .insert_user(collaboration_id, sender_user_id, content)
            .await
    }

    /// List a collaboration's chat thread, oldest first.
    pub async fn messages(
        &self,
        actor: Participant,
        collaboration_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ChatMessage>> {
        self.load_for(actor, collaboration_id).await?;
        self.chat.list(collaboration_id, page).await
    }

    async fn load_for(
        &self,
        actor: Participant,
        collaboration_id: Uuid,
    ) -> AppResult<Collaboration> {
        let collaboration = self
            .collaborations
            .find_by_id(collaboration_id)
            .await?
            .ok_or_else(|| AppError::not_found("Collaboration not found"))?;

        if !actor.is_party_to(&collaboration) {
            return Err(AppError::authorization(
                "You are not a participant in this collaboration",
            ));
        }

        Ok(collaboration)
    }

    async fn check_no_active_duplicate(
        &self,
        creator_id: Uuid,
        listing_id: Uuid,
    ) -> AppResult<()> {
        if self
            .collaborations
            .find_active_between(creator_id, listing_id)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(
                "An active collaboration already exists between this creator and listing",
            ));
        }
        Ok(())
    }

    fn validate_common(&self, input: &CreateCollaborationInput) -> AppResult<()> {
        if input.platform_deliverables.is_empty() {
            return Err(AppError::validation(
                "At least one platform deliverable is required",
            ));
        }
        if let (Some(from), Some(to)) = (input.travel_date_from, input.travel_date_to) {
            if to < from {
                return Err(AppError::validation(
                    "travel_date_to must be >= travel_date_from",
                ));
            }
        }
        Ok(())
    }
}

fn ensure_transition(from: CollaborationStatus, to: CollaborationStatus) -> AppResult<()> {
    if !from.can_transition_to(to) {
        return Err(AppError::conflict(format!(
            "Cannot move a {from} collaboration to {to}"
        )));
    }
    Ok(())
}

fn new_collaboration(
    initiator_type: InitiatorType,
    creator_id: Uuid,
    hotel_id: Uuid,
    input: &CreateCollaborationInput,
) -> AppResult<NewCollaboration> {
    Ok(NewCollaboration {
        initiator_type,
        creator_id,
        hotel_id,
        listing_id: input.listing_id,
        why_great_fit: input.why_great_fit.clone(),
        collaboration_type: input.collaboration_type,
        free_stay_min_nights: input.free_stay_min_nights,
        free_stay_max_nights: input.free_stay_max_nights,
        paid_amount: input.paid_amount,
        discount_percentage: input.discount_percentage,
        travel_date_from: input.travel_date_from,
        travel_date_to: input.travel_date_to,
        preferred_months: input.preferred_months.clone(),
        platform_deliverables: serde_json::to_value(&input.platform_deliverables)
            .map_err(|e| AppError::internal(format!("Failed to encode deliverables: {e}")))?,
    })
}

/// Human-readable summary of which term fields a patch touches, for the
/// system audit message.
fn describe_patch(patch: &TermsPatch) -> String {
    let mut changed = Vec::new();
    if patch.collaboration_type.is_some() {
        changed.push("collaboration type");
    }
    if patch.free_stay_min_nights.is_some() || patch.free_stay_max_nights.is_some() {
        changed.push("free stay nights");
    }
    if patch.paid_amount.is_some() {
        changed.push("payment amount");
    }
    if patch.discount_percentage.is_some() {
        changed.push("discount percentage");
    }
    if patch.travel_date_from.is_some() || patch.travel_date_to.is_some() {
        changed.push("travel dates");
    }
    if patch.preferred_months.is_some() {
        changed.push("preferred months");
    }
    if patch.platform_deliverables.is_some() {
        changed.push("deliverables");
    }
    changed.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_patch_lists_changed_fields() {
        let patch = TermsPatch {
            paid_amount: Some(Decimal::new(50000, 2)),
            travel_date_from: NaiveDate::from_ymd_opt(2026, 9, 1),
            ..Default::default()
        };
        assert_eq!(describe_patch(&patch), "payment amount, travel dates");
    }

    #[test]
    fn test_ensure_transition_rejects_illegal_moves() {
        assert!(
            ensure_transition(CollaborationStatus::Declined, CollaborationStatus::Cancelled)
                .is_err()
        );
        assert!(
            ensure_transition(CollaborationStatus::Accepted, CollaborationStatus::Completed)
                .is_ok()
        );
    }
}
