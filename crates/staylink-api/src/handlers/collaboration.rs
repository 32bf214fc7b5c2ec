//! Collaboration handlers — proposal lifecycle, negotiation, and chat.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use staylink_auth::resolver::MarketplaceActor;
use staylink_core::error::AppError;
use staylink_core::types::pagination::{PageRequest, PageResponse};
use staylink_entity::chat::ChatMessage;
use staylink_entity::collaboration::{Collaboration, InitiatorType, TermsPatch};
use staylink_service::collaboration::{CreateCollaborationInput, Participant};

use crate::dto::request::{
    CollaborationListQuery, CollaborationResponseStatus, CreateCollaborationRequest,
    PageQuery, PostMessageRequest, RespondToCollaborationRequest,
};
use crate::extractors::Bearer;
use crate::handlers::validate_body;
use crate::state::AppState;

fn participant(actor: &MarketplaceActor) -> Participant {
    Participant {
        side: actor.side,
        profile_id: actor.profile_id,
    }
}

/// POST /api/collaborations — creator application or hotel invitation,
/// decided by `initiator_type`.
pub async fn create(
    State(state): State<AppState>,
    Bearer(token): Bearer,
    Json(req): Json<CreateCollaborationRequest>,
) -> Result<(StatusCode, Json<Collaboration>), AppError> {
    let input = CreateCollaborationInput {
        listing_id: req.listing_id,
        creator_id: req.creator_id,
        why_great_fit: req.why_great_fit,
        consent: req.consent,
        collaboration_type: req.collaboration_type,
        free_stay_min_nights: req.free_stay_min_nights,
        free_stay_max_nights: req.free_stay_max_nights,
        paid_amount: req.paid_amount,
        discount_percentage: req.discount_percentage,
        travel_date_from: req.travel_date_from,
        travel_date_to: req.travel_date_to,
        preferred_months: req.preferred_months,
        platform_deliverables: req.platform_deliverables,
    };

    let collaboration = match req.initiator_type {
        InitiatorType::Creator => {
            let (_, profile) = state.resolver.resolve_creator(&token).await?;
            state
                .collaboration_service
                .create_as_creator(profile.id, input)
                .await?
        }
        InitiatorType::Hotel => {
            let (_, profile) = state.resolver.resolve_hotel(&token).await?;
            state
                .collaboration_service
                .create_as_hotel(profile.id, input)
                .await?
        }
    };

    Ok((StatusCode::CREATED, Json(collaboration)))
}

/// GET /api/collaborations — the acting side's proposals.
pub async fn list(
    State(state): State<AppState>,
    Bearer(token): Bearer,
    Query(query): Query<CollaborationListQuery>,
) -> Result<Json<PageResponse<Collaboration>>, AppError> {
    let actor = state.resolver.resolve_marketplace_actor(&token).await?;
    let page = PageRequest::new(query.page.unwrap_or(1), query.page_size.unwrap_or(25));

    let collaborations = match actor.side {
        InitiatorType::Creator => {
            state
                .collaboration_service
                .list_for_creator(actor.profile_id, query.status, &page)
                .await?
        }
        InitiatorType::Hotel => {
            state
                .collaboration_service
                .list_for_hotel(actor.profile_id, query.status, &page)
                .await?
        }
    };

    Ok(Json(collaborations))
}

/// GET /api/collaborations/{id}
pub async fn get(
    State(state): State<AppState>,
    Bearer(token): Bearer,
    Path(id): Path<Uuid>,
) -> Result<Json<Collaboration>, AppError> {
    let actor = state.resolver.resolve_marketplace_actor(&token).await?;
    let collaboration = state
        .collaboration_service
        .get(participant(&actor), id)
        .await?;
    Ok(Json(collaboration))
}

/// POST /api/collaborations/{id}/respond — receiving side accepts or
/// declines a pending proposal.
pub async fn respond(
    State(state): State<AppState>,
    Bearer(token): Bearer,
    Path(id): Path<Uuid>,
    Json(req): Json<RespondToCollaborationRequest>,
) -> Result<Json<Collaboration>, AppError> {
    let actor = state.resolver.resolve_marketplace_actor(&token).await?;
    let participant = participant(&actor);
    let accept = req.status == CollaborationResponseStatus::Accepted;

    let collaboration = state
        .collaboration_service
        .respond(participant, id, accept)
        .await?;

    if let Some(message) = req
        .response_message
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
    {
        state
            .collaboration_service
            .post_message(participant, actor.user.id, id, message)
            .await
            .ok(); // the transition already committed; a lost note is not fatal
    }

    Ok(Json(collaboration))
}

/// PUT /api/collaborations/{id}/terms — propose modified terms.
pub async fn propose_terms(
    State(state): State<AppState>,
    Bearer(token): Bearer,
    Path(id): Path<Uuid>,
    Json(patch): Json<TermsPatch>,
) -> Result<Json<Collaboration>, AppError> {
    let actor = state.resolver.resolve_marketplace_actor(&token).await?;
    let collaboration = state
        .collaboration_service
        .propose_terms(participant(&actor), id, patch)
        .await?;
    Ok(Json(collaboration))
}

/// POST /api/collaborations/{id}/agree — agree to the current term set.
pub async fn agree(
    State(state): State<AppState>,
    Bearer(token): Bearer,
    Path(id): Path<Uuid>,
) -> Result<Json<Collaboration>, AppError> {
    let actor = state.resolver.resolve_marketplace_actor(&token).await?;
    let collaboration = state
        .collaboration_service
        .agree(participant(&actor), id)
        .await?;
    Ok(Json(collaboration))
}

/// POST /api/collaborations/{id}/cancel
pub async fn cancel(
    State(state): State<AppState>,
    Bearer(token): Bearer,
    Path(id): Path<Uuid>,
) -> Result<Json<Collaboration>, AppError> {
    let actor = state.resolver.resolve_marketplace_actor(&token).await?;
    let collaboration = state
        .collaboration_service
        .cancel(participant(&actor), id)
        .await?;
    Ok(Json(collaboration))
}

/// POST /api/collaborations/{id}/complete
pub async fn complete(
    State(state): State<AppState>,
    Bearer(token): Bearer,
    Path(id): Path<Uuid>,
) -> Result<Json<Collaboration>, AppError> {
    let actor = state.resolver.resolve_marketplace_actor(&token).await?;
    let collaboration = state
        .collaboration_service
        .complete(participant(&actor), id)
        .await?;
    Ok(Json(collaboration))
}

/// GET /api/collaborations/{id}/messages
pub async fn list_messages(
    State(state): State<AppState>,
    Bearer(token): Bearer,
    Path(id): Path<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageResponse<ChatMessage>>, AppError> {
    let actor = state.resolver.resolve_marketplace_actor(&token).await?;
    let page = PageRequest::new(query.page.unwrap_or(1), query.page_size.unwrap_or(50));
    let messages = state
        .collaboration_service
        .messages(participant(&actor), id, &page)
        .await?;
    Ok(Json(messages))
}

/// POST /api/collaborations/{id}/messages
pub async fn post_message(
    State(state): State<AppState>,
    Bearer(token): Bearer,
    Path(id): Path<Uuid>,
    Json(req): Json<PostMessageRequest>,
) -> Result<(StatusCode, Json<ChatMessage>), AppError> {
    validate_body(&req)?;

    let actor = state.resolver.resolve_marketplace_actor(&token).await?;
    let message = state
        .collaboration_service
        .post_message(participant(&actor), actor.user.id, id, &req.content)
        .await?;
    Ok((StatusCode::CREATED, Json(message)))
}
