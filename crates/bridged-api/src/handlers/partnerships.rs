//! Partnership handlers
//!
//! Athletes apply to campaigns; admins review the queue. Approval is where a
//! partnership receives its unique sub-code.

use axum::{
    extract::{Path, State},
    Json,
};
use bridged_service::{
    CreatePartnershipRequest, PartnershipResponse, PartnershipService, RejectPartnershipRequest,
};

use crate::extractors::{
    AuthUser, CampaignIdPath, OptionalValidatedJson, PartnershipIdPath, ValidatedJson,
};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Apply to a campaign
///
/// POST /campaigns/{campaign_id}/partnerships
pub async fn apply(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<CampaignIdPath>,
    ValidatedJson(request): ValidatedJson<CreatePartnershipRequest>,
) -> ApiResult<Created<PartnershipResponse>> {
    let service = PartnershipService::new(state.service_context());
    let response = service
        .apply(auth.actor(), path.campaign_id()?, request)
        .await?;
    Ok(Created(response))
}

/// GET /campaigns/{campaign_id}/partnerships
pub async fn list_campaign_partnerships(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<CampaignIdPath>,
) -> ApiResult<Json<Vec<PartnershipResponse>>> {
    let service = PartnershipService::new(state.service_context());
    let response = service
        .list_by_campaign(auth.actor(), path.campaign_id()?)
        .await?;
    Ok(Json(response))
}

/// GET /partnerships/@me
pub async fn list_my_partnerships(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<PartnershipResponse>>> {
    let service = PartnershipService::new(state.service_context());
    let response = service.list_by_athlete(auth.actor(), auth.user_id).await?;
    Ok(Json(response))
}

/// Admin review queue
///
/// GET /partnerships/pending
pub async fn list_pending(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<PartnershipResponse>>> {
    let service = PartnershipService::new(state.service_context());
    let response = service.list_pending(auth.actor()).await?;
    Ok(Json(response))
}

/// GET /partnerships/{partnership_id}
pub async fn get_partnership(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<PartnershipIdPath>,
) -> ApiResult<Json<PartnershipResponse>> {
    let service = PartnershipService::new(state.service_context());
    let response = service.get(auth.actor(), path.partnership_id()?).await?;
    Ok(Json(response))
}

/// Approve and assign a unique sub-code
///
/// POST /partnerships/{partnership_id}/approve
pub async fn approve(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<PartnershipIdPath>,
) -> ApiResult<Json<PartnershipResponse>> {
    let service = PartnershipService::new(state.service_context());
    let response = service.approve(auth.actor(), path.partnership_id()?).await?;
    Ok(Json(response))
}

/// POST /partnerships/{partnership_id}/reject
///
/// The body (`{"reason": ...}`) is optional.
pub async fn reject(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<PartnershipIdPath>,
    OptionalValidatedJson(request): OptionalValidatedJson<RejectPartnershipRequest>,
) -> ApiResult<Json<PartnershipResponse>> {
    let service = PartnershipService::new(state.service_context());
    let response = service
        .reject(auth.actor(), path.partnership_id()?, request.unwrap_or_default())
        .await?;
    Ok(Json(response))
}
