//! Campaign handlers

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};
use bridged_core::Snowflake;
use bridged_service::{CampaignResponse, CampaignService, CreateCampaignRequest, UpdateCampaignRequest};
use serde::Deserialize;

use crate::extractors::{AuthUser, CampaignIdPath, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created};
use crate::state::AppState;

/// Filters for `GET /campaigns`
#[derive(Debug, Default, Deserialize)]
pub struct CampaignListQuery {
    /// Every campaign of one company, active or not
    pub company_id: Option<String>,
}

/// POST /campaigns
pub async fn create_campaign(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateCampaignRequest>,
) -> ApiResult<Created<CampaignResponse>> {
    let service = CampaignService::new(state.service_context());
    let response = service.create(auth.actor(), request).await?;
    Ok(Created(response))
}

/// List active campaigns, or all of one company's with `?company_id=`
///
/// GET /campaigns
pub async fn list_campaigns(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<CampaignListQuery>,
) -> ApiResult<Json<Vec<CampaignResponse>>> {
    let service = CampaignService::new(state.service_context());

    let response = match query.company_id.as_deref() {
        Some(raw) => {
            let company_id: Snowflake = raw
                .parse()
                .map_err(|_| ApiError::invalid_query("Invalid company_id format"))?;
            service.list_by_company(company_id).await?
        }
        None => service.list_active().await?,
    };

    Ok(Json(response))
}

/// GET /campaigns/{campaign_id}
pub async fn get_campaign(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(path): Path<CampaignIdPath>,
) -> ApiResult<Json<CampaignResponse>> {
    let service = CampaignService::new(state.service_context());
    let response = service.get(path.campaign_id()?).await?;
    Ok(Json(response))
}

/// Open or close a campaign
///
/// PATCH /campaigns/{campaign_id}
pub async fn update_campaign(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<CampaignIdPath>,
    request: Result<Json<UpdateCampaignRequest>, JsonRejection>,
) -> ApiResult<Json<CampaignResponse>> {
    let Json(request) = request.map_err(|e| ApiError::invalid_body(e.body_text()))?;
    let service = CampaignService::new(state.service_context());
    let response = service
        .set_active(auth.actor(), path.campaign_id()?, request)
        .await?;
    Ok(Json(response))
}
