//! Campaign service
//!
//! Companies create campaigns; the main code's prefix becomes the company
//! part of every athlete sub-code.

use bridged_core::entities::AffiliateCampaign;
use bridged_core::{company_short, DomainError, Snowflake, UserRole};
use tracing::{info, instrument};

use crate::dto::{CampaignResponse, CreateCampaignRequest, UpdateCampaignRequest};

use super::actor::Actor;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Campaign service
pub struct CampaignService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CampaignService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a campaign owned by the calling company
    #[instrument(skip(self, request))]
    pub async fn create(&self, actor: Actor, request: CreateCampaignRequest) -> ServiceResult<CampaignResponse> {
        actor.require_role(UserRole::Company)?;

        let main_code = request.main_affiliate_code.trim().to_uppercase();
        let prefix = company_short(&main_code);
        if !prefix.chars().any(|c| c.is_ascii_alphanumeric()) {
            return Err(DomainError::InvalidAffiliateCode(main_code).into());
        }

        if self
            .ctx
            .campaign_repo()
            .find_by_main_code(&main_code)
            .await?
            .is_some()
        {
            return Err(DomainError::CampaignCodeExists(main_code).into());
        }

        let description = request
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        let campaign = AffiliateCampaign::new(
            self.ctx.generate_id(),
            actor.user_id,
            request.name.trim().to_string(),
            &main_code,
        )
        .with_description(description)
        .with_commission(request.commission_rate_percent);

        self.ctx.campaign_repo().create(&campaign).await?;

        info!(
            campaign_id = %campaign.id,
            company_id = %actor.user_id,
            main_code = %campaign.main_affiliate_code,
            "Campaign created"
        );

        Ok(CampaignResponse::from(campaign))
    }

    #[instrument(skip(self))]
    pub async fn get(&self, campaign_id: Snowflake) -> ServiceResult<CampaignResponse> {
        let campaign = self.load(campaign_id).await?;
        Ok(CampaignResponse::from(campaign))
    }

    /// Campaigns currently accepting applications
    #[instrument(skip(self))]
    pub async fn list_active(&self) -> ServiceResult<Vec<CampaignResponse>> {
        let campaigns = self.ctx.campaign_repo().find_active().await?;
        Ok(campaigns.iter().map(CampaignResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn list_by_company(&self, company_id: Snowflake) -> ServiceResult<Vec<CampaignResponse>> {
        let campaigns = self.ctx.campaign_repo().find_by_company(company_id).await?;
        Ok(campaigns.iter().map(CampaignResponse::from).collect())
    }

    /// Open or close a campaign (owner or admin)
    #[instrument(skip(self))]
    pub async fn set_active(
        &self,
        actor: Actor,
        campaign_id: Snowflake,
        request: UpdateCampaignRequest,
    ) -> ServiceResult<CampaignResponse> {
        let mut campaign = self.load(campaign_id).await?;
        if !actor.is_admin() && !campaign.is_owned_by(actor.user_id) {
            return Err(DomainError::NotCampaignOwner.into());
        }

        if campaign.is_active != request.is_active {
            self.ctx
                .campaign_repo()
                .set_active(campaign_id, request.is_active)
                .await?;
            campaign.is_active = request.is_active;
            info!(campaign_id = %campaign_id, is_active = request.is_active, "Campaign status changed");
        }

        Ok(CampaignResponse::from(campaign))
    }

    async fn load(&self, campaign_id: Snowflake) -> ServiceResult<AffiliateCampaign> {
        self.ctx
            .campaign_repo()
            .find_by_id(campaign_id)
            .await?
            .ok_or_else(|| DomainError::CampaignNotFound(campaign_id).into())
    }
}
