//! Partnership service
//!
//! Athletes apply to campaigns; admins approve (which assigns the sub-code)
//! or reject.

use bridged_core::codes::normalize_code;
use bridged_core::entities::{AffiliateCampaign, AffiliatePartnership};
use bridged_core::{DomainError, Snowflake, UserRole};
use tracing::{info, instrument, warn};

use crate::dto::{CreatePartnershipRequest, PartnershipResponse, RejectPartnershipRequest};

use super::actor::Actor;
use super::affiliate_code::AffiliateCodeService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Generation rounds per approval when another reviewer takes the code first
pub const MAX_ASSIGNMENT_ROUNDS: u32 = 3;

/// Partnership service
pub struct PartnershipService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PartnershipService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Apply to a campaign as an athlete
    #[instrument(skip(self, request))]
    pub async fn apply(
        &self,
        actor: Actor,
        campaign_id: Snowflake,
        request: CreatePartnershipRequest,
    ) -> ServiceResult<PartnershipResponse> {
        actor.require_role(UserRole::Athlete)?;

        let campaign = self.load_campaign(campaign_id).await?;
        if !campaign.is_active {
            return Err(DomainError::CampaignInactive.into());
        }

        let alias = request.preferred_alias.trim().to_string();
        if normalize_code(&alias).is_empty() {
            return Err(DomainError::InvalidAffiliateCode(alias).into());
        }

        if self
            .ctx
            .partnership_repo()
            .find_open_application(campaign_id, actor.user_id)
            .await?
            .is_some()
        {
            return Err(DomainError::AlreadyApplied.into());
        }

        let partnership =
            AffiliatePartnership::new(self.ctx.generate_id(), campaign_id, actor.user_id, alias);
        self.ctx.partnership_repo().create(&partnership).await?;

        info!(
            partnership_id = %partnership.id,
            campaign_id = %campaign_id,
            athlete_id = %actor.user_id,
            "Partnership application created"
        );

        Ok(PartnershipResponse::from(partnership))
    }

    /// Approve a pending application and assign its sub-code
    ///
    /// The code is generated read-only, then stored with a conditional update
    /// that fails with `SubCodeTaken` if another approval stored it first. In
    /// that case generation runs again, up to [`MAX_ASSIGNMENT_ROUNDS`] times.
    #[instrument(skip(self))]
    pub async fn approve(&self, actor: Actor, partnership_id: Snowflake) -> ServiceResult<PartnershipResponse> {
        actor.require_admin()?;

        let mut partnership = self.load_partnership(partnership_id).await?;
        if !partnership.is_pending() {
            return Err(DomainError::PartnershipAlreadyReviewed.into());
        }
        let campaign = self.load_campaign(partnership.campaign_id).await?;

        let codes = AffiliateCodeService::new(self.ctx);
        let mut round = 1;
        let sub_code = loop {
            let candidate = codes
                .generate_unique_sub_code(
                    &campaign.main_affiliate_code,
                    &partnership.athlete_preferred_alias,
                    campaign.id,
                )
                .await?;

            match self
                .ctx
                .partnership_repo()
                .assign_sub_code(partnership_id, &candidate, actor.user_id)
                .await
            {
                Ok(()) => break candidate,
                Err(DomainError::SubCodeTaken(code)) if round < MAX_ASSIGNMENT_ROUNDS => {
                    warn!(sub_code = %code, round, "Sub-code taken concurrently, regenerating");
                    round += 1;
                }
                Err(e) => return Err(e.into()),
            }
        };

        partnership.approve(sub_code, actor.user_id);

        info!(
            partnership_id = %partnership_id,
            sub_code = partnership.generated_sub_code.as_deref().unwrap_or_default(),
            reviewer_id = %actor.user_id,
            "Partnership approved"
        );

        Ok(PartnershipResponse::from(partnership))
    }

    /// Reject a pending application
    #[instrument(skip(self, request))]
    pub async fn reject(
        &self,
        actor: Actor,
        partnership_id: Snowflake,
        request: RejectPartnershipRequest,
    ) -> ServiceResult<PartnershipResponse> {
        actor.require_admin()?;

        let mut partnership = self.load_partnership(partnership_id).await?;
        if !partnership.is_pending() {
            return Err(DomainError::PartnershipAlreadyReviewed.into());
        }

        let reason = request
            .reason
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());

        self.ctx
            .partnership_repo()
            .reject(partnership_id, reason.as_deref(), actor.user_id)
            .await?;
        partnership.reject(reason, actor.user_id);

        info!(partnership_id = %partnership_id, reviewer_id = %actor.user_id, "Partnership rejected");

        Ok(PartnershipResponse::from(partnership))
    }

    /// Get a partnership visible to the caller
    ///
    /// Visible to the applying athlete, the campaign's company, and admins.
    #[instrument(skip(self))]
    pub async fn get(&self, actor: Actor, partnership_id: Snowflake) -> ServiceResult<PartnershipResponse> {
        let partnership = self.load_partnership(partnership_id).await?;

        if !actor.is_admin() && partnership.athlete_id != actor.user_id {
            let campaign = self.load_campaign(partnership.campaign_id).await?;
            if !campaign.is_owned_by(actor.user_id) {
                // Don't reveal that the partnership exists
                return Err(DomainError::PartnershipNotFound(partnership_id).into());
            }
        }

        Ok(PartnershipResponse::from(partnership))
    }

    /// List a campaign's partnerships (campaign owner or admin)
    #[instrument(skip(self))]
    pub async fn list_by_campaign(
        &self,
        actor: Actor,
        campaign_id: Snowflake,
    ) -> ServiceResult<Vec<PartnershipResponse>> {
        let campaign = self.load_campaign(campaign_id).await?;
        if !actor.is_admin() && !campaign.is_owned_by(actor.user_id) {
            return Err(DomainError::NotCampaignOwner.into());
        }

        let partnerships = self.ctx.partnership_repo().find_by_campaign(campaign_id).await?;
        Ok(partnerships.iter().map(PartnershipResponse::from).collect())
    }

    /// List an athlete's partnerships (the athlete or an admin)
    #[instrument(skip(self))]
    pub async fn list_by_athlete(
        &self,
        actor: Actor,
        athlete_id: Snowflake,
    ) -> ServiceResult<Vec<PartnershipResponse>> {
        actor.require_self_or_admin(athlete_id)?;

        let partnerships = self.ctx.partnership_repo().find_by_athlete(athlete_id).await?;
        Ok(partnerships.iter().map(PartnershipResponse::from).collect())
    }

    /// Admin review queue
    #[instrument(skip(self))]
    pub async fn list_pending(&self, actor: Actor) -> ServiceResult<Vec<PartnershipResponse>> {
        actor.require_admin()?;

        let partnerships = self.ctx.partnership_repo().find_pending().await?;
        Ok(partnerships.iter().map(PartnershipResponse::from).collect())
    }

    async fn load_partnership(&self, id: Snowflake) -> ServiceResult<AffiliatePartnership> {
        self.ctx
            .partnership_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::PartnershipNotFound(id).into())
    }

    async fn load_campaign(&self, id: Snowflake) -> ServiceResult<AffiliateCampaign> {
        self.ctx
            .campaign_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::from(DomainError::CampaignNotFound(id)))
    }
}
