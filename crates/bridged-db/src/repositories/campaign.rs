//! PostgreSQL implementation of CampaignRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use bridged_core::entities::AffiliateCampaign;
use bridged_core::error::DomainError;
use bridged_core::traits::{CampaignRepository, RepoResult};
use bridged_core::value_objects::Snowflake;

use crate::models::CampaignModel;

use super::error::{map_db_error, map_unique_violation, CAMPAIGNS_MAIN_CODE_KEY};

const CAMPAIGN_COLUMNS: &str = "id, company_id, name, main_affiliate_code, description, \
     commission_rate_percent, is_active, created_at, updated_at";

/// PostgreSQL implementation of CampaignRepository
#[derive(Clone)]
pub struct PgCampaignRepository {
    pool: PgPool,
}

impl PgCampaignRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CampaignRepository for PgCampaignRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<AffiliateCampaign>> {
        let result = sqlx::query_as::<_, CampaignModel>(&format!(
            "SELECT {CAMPAIGN_COLUMNS} FROM affiliate_campaigns WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(AffiliateCampaign::from))
    }

    #[instrument(skip(self))]
    async fn find_by_main_code(&self, code: &str) -> RepoResult<Option<AffiliateCampaign>> {
        let result = sqlx::query_as::<_, CampaignModel>(&format!(
            "SELECT {CAMPAIGN_COLUMNS} FROM affiliate_campaigns WHERE main_affiliate_code = $1"
        ))
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(AffiliateCampaign::from))
    }

    #[instrument(skip(self))]
    async fn find_active(&self) -> RepoResult<Vec<AffiliateCampaign>> {
        let rows = sqlx::query_as::<_, CampaignModel>(&format!(
            "SELECT {CAMPAIGN_COLUMNS} FROM affiliate_campaigns WHERE is_active ORDER BY id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(AffiliateCampaign::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_company(&self, company_id: Snowflake) -> RepoResult<Vec<AffiliateCampaign>> {
        let rows = sqlx::query_as::<_, CampaignModel>(&format!(
            "SELECT {CAMPAIGN_COLUMNS} FROM affiliate_campaigns WHERE company_id = $1 ORDER BY id DESC"
        ))
        .bind(company_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(AffiliateCampaign::from).collect())
    }

    #[instrument(skip(self, campaign), fields(campaign_id = %campaign.id))]
    async fn create(&self, campaign: &AffiliateCampaign) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO affiliate_campaigns
                (id, company_id, name, main_affiliate_code, description,
                 commission_rate_percent, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(campaign.id.into_inner())
        .bind(campaign.company_id.into_inner())
        .bind(&campaign.name)
        .bind(&campaign.main_affiliate_code)
        .bind(&campaign.description)
        .bind(campaign.commission_rate_percent)
        .bind(campaign.is_active)
        .bind(campaign.created_at)
        .bind(campaign.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, |constraint| {
                (constraint == CAMPAIGNS_MAIN_CODE_KEY)
                    .then(|| DomainError::CampaignCodeExists(campaign.main_affiliate_code.clone()))
            })
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_active(&self, id: Snowflake, is_active: bool) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE affiliate_campaigns
            SET is_active = $2, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .bind(is_active)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::CampaignNotFound(id));
        }

        Ok(())
    }
}
