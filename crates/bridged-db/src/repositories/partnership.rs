//! PostgreSQL implementation of PartnershipRepository
//!
//! Approval and rejection are conditional updates on `status = 'pending'`,
//! so two reviewers racing on the same row cannot both win. Sub-code
//! uniqueness is enforced by the partial unique index on
//! `generated_sub_code`; losing that race surfaces as `SubCodeTaken`.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use bridged_core::entities::AffiliatePartnership;
use bridged_core::error::DomainError;
use bridged_core::traits::{PartnershipRepository, RepoResult};
use bridged_core::value_objects::Snowflake;

use crate::models::PartnershipModel;

use super::error::{map_db_error, map_unique_violation, PARTNERSHIPS_OPEN_KEY, PARTNERSHIPS_SUB_CODE_KEY};

const PARTNERSHIP_COLUMNS: &str = "id, campaign_id, athlete_id, athlete_preferred_alias, \
     generated_sub_code, status, rejection_reason, reviewed_by, reviewed_at, created_at, updated_at";

/// PostgreSQL implementation of PartnershipRepository
#[derive(Clone)]
pub struct PgPartnershipRepository {
    pool: PgPool,
}

impl PgPartnershipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_many(&self, filter: &str, bind: Option<i64>) -> RepoResult<Vec<AffiliatePartnership>> {
        let sql = format!(
            "SELECT {PARTNERSHIP_COLUMNS} FROM affiliate_partnerships WHERE {filter} ORDER BY id DESC"
        );
        let mut query = sqlx::query_as::<_, PartnershipModel>(&sql);
        if let Some(value) = bind {
            query = query.bind(value);
        }

        let rows = query.fetch_all(&self.pool).await.map_err(map_db_error)?;
        rows.into_iter().map(AffiliatePartnership::try_from).collect()
    }

    /// Explain why a conditional update touched no rows
    async fn not_pending_error(&self, id: Snowflake) -> DomainError {
        match self.find_by_id(id).await {
            Ok(Some(_)) => DomainError::PartnershipAlreadyReviewed,
            Ok(None) => DomainError::PartnershipNotFound(id),
            Err(e) => e,
        }
    }
}

#[async_trait]
impl PartnershipRepository for PgPartnershipRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<AffiliatePartnership>> {
        let result = sqlx::query_as::<_, PartnershipModel>(&format!(
            "SELECT {PARTNERSHIP_COLUMNS} FROM affiliate_partnerships WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(AffiliatePartnership::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_sub_code(&self, code: &str) -> RepoResult<Vec<AffiliatePartnership>> {
        let rows = sqlx::query_as::<_, PartnershipModel>(&format!(
            "SELECT {PARTNERSHIP_COLUMNS} FROM affiliate_partnerships WHERE generated_sub_code = $1"
        ))
        .bind(code)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(AffiliatePartnership::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn find_by_campaign(&self, campaign_id: Snowflake) -> RepoResult<Vec<AffiliatePartnership>> {
        self.fetch_many("campaign_id = $1", Some(campaign_id.into_inner()))
            .await
    }

    #[instrument(skip(self))]
    async fn find_by_athlete(&self, athlete_id: Snowflake) -> RepoResult<Vec<AffiliatePartnership>> {
        self.fetch_many("athlete_id = $1", Some(athlete_id.into_inner()))
            .await
    }

    #[instrument(skip(self))]
    async fn find_pending(&self) -> RepoResult<Vec<AffiliatePartnership>> {
        self.fetch_many("status = 'pending'", None).await
    }

    #[instrument(skip(self))]
    async fn find_open_application(
        &self,
        campaign_id: Snowflake,
        athlete_id: Snowflake,
    ) -> RepoResult<Option<AffiliatePartnership>> {
        let result = sqlx::query_as::<_, PartnershipModel>(&format!(
            "SELECT {PARTNERSHIP_COLUMNS} FROM affiliate_partnerships \
             WHERE campaign_id = $1 AND athlete_id = $2 AND status <> 'rejected'"
        ))
        .bind(campaign_id.into_inner())
        .bind(athlete_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(AffiliatePartnership::try_from).transpose()
    }

    #[instrument(skip(self, partnership), fields(partnership_id = %partnership.id))]
    async fn create(&self, partnership: &AffiliatePartnership) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO affiliate_partnerships
                (id, campaign_id, athlete_id, athlete_preferred_alias, generated_sub_code,
                 status, rejection_reason, reviewed_by, reviewed_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ",
        )
        .bind(partnership.id.into_inner())
        .bind(partnership.campaign_id.into_inner())
        .bind(partnership.athlete_id.into_inner())
        .bind(&partnership.athlete_preferred_alias)
        .bind(&partnership.generated_sub_code)
        .bind(partnership.status.as_str())
        .bind(&partnership.rejection_reason)
        .bind(partnership.reviewed_by.map(Snowflake::into_inner))
        .bind(partnership.reviewed_at)
        .bind(partnership.created_at)
        .bind(partnership.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, |constraint| match constraint {
                PARTNERSHIPS_OPEN_KEY => Some(DomainError::AlreadyApplied),
                PARTNERSHIPS_SUB_CODE_KEY => Some(DomainError::SubCodeTaken(
                    partnership.generated_sub_code.clone().unwrap_or_default(),
                )),
                _ => None,
            })
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn assign_sub_code(&self, id: Snowflake, code: &str, reviewer: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE affiliate_partnerships
            SET generated_sub_code = $2, status = 'approved', reviewed_by = $3,
                reviewed_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            ",
        )
        .bind(id.into_inner())
        .bind(code)
        .bind(reviewer.into_inner())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, |constraint| {
                (constraint == PARTNERSHIPS_SUB_CODE_KEY)
                    .then(|| DomainError::SubCodeTaken(code.to_string()))
            })
        })?;

        if result.rows_affected() == 0 {
            return Err(self.not_pending_error(id).await);
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn reject(&self, id: Snowflake, reason: Option<&str>, reviewer: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE affiliate_partnerships
            SET status = 'rejected', rejection_reason = $2, reviewed_by = $3,
                reviewed_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            ",
        )
        .bind(id.into_inner())
        .bind(reason)
        .bind(reviewer.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(self.not_pending_error(id).await);
        }

        Ok(())
    }
}
