//! Service context - dependency container for services
//!
//! Holds the repositories and shared helpers every service borrows.

use std::sync::Arc;

use bridged_common::auth::JwtService;
use bridged_core::traits::{CampaignRepository, PartnershipRepository, UserRepository};
use bridged_core::{Snowflake, SnowflakeGenerator};
use bridged_db::PgPool;

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// The pool is optional so services can run against in-memory repositories;
/// readiness reports unhealthy when it is absent.
#[derive(Clone)]
pub struct ServiceContext {
    pool: Option<PgPool>,

    user_repo: Arc<dyn UserRepository>,
    campaign_repo: Arc<dyn CampaignRepository>,
    partnership_repo: Arc<dyn PartnershipRepository>,

    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    /// Get the PostgreSQL connection pool, if one is attached
    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    /// Round-trip a trivial query through the pool
    pub async fn database_healthy(&self) -> bool {
        match &self.pool {
            Some(pool) => sqlx::query("SELECT 1").execute(pool).await.is_ok(),
            None => false,
        }
    }

    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn campaign_repo(&self) -> &dyn CampaignRepository {
        self.campaign_repo.as_ref()
    }

    pub fn partnership_repo(&self) -> &dyn PartnershipRepository {
        self.partnership_repo.as_ref()
    }

    // === Services ===

    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &self.pool.as_ref().map(|_| "PgPool"))
            .field("repositories", &"...")
            .field("jwt_service", &self.jwt_service)
            .finish()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    campaign_repo: Option<Arc<dyn CampaignRepository>>,
    partnership_repo: Option<Arc<dyn PartnershipRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn campaign_repo(mut self, repo: Arc<dyn CampaignRepository>) -> Self {
        self.campaign_repo = Some(repo);
        self
    }

    pub fn partnership_repo(mut self, repo: Arc<dyn PartnershipRepository>) -> Self {
        self.partnership_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing.
    /// The snowflake generator defaults to worker 0.
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext {
            pool: self.pool,
            user_repo: self
                .user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            campaign_repo: self
                .campaign_repo
                .ok_or_else(|| ServiceError::validation("campaign_repo is required"))?,
            partnership_repo: self
                .partnership_repo
                .ok_or_else(|| ServiceError::validation("partnership_repo is required"))?,
            jwt_service: self
                .jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            snowflake_generator: self.snowflake_generator.unwrap_or_default(),
        })
    }
}
