//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Equality-filter lookups return every match
//! and promise no particular order.

use async_trait::async_trait;

use crate::entities::{AffiliateCampaign, AffiliatePartnership, User};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// All users whose `affiliate_code_suggestion` equals `code`
    async fn find_by_affiliate_code(&self, code: &str) -> RepoResult<Vec<User>>;

    /// Create a new user
    ///
    /// Fails with `EmailAlreadyExists` or `AffiliateCodeTaken` when the
    /// store's unique constraints reject the row.
    async fn create(&self, user: &User) -> RepoResult<()>;

    /// Replace (or clear) the user's personal affiliate code
    async fn update_affiliate_code(&self, id: Snowflake, code: Option<&str>) -> RepoResult<()>;
}

// ============================================================================
// Campaign Repository
// ============================================================================

#[async_trait]
pub trait CampaignRepository: Send + Sync {
    /// Find campaign by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<AffiliateCampaign>>;

    /// Find campaign by its (uppercased) main affiliate code
    async fn find_by_main_code(&self, code: &str) -> RepoResult<Option<AffiliateCampaign>>;

    /// List campaigns currently accepting applications
    async fn find_active(&self) -> RepoResult<Vec<AffiliateCampaign>>;

    /// List campaigns owned by a company
    async fn find_by_company(&self, company_id: Snowflake) -> RepoResult<Vec<AffiliateCampaign>>;

    /// Create a new campaign
    async fn create(&self, campaign: &AffiliateCampaign) -> RepoResult<()>;

    /// Open or close a campaign
    async fn set_active(&self, id: Snowflake, is_active: bool) -> RepoResult<()>;
}

// ============================================================================
// Partnership Repository
// ============================================================================

#[async_trait]
pub trait PartnershipRepository: Send + Sync {
    /// Find partnership by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<AffiliatePartnership>>;

    /// All partnerships whose `generated_sub_code` equals `code`, across every campaign
    async fn find_by_sub_code(&self, code: &str) -> RepoResult<Vec<AffiliatePartnership>>;

    /// List partnerships in a campaign
    async fn find_by_campaign(&self, campaign_id: Snowflake) -> RepoResult<Vec<AffiliatePartnership>>;

    /// List partnerships of an athlete
    async fn find_by_athlete(&self, athlete_id: Snowflake) -> RepoResult<Vec<AffiliatePartnership>>;

    /// List partnerships awaiting review
    async fn find_pending(&self) -> RepoResult<Vec<AffiliatePartnership>>;

    /// The athlete's pending or approved partnership in a campaign, if any
    async fn find_open_application(
        &self,
        campaign_id: Snowflake,
        athlete_id: Snowflake,
    ) -> RepoResult<Option<AffiliatePartnership>>;

    /// Create a new partnership
    async fn create(&self, partnership: &AffiliatePartnership) -> RepoResult<()>;

    /// Atomically approve a pending partnership with `code`
    ///
    /// Fails with `SubCodeTaken` if another partnership already holds the
    /// code, and `PartnershipAlreadyReviewed` if the row is no longer pending.
    async fn assign_sub_code(&self, id: Snowflake, code: &str, reviewer: Snowflake) -> RepoResult<()>;

    /// Reject a pending partnership
    ///
    /// Fails with `PartnershipAlreadyReviewed` if the row is no longer pending.
    async fn reject(&self, id: Snowflake, reason: Option<&str>, reviewer: Snowflake) -> RepoResult<()>;
}
