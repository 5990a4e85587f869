//! In-memory repositories for service tests
//!
//! They mirror the constraints the PostgreSQL schema enforces (unique email,
//! unique personal code, unique sub-code, one open application per pair) and
//! record the lookups the generator makes.

use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bridged_common::JwtService;
use bridged_core::entities::{AffiliateCampaign, AffiliatePartnership, PartnershipStatus, User};
use bridged_core::traits::{CampaignRepository, PartnershipRepository, RepoResult, UserRepository};
use bridged_core::{DomainError, Snowflake, UserRole};

use crate::services::{Actor, ServiceContext};

pub(crate) const TEST_SECRET: &str = "test-secret-key-that-is-long-enough";

fn next_id() -> Snowflake {
    static COUNTER: AtomicI64 = AtomicI64::new(1_000);
    Snowflake::new(COUNTER.fetch_add(1, Ordering::SeqCst))
}

// ============================================================================
// Users
// ============================================================================

#[derive(Default)]
pub(crate) struct MemoryUserRepository {
    users: Mutex<Vec<User>>,
    code_lookups: AtomicUsize,
}

impl MemoryUserRepository {
    /// How many times `find_by_affiliate_code` was called
    pub fn code_lookups(&self) -> usize {
        self.code_lookups.load(Ordering::SeqCst)
    }

    fn code_clash(users: &[User], id: Snowflake, code: Option<&str>) -> Option<DomainError> {
        let code = code?;
        users
            .iter()
            .any(|u| u.id != id && u.affiliate_code_suggestion.as_deref() == Some(code))
            .then(|| DomainError::AffiliateCodeTaken {
                code: code.to_string(),
                suggestions: Vec::new(),
            })
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_by_affiliate_code(&self, code: &str) -> RepoResult<Vec<User>> {
        self.code_lookups.fetch_add(1, Ordering::SeqCst);
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .filter(|u| u.affiliate_code_suggestion.as_deref() == Some(code))
            .cloned()
            .collect())
    }

    async fn create(&self, user: &User) -> RepoResult<()> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email.eq_ignore_ascii_case(&user.email)) {
            return Err(DomainError::EmailAlreadyExists);
        }
        if let Some(err) = Self::code_clash(&users, user.id, user.affiliate_code_suggestion.as_deref()) {
            return Err(err);
        }
        users.push(user.clone());
        Ok(())
    }

    async fn update_affiliate_code(&self, id: Snowflake, code: Option<&str>) -> RepoResult<()> {
        let mut users = self.users.lock().unwrap();
        if let Some(err) = Self::code_clash(&users, id, code) {
            return Err(err);
        }
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(DomainError::UserNotFound(id))?;
        user.affiliate_code_suggestion = code.map(str::to_string);
        Ok(())
    }
}

// ============================================================================
// Campaigns
// ============================================================================

#[derive(Default)]
pub(crate) struct MemoryCampaignRepository {
    campaigns: Mutex<Vec<AffiliateCampaign>>,
}

#[async_trait]
impl CampaignRepository for MemoryCampaignRepository {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<AffiliateCampaign>> {
        let campaigns = self.campaigns.lock().unwrap();
        Ok(campaigns.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_main_code(&self, code: &str) -> RepoResult<Option<AffiliateCampaign>> {
        let campaigns = self.campaigns.lock().unwrap();
        Ok(campaigns
            .iter()
            .find(|c| c.main_affiliate_code == code)
            .cloned())
    }

    async fn find_active(&self) -> RepoResult<Vec<AffiliateCampaign>> {
        let campaigns = self.campaigns.lock().unwrap();
        Ok(campaigns.iter().filter(|c| c.is_active).cloned().collect())
    }

    async fn find_by_company(&self, company_id: Snowflake) -> RepoResult<Vec<AffiliateCampaign>> {
        let campaigns = self.campaigns.lock().unwrap();
        Ok(campaigns
            .iter()
            .filter(|c| c.company_id == company_id)
            .cloned()
            .collect())
    }

    async fn create(&self, campaign: &AffiliateCampaign) -> RepoResult<()> {
        let mut campaigns = self.campaigns.lock().unwrap();
        if campaigns
            .iter()
            .any(|c| c.main_affiliate_code == campaign.main_affiliate_code)
        {
            return Err(DomainError::CampaignCodeExists(
                campaign.main_affiliate_code.clone(),
            ));
        }
        campaigns.push(campaign.clone());
        Ok(())
    }

    async fn set_active(&self, id: Snowflake, is_active: bool) -> RepoResult<()> {
        let mut campaigns = self.campaigns.lock().unwrap();
        let campaign = campaigns
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(DomainError::CampaignNotFound(id))?;
        campaign.is_active = is_active;
        Ok(())
    }
}

// ============================================================================
// Partnerships
// ============================================================================

#[derive(Default)]
pub(crate) struct MemoryPartnershipRepository {
    partnerships: Mutex<Vec<AffiliatePartnership>>,
    sub_code_lookups: Mutex<Vec<String>>,
    /// Assignments that lose a simulated race to another reviewer
    races_to_lose: AtomicUsize,
}

impl MemoryPartnershipRepository {
    /// Every candidate passed to `find_by_sub_code`, in order
    pub fn sub_code_lookups(&self) -> Vec<String> {
        self.sub_code_lookups.lock().unwrap().clone()
    }

    /// Store an approved partnership that already holds `code`
    pub fn seed_sub_code(&self, code: &str) {
        let mut holder = AffiliatePartnership::new(next_id(), next_id(), next_id(), "seed".to_string());
        holder.approve(code.to_string(), next_id());
        self.partnerships.lock().unwrap().push(holder);
    }

    /// Make the next `n` assignments find their code grabbed concurrently
    pub fn lose_next_races(&self, n: usize) {
        self.races_to_lose.store(n, Ordering::SeqCst);
    }

    fn take_race(&self) -> bool {
        self.races_to_lose
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }

    fn update_pending<F>(&self, id: Snowflake, apply: F) -> RepoResult<()>
    where
        F: FnOnce(&mut AffiliatePartnership),
    {
        let mut partnerships = self.partnerships.lock().unwrap();
        let partnership = partnerships
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(DomainError::PartnershipNotFound(id))?;
        if !partnership.is_pending() {
            return Err(DomainError::PartnershipAlreadyReviewed);
        }
        apply(partnership);
        Ok(())
    }
}

#[async_trait]
impl PartnershipRepository for MemoryPartnershipRepository {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<AffiliatePartnership>> {
        let partnerships = self.partnerships.lock().unwrap();
        Ok(partnerships.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_sub_code(&self, code: &str) -> RepoResult<Vec<AffiliatePartnership>> {
        self.sub_code_lookups.lock().unwrap().push(code.to_string());
        let partnerships = self.partnerships.lock().unwrap();
        Ok(partnerships
            .iter()
            .filter(|p| p.generated_sub_code.as_deref() == Some(code))
            .cloned()
            .collect())
    }

    async fn find_by_campaign(&self, campaign_id: Snowflake) -> RepoResult<Vec<AffiliatePartnership>> {
        let partnerships = self.partnerships.lock().unwrap();
        Ok(partnerships
            .iter()
            .filter(|p| p.campaign_id == campaign_id)
            .cloned()
            .collect())
    }

    async fn find_by_athlete(&self, athlete_id: Snowflake) -> RepoResult<Vec<AffiliatePartnership>> {
        let partnerships = self.partnerships.lock().unwrap();
        Ok(partnerships
            .iter()
            .filter(|p| p.athlete_id == athlete_id)
            .cloned()
            .collect())
    }

    async fn find_pending(&self) -> RepoResult<Vec<AffiliatePartnership>> {
        let partnerships = self.partnerships.lock().unwrap();
        Ok(partnerships.iter().filter(|p| p.is_pending()).cloned().collect())
    }

    async fn find_open_application(
        &self,
        campaign_id: Snowflake,
        athlete_id: Snowflake,
    ) -> RepoResult<Option<AffiliatePartnership>> {
        let partnerships = self.partnerships.lock().unwrap();
        Ok(partnerships
            .iter()
            .find(|p| {
                p.campaign_id == campaign_id
                    && p.athlete_id == athlete_id
                    && p.status != PartnershipStatus::Rejected
            })
            .cloned())
    }

    async fn create(&self, partnership: &AffiliatePartnership) -> RepoResult<()> {
        let mut partnerships = self.partnerships.lock().unwrap();
        let open = partnerships.iter().any(|p| {
            p.campaign_id == partnership.campaign_id
                && p.athlete_id == partnership.athlete_id
                && p.status != PartnershipStatus::Rejected
        });
        if open {
            return Err(DomainError::AlreadyApplied);
        }
        partnerships.push(partnership.clone());
        Ok(())
    }

    async fn assign_sub_code(&self, id: Snowflake, code: &str, reviewer: Snowflake) -> RepoResult<()> {
        if self.take_race() {
            // Another reviewer stored the same code first
            self.seed_sub_code(code);
            return Err(DomainError::SubCodeTaken(code.to_string()));
        }

        let taken = self
            .partnerships
            .lock()
            .unwrap()
            .iter()
            .any(|p| p.generated_sub_code.as_deref() == Some(code));
        if taken {
            return Err(DomainError::SubCodeTaken(code.to_string()));
        }

        self.update_pending(id, |p| p.approve(code.to_string(), reviewer))
    }

    async fn reject(&self, id: Snowflake, reason: Option<&str>, reviewer: Snowflake) -> RepoResult<()> {
        self.update_pending(id, |p| p.reject(reason.map(str::to_string), reviewer))
    }
}

// ============================================================================
// Store
// ============================================================================

/// One set of in-memory repositories plus helpers to populate them
#[derive(Clone, Default)]
pub(crate) struct TestStore {
    pub users: Arc<MemoryUserRepository>,
    pub campaigns: Arc<MemoryCampaignRepository>,
    pub partnerships: Arc<MemoryPartnershipRepository>,
}

impl TestStore {
    pub fn context(&self) -> ServiceContext {
        ServiceContext::builder()
            .user_repo(self.users.clone())
            .campaign_repo(self.campaigns.clone())
            .partnership_repo(self.partnerships.clone())
            .jwt_service(Arc::new(JwtService::new(TEST_SECRET, 900)))
            .build()
            .unwrap()
    }

    pub async fn add_user(&self, role: UserRole) -> Actor {
        let id = next_id();
        let user = User::new(
            id,
            format!("user{}@example.com", id.into_inner()),
            format!("User {}", id.into_inner()),
            role,
        );
        self.users.create(&user).await.unwrap();
        Actor::new(id, role)
    }

    pub async fn add_user_with_code(&self, code: &str) -> User {
        let id = next_id();
        let user = User::new(
            id,
            format!("user{}@example.com", id.into_inner()),
            format!("User {}", id.into_inner()),
            UserRole::Athlete,
        )
        .with_affiliate_code(code);
        self.users.create(&user).await.unwrap();
        user
    }

    pub async fn add_campaign(&self, company: &Actor, main_code: &str) -> AffiliateCampaign {
        let campaign = AffiliateCampaign::new(next_id(), company.user_id, "Campaign".to_string(), main_code);
        self.campaigns.create(&campaign).await.unwrap();
        campaign
    }
}
