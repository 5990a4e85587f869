//! Affiliate code service
//!
//! Two separate namespaces are checked here:
//!
//! - **Partnership sub-codes** (`{ALIAS}-{COMPANY}[n]`), unique across every
//!   partnership of every campaign. Checked against
//!   `PartnershipRepository::find_by_sub_code`.
//! - **Personal codes** an athlete picks at signup, unique among users.
//!   Checked against `UserRepository::find_by_affiliate_code`.
//!
//! Both checks are read-only. Sub-code assignment itself is made race-free by
//! `PartnershipRepository::assign_sub_code`; see `PartnershipService::approve`.

use bridged_core::codes::{
    base_sub_code, company_short, normalize_code, numbered_variant, suggestion_base,
    MAX_AFFILIATE_CODE_LEN,
};
use bridged_core::{DomainError, Snowflake};
use rand::Rng;
use tracing::{debug, info, instrument, warn};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Candidates checked per sub-code: the base code plus suffixes 1..=99
pub const MAX_SUB_CODE_ATTEMPTS: u32 = 100;

/// Suggestions offered when a personal code is taken
pub const DEFAULT_SUGGESTION_COUNT: usize = 3;

/// Random suffixes are drawn from `0..RANDOM_SUFFIX_RANGE`, at most
/// `MAX_SUGGESTION_SUFFIX_LEN` digits
const RANDOM_SUFFIX_RANGE: u32 = 1000;

/// Random draws allowed per requested suggestion
const RANDOM_ATTEMPTS_PER_SUGGESTION: usize = 3;

/// Affiliate code service
pub struct AffiliateCodeService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AffiliateCodeService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// First free sub-code among `base`, `base1`, `base2`, ... `base99`
    ///
    /// `campaign_id` is only recorded on the span; sub-codes are global.
    ///
    /// # Errors
    /// - `InvalidAffiliateCode` if the alias or the company prefix is empty
    ///   after normalization
    /// - `SubCodeExhausted` once all 100 candidates are taken
    /// - repository errors, unchanged
    #[instrument(skip(self, campaign_id), fields(campaign_id = %campaign_id))]
    pub async fn generate_unique_sub_code(
        &self,
        main_campaign_code: &str,
        athlete_preferred_alias: &str,
        campaign_id: Snowflake,
    ) -> ServiceResult<String> {
        if normalize_code(athlete_preferred_alias).is_empty() {
            return Err(DomainError::InvalidAffiliateCode(athlete_preferred_alias.to_string()).into());
        }
        if company_short(main_campaign_code).is_empty() {
            return Err(DomainError::InvalidAffiliateCode(main_campaign_code.to_string()).into());
        }

        let base_code = base_sub_code(main_campaign_code, athlete_preferred_alias);

        for suffix in 0..MAX_SUB_CODE_ATTEMPTS {
            let candidate = numbered_variant(&base_code, suffix);
            let holders = self
                .ctx
                .partnership_repo()
                .find_by_sub_code(&candidate)
                .await?;

            if holders.is_empty() {
                info!(sub_code = %candidate, attempts = suffix + 1, "Sub-code generated");
                return Ok(candidate);
            }
            debug!(candidate = %candidate, "Sub-code taken");
        }

        warn!(base_code = %base_code, "Sub-code candidates exhausted");
        Err(DomainError::SubCodeExhausted {
            base_code,
            attempts: MAX_SUB_CODE_ATTEMPTS,
        }
        .into())
    }

    /// Whether no user holds `preferred_code` (after normalization)
    ///
    /// Absent, empty and all-punctuation inputs are never unique and cost no
    /// query.
    #[instrument(skip(self))]
    pub async fn is_preferred_code_unique(&self, preferred_code: Option<&str>) -> ServiceResult<bool> {
        let Some(raw) = preferred_code.filter(|c| !c.is_empty()) else {
            return Ok(false);
        };

        let code = normalize_code(raw);
        if code.is_empty() {
            return Ok(false);
        }

        let holders = self.ctx.user_repo().find_by_affiliate_code(&code).await?;
        Ok(holders.is_empty())
    }

    /// Up to `count` free personal codes derived from `base_code`
    ///
    /// Sequential suffixes `1..=count` come first, then random suffixes below
    /// 1000 fill any gap. The result may be shorter than `count`. Long bases
    /// are cut so every suggestion stays a valid personal code.
    ///
    /// # Errors
    /// `InvalidAffiliateCode` if `base_code` is empty after normalization
    #[instrument(skip(self))]
    pub async fn suggest_alternative_codes(
        &self,
        base_code: &str,
        count: usize,
    ) -> ServiceResult<Vec<String>> {
        let base = suggestion_base(base_code);
        if base.is_empty() {
            return Err(DomainError::InvalidAffiliateCode(base_code.to_string()).into());
        }
        let mut suggestions = Vec::with_capacity(count);

        for suffix in 1..=count {
            let candidate = format!("{base}{suffix}");
            if candidate.len() > MAX_AFFILIATE_CODE_LEN {
                break;
            }
            if self.is_preferred_code_unique(Some(&candidate)).await? {
                suggestions.push(candidate);
            }
        }

        let mut draws = count.saturating_mul(RANDOM_ATTEMPTS_PER_SUGGESTION);
        while suggestions.len() < count && draws > 0 {
            draws -= 1;
            let suffix = rand::thread_rng().gen_range(0..RANDOM_SUFFIX_RANGE);
            let candidate = format!("{base}{suffix}");
            if suggestions.contains(&candidate) {
                continue;
            }
            if self.is_preferred_code_unique(Some(&candidate)).await? {
                suggestions.push(candidate);
            }
        }

        debug!(base = %base, found = suggestions.len(), "Suggested alternative codes");
        Ok(suggestions)
    }
}
