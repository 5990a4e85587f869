//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use bridged_core::{UserRole, MAX_AFFILIATE_CODE_LEN};
use serde::Deserialize;
use validator::Validate;

/// `MAX_AFFILIATE_CODE_LEN` as the `u64` the `validator` length attribute expects
const MAX_CODE_LEN: u64 = MAX_AFFILIATE_CODE_LEN as u64;

/// Upper bound for `count` on the suggestions endpoint
pub const MAX_SUGGESTION_COUNT: usize = 10;

// ============================================================================
// User Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterUserRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, max = 100, message = "Full name must be 1-100 characters"))]
    pub full_name: String,

    pub role: UserRole,

    /// Personal affiliate code, normalized before it is stored
    #[validate(length(max = MAX_CODE_LEN, message = "Affiliate code must be at most 32 characters"))]
    pub affiliate_code_suggestion: Option<String>,
}

/// Set or clear the caller's personal affiliate code
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateAffiliateCodeRequest {
    /// `null` or empty clears the code
    #[validate(length(max = MAX_CODE_LEN, message = "Affiliate code must be at most 32 characters"))]
    pub code: Option<String>,
}

// ============================================================================
// Affiliate Code Queries
// ============================================================================

/// `GET /affiliate-codes/check?code=`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CodeCheckQuery {
    #[validate(length(max = MAX_CODE_LEN, message = "Affiliate code must be at most 32 characters"))]
    pub code: Option<String>,
}

/// `GET /affiliate-codes/suggestions?base=&count=`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CodeSuggestionsQuery {
    #[validate(length(min = 1, max = MAX_CODE_LEN, message = "Base code must be 1-32 characters"))]
    pub base: String,

    #[validate(range(min = 1, max = MAX_SUGGESTION_COUNT, message = "Count must be between 1 and 10"))]
    pub count: Option<usize>,
}

// ============================================================================
// Campaign Requests
// ============================================================================

/// Create campaign request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCampaignRequest {
    #[validate(length(min = 1, max = 100, message = "Campaign name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 32, message = "Main affiliate code must be 1-32 characters"))]
    pub main_affiliate_code: String,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,

    #[serde(default)]
    #[validate(range(min = 0, max = 100, message = "Commission must be 0-100 percent"))]
    pub commission_rate_percent: i32,
}

/// Open or close a campaign
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCampaignRequest {
    pub is_active: bool,
}

// ============================================================================
// Partnership Requests
// ============================================================================

/// Apply to a campaign
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePartnershipRequest {
    #[validate(length(min = 1, max = 32, message = "Preferred alias must be 1-32 characters"))]
    pub preferred_alias: String,
}

/// Reject a pending application
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RejectPartnershipRequest {
    #[validate(length(max = 500, message = "Reason must be at most 500 characters"))]
    pub reason: Option<String>,
}
