//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Campaign not found: {0}")]
    CampaignNotFound(Snowflake),

    #[error("Partnership not found: {0}")]
    PartnershipNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Invalid affiliate code: {0}")]
    InvalidAffiliateCode(String),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not campaign owner")]
    NotCampaignOwner,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Affiliate code already taken: {code}")]
    AffiliateCodeTaken {
        code: String,
        suggestions: Vec<String>,
    },

    #[error("Sub-code already assigned: {0}")]
    SubCodeTaken(String),

    #[error("Campaign code already exists: {0}")]
    CampaignCodeExists(String),

    #[error("Already applied to this campaign")]
    AlreadyApplied,

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Unable to generate unique code")]
    SubCodeExhausted { base_code: String, attempts: u32 },

    #[error("Partnership has already been reviewed")]
    PartnershipAlreadyReviewed,

    #[error("Campaign is not accepting applications")]
    CampaignInactive,

    // =========================================================================
    // Infrastructure Errors
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::CampaignNotFound(_) => "UNKNOWN_CAMPAIGN",
            Self::PartnershipNotFound(_) => "UNKNOWN_PARTNERSHIP",

            // Validation
            Self::InvalidAffiliateCode(_) => "INVALID_AFFILIATE_CODE",

            // Authorization
            Self::NotCampaignOwner => "NOT_CAMPAIGN_OWNER",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::AffiliateCodeTaken { .. } => "AFFILIATE_CODE_TAKEN",
            Self::SubCodeTaken(_) => "SUB_CODE_TAKEN",
            Self::CampaignCodeExists(_) => "CAMPAIGN_CODE_EXISTS",
            Self::AlreadyApplied => "ALREADY_APPLIED",

            // Business Rules
            Self::SubCodeExhausted { .. } => "SUB_CODE_EXHAUSTED",
            Self::PartnershipAlreadyReviewed => "PARTNERSHIP_ALREADY_REVIEWED",
            Self::CampaignInactive => "CAMPAIGN_INACTIVE",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_) | Self::CampaignNotFound(_) | Self::PartnershipNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidAffiliateCode(_))
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotCampaignOwner)
    }

    /// Check if this is a conflict error
    ///
    /// Exhaustion and review-state errors are reported as conflicts too: the
    /// request was valid but the current data doesn't allow it.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EmailAlreadyExists
                | Self::AffiliateCodeTaken { .. }
                | Self::SubCodeTaken(_)
                | Self::CampaignCodeExists(_)
                | Self::AlreadyApplied
                | Self::SubCodeExhausted { .. }
                | Self::PartnershipAlreadyReviewed
                | Self::CampaignInactive
        )
    }

    /// Structured details for API error bodies, when the error carries any
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::AffiliateCodeTaken { code, suggestions } => Some(serde_json::json!({
                "code": code,
                "suggestions": suggestions,
            })),
            Self::SubCodeExhausted {
                base_code,
                attempts,
            } => Some(serde_json::json!({
                "base_code": base_code,
                "attempts": attempts,
            })),
            _ => None,
        }
    }
}
