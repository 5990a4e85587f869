//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use bridged_core::entities::{AffiliateCampaign, AffiliatePartnership, User};

use super::responses::{CampaignResponse, PartnershipResponse, PublicUserResponse, UserResponse};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            role: user.role,
            affiliate_code_suggestion: user.affiliate_code_suggestion.clone(),
            created_at: user.created_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<&User> for PublicUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            full_name: user.full_name.clone(),
            role: user.role,
            affiliate_code_suggestion: user.affiliate_code_suggestion.clone(),
        }
    }
}

// ============================================================================
// Campaign Mappers
// ============================================================================

impl From<&AffiliateCampaign> for CampaignResponse {
    fn from(campaign: &AffiliateCampaign) -> Self {
        Self {
            id: campaign.id.to_string(),
            company_id: campaign.company_id.to_string(),
            name: campaign.name.clone(),
            main_affiliate_code: campaign.main_affiliate_code.clone(),
            company_short: campaign.company_short(),
            description: campaign.description.clone(),
            commission_rate_percent: campaign.commission_rate_percent,
            is_active: campaign.is_active,
            created_at: campaign.created_at,
        }
    }
}

impl From<AffiliateCampaign> for CampaignResponse {
    fn from(campaign: AffiliateCampaign) -> Self {
        Self::from(&campaign)
    }
}

// ============================================================================
// Partnership Mappers
// ============================================================================

impl From<&AffiliatePartnership> for PartnershipResponse {
    fn from(p: &AffiliatePartnership) -> Self {
        Self {
            id: p.id.to_string(),
            campaign_id: p.campaign_id.to_string(),
            athlete_id: p.athlete_id.to_string(),
            athlete_preferred_alias: p.athlete_preferred_alias.clone(),
            generated_sub_code: p.generated_sub_code.clone(),
            status: p.status,
            rejection_reason: p.rejection_reason.clone(),
            reviewed_by: p.reviewed_by.map(|id| id.to_string()),
            reviewed_at: p.reviewed_at,
            created_at: p.created_at,
        }
    }
}

impl From<AffiliatePartnership> for PartnershipResponse {
    fn from(p: AffiliatePartnership) -> Self {
        Self::from(&p)
    }
}
