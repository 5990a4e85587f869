//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use bridged_core::{PartnershipStatus, UserRole};
use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// User Responses
// ============================================================================

/// Full user view, returned to the user themselves
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affiliate_code_suggestion: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// User view for other callers (no email)
#[derive(Debug, Clone, Serialize)]
pub struct PublicUserResponse {
    pub id: String,
    pub full_name: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affiliate_code_suggestion: Option<String>,
}

/// Registration result with an access token for the new account
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl RegisterResponse {
    pub fn new(user: UserResponse, access_token: String, expires_in: i64) -> Self {
        Self {
            user,
            access_token,
            token_type: "Bearer".to_string(),
            expires_in,
        }
    }
}

// ============================================================================
// Affiliate Code Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CodeAvailabilityResponse {
    /// Code as submitted
    pub code: String,
    pub normalized: String,
    pub available: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CodeSuggestionsResponse {
    /// Normalized base the suggestions were derived from
    pub base: String,
    pub suggestions: Vec<String>,
}

// ============================================================================
// Campaign Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CampaignResponse {
    pub id: String,
    pub company_id: String,
    pub name: String,
    pub main_affiliate_code: String,
    /// Prefix shared by every athlete sub-code of this campaign
    pub company_short: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub commission_rate_percent: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Partnership Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct PartnershipResponse {
    pub id: String,
    pub campaign_id: String,
    pub athlete_id: String,
    pub athlete_preferred_alias: String,
    /// `null` until approved
    pub generated_sub_code: Option<String>,
    pub status: PartnershipStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Health Check Responses
// ============================================================================

/// Liveness response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
