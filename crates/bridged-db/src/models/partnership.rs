//! Affiliate partnership database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for affiliate_partnerships table
#[derive(Debug, Clone, FromRow)]
pub struct PartnershipModel {
    pub id: i64,
    pub campaign_id: i64,
    pub athlete_id: i64,
    pub athlete_preferred_alias: String,
    pub generated_sub_code: Option<String>,
    pub status: String,
    pub rejection_reason: Option<String>,
    pub reviewed_by: Option<i64>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PartnershipModel {
    /// Whether the row still awaits review
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.status == "pending"
    }
}
