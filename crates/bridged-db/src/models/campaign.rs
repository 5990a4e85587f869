//! Affiliate campaign database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for affiliate_campaigns table
#[derive(Debug, Clone, FromRow)]
pub struct CampaignModel {
    pub id: i64,
    pub company_id: i64,
    pub name: String,
    pub main_affiliate_code: String,
    pub description: Option<String>,
    pub commission_rate_percent: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
