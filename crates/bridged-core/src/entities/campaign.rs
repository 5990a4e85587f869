//! Affiliate campaign entity - a company's affiliate program offering

use chrono::{DateTime, Utc};

use crate::codes::company_short;
use crate::value_objects::Snowflake;

/// Affiliate campaign
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffiliateCampaign {
    pub id: Snowflake,
    pub company_id: Snowflake,
    pub name: String,
    /// Company-chosen code; its prefix namespaces athlete sub-codes
    pub main_affiliate_code: String,
    pub description: Option<String>,
    pub commission_rate_percent: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AffiliateCampaign {
    /// Create an active campaign. The main code is stored trimmed and uppercased.
    pub fn new(id: Snowflake, company_id: Snowflake, name: String, main_affiliate_code: &str) -> Self {
        let now = Utc::now();
        Self {
            id,
            company_id,
            name,
            main_affiliate_code: main_affiliate_code.trim().to_uppercase(),
            description: None,
            commission_rate_percent: 0,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn with_commission(mut self, percent: i32) -> Self {
        self.commission_rate_percent = percent;
        self
    }

    /// Prefix used in every athlete sub-code of this campaign
    pub fn company_short(&self) -> String {
        company_short(&self.main_affiliate_code)
    }

    #[inline]
    pub fn is_owned_by(&self, user_id: Snowflake) -> bool {
        self.company_id == user_id
    }
}
