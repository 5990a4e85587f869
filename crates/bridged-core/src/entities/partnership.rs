//! Affiliate partnership entity - one athlete's participation in a campaign

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::value_objects::Snowflake;

/// Review state of a partnership
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PartnershipStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl PartnershipStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for PartnershipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartnershipStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(format!("unknown partnership status: {other}")),
        }
    }
}

/// Affiliate partnership
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffiliatePartnership {
    pub id: Snowflake,
    pub campaign_id: Snowflake,
    pub athlete_id: Snowflake,
    pub athlete_preferred_alias: String,
    /// Assigned once on approval, never regenerated
    pub generated_sub_code: Option<String>,
    pub status: PartnershipStatus,
    pub rejection_reason: Option<String>,
    pub reviewed_by: Option<Snowflake>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AffiliatePartnership {
    /// New pending application without a sub-code
    pub fn new(
        id: Snowflake,
        campaign_id: Snowflake,
        athlete_id: Snowflake,
        athlete_preferred_alias: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            campaign_id,
            athlete_id,
            athlete_preferred_alias,
            generated_sub_code: None,
            status: PartnershipStatus::Pending,
            rejection_reason: None,
            reviewed_by: None,
            reviewed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.status == PartnershipStatus::Pending
    }

    /// Mark approved with the code that was just reserved
    pub fn approve(&mut self, sub_code: String, reviewer: Snowflake) {
        let now = Utc::now();
        self.generated_sub_code = Some(sub_code);
        self.status = PartnershipStatus::Approved;
        self.reviewed_by = Some(reviewer);
        self.reviewed_at = Some(now);
        self.updated_at = now;
    }

    pub fn reject(&mut self, reason: Option<String>, reviewer: Snowflake) {
        let now = Utc::now();
        self.status = PartnershipStatus::Rejected;
        self.rejection_reason = reason;
        self.reviewed_by = Some(reviewer);
        self.reviewed_at = Some(now);
        self.updated_at = now;
    }
}
