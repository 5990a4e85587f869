//! Path parameter extractors
//!
//! Route parameters arrive as strings and are parsed into Snowflakes here so
//! a malformed ID is a 400 rather than a 404.

use bridged_core::Snowflake;
use serde::Deserialize;

use crate::response::ApiError;

fn parse_id(raw: &str, name: &str) -> Result<Snowflake, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path(format!("Invalid {name} format")))
}

#[derive(Debug, Deserialize)]
pub struct UserIdPath {
    pub user_id: String,
}

impl UserIdPath {
    pub fn user_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.user_id, "user_id")
    }
}

#[derive(Debug, Deserialize)]
pub struct CampaignIdPath {
    pub campaign_id: String,
}

impl CampaignIdPath {
    pub fn campaign_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.campaign_id, "campaign_id")
    }
}

#[derive(Debug, Deserialize)]
pub struct PartnershipIdPath {
    pub partnership_id: String,
}

impl PartnershipIdPath {
    pub fn partnership_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.partnership_id, "partnership_id")
    }
}
