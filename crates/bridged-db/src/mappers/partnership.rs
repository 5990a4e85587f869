//! Partnership model -> entity mapper

use bridged_core::entities::AffiliatePartnership;
use bridged_core::error::DomainError;
use bridged_core::value_objects::Snowflake;

use crate::models::PartnershipModel;

use super::corrupt_column;

impl TryFrom<PartnershipModel> for AffiliatePartnership {
    type Error = DomainError;

    fn try_from(model: PartnershipModel) -> Result<Self, Self::Error> {
        Ok(AffiliatePartnership {
            id: Snowflake::new(model.id),
            campaign_id: Snowflake::new(model.campaign_id),
            athlete_id: Snowflake::new(model.athlete_id),
            athlete_preferred_alias: model.athlete_preferred_alias,
            generated_sub_code: model.generated_sub_code,
            status: model
                .status
                .parse()
                .map_err(|e| corrupt_column("affiliate_partnerships", "status", e))?,
            rejection_reason: model.rejection_reason,
            reviewed_by: model.reviewed_by.map(Snowflake::new),
            reviewed_at: model.reviewed_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
