//! Campaign model -> entity mapper

use bridged_core::entities::AffiliateCampaign;
use bridged_core::value_objects::Snowflake;

use crate::models::CampaignModel;

impl From<CampaignModel> for AffiliateCampaign {
    fn from(model: CampaignModel) -> Self {
        AffiliateCampaign {
            id: Snowflake::new(model.id),
            company_id: Snowflake::new(model.company_id),
            name: model.name,
            main_affiliate_code: model.main_affiliate_code,
            description: model.description,
            commission_rate_percent: model.commission_rate_percent,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
