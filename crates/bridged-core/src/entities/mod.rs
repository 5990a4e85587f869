//! Domain entities - core business objects

mod campaign;
mod partnership;
mod user;

pub use campaign::AffiliateCampaign;
pub use partnership::{AffiliatePartnership, PartnershipStatus};
pub use user::User;
