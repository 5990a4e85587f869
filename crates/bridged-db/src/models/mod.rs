//! Database models - SQLx-compatible structs for PostgreSQL tables

mod campaign;
mod partnership;
mod user;

pub use campaign::CampaignModel;
pub use partnership::PartnershipModel;
pub use user::UserModel;
