//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in bridged-core.

mod campaign;
mod error;
mod partnership;
mod user;

pub use campaign::PgCampaignRepository;
pub use partnership::PgPartnershipRepository;
pub use user::PgUserRepository;
