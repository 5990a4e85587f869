//! # bridged-core
//!
//! Domain layer containing entities, value objects, affiliate code rules and
//! repository traits. This crate has zero dependencies on infrastructure
//! (database, web framework, etc.).

pub mod codes;
pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use codes::{
    base_sub_code, company_short, normalize_code, suggestion_base, MAX_AFFILIATE_CODE_LEN,
};
pub use entities::{AffiliateCampaign, AffiliatePartnership, PartnershipStatus, User};
pub use error::DomainError;
pub use traits::{CampaignRepository, PartnershipRepository, RepoResult, UserRepository};
pub use value_objects::{Snowflake, SnowflakeGenerator, SnowflakeParseError, UserRole};
