//! Repository traits (ports)

mod repositories;

pub use repositories::{CampaignRepository, PartnershipRepository, RepoResult, UserRepository};
