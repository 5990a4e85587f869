//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, and path IDs.

mod auth;
mod path;
mod validated;

pub use auth::AuthUser;
pub use path::{CampaignIdPath, PartnershipIdPath, UserIdPath};
pub use validated::{OptionalValidatedJson, ValidatedJson, ValidatedQuery};
