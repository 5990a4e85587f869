//! Business logic services
//!
//! Each service borrows the shared [`ServiceContext`] for the duration of a
//! request.

pub mod actor;
pub mod affiliate_code;
pub mod campaign;
pub mod context;
pub mod error;
pub mod partnership;
pub mod user;

pub use actor::Actor;
pub use affiliate_code::{AffiliateCodeService, DEFAULT_SUGGESTION_COUNT, MAX_SUB_CODE_ATTEMPTS};
pub use campaign::CampaignService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use partnership::{PartnershipService, MAX_ASSIGNMENT_ROUNDS};
pub use user::UserService;
