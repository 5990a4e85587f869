//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    CodeCheckQuery, CodeSuggestionsQuery, CreateCampaignRequest, CreatePartnershipRequest,
    RegisterUserRequest, RejectPartnershipRequest, UpdateAffiliateCodeRequest,
    UpdateCampaignRequest, MAX_SUGGESTION_COUNT,
};

pub use responses::{
    CampaignResponse, CodeAvailabilityResponse, CodeSuggestionsResponse, HealthChecks,
    HealthResponse, PartnershipResponse, PublicUserResponse, ReadinessResponse, RegisterResponse,
    UserResponse,
};
