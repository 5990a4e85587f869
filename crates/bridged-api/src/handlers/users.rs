//! User handlers
//!
//! Registration, profiles, and the caller's personal affiliate code.

use axum::{
    extract::{Path, State},
    Json,
};
use bridged_service::{
    PublicUserResponse, RegisterResponse, RegisterUserRequest, UpdateAffiliateCodeRequest,
    UserResponse, UserService,
};

use crate::extractors::{AuthUser, UserIdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Register a new user
///
/// POST /users
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterUserRequest>,
) -> ApiResult<Created<RegisterResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.register(request).await?;
    Ok(Created(response))
}

/// GET /users/@me
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.get_current_user(auth.actor()).await?;
    Ok(Json(response))
}

/// Get user by ID (public profile)
///
/// GET /users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(path): Path<UserIdPath>,
) -> ApiResult<Json<PublicUserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.get_user(path.user_id()?).await?;
    Ok(Json(response))
}

/// Set or clear the caller's personal affiliate code
///
/// PUT /users/@me/affiliate-code
///
/// A taken code fails with 409 `AFFILIATE_CODE_TAKEN` and alternatives in
/// `details.suggestions`.
pub async fn update_affiliate_code(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateAffiliateCodeRequest>,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.update_affiliate_code(auth.actor(), request).await?;
    Ok(Json(response))
}
