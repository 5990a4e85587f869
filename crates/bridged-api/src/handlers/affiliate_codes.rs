//! Affiliate code lookups
//!
//! Public, read-only: availability of a personal code and alternatives to a
//! taken one.

use axum::{extract::State, Json};
use bridged_core::normalize_code;
use bridged_service::{
    AffiliateCodeService, CodeAvailabilityResponse, CodeCheckQuery, CodeSuggestionsQuery,
    CodeSuggestionsResponse, DEFAULT_SUGGESTION_COUNT,
};

use crate::extractors::ValidatedQuery;
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /affiliate-codes/check?code=
pub async fn check_code(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<CodeCheckQuery>,
) -> ApiResult<Json<CodeAvailabilityResponse>> {
    let service = AffiliateCodeService::new(state.service_context());
    let available = service.is_preferred_code_unique(query.code.as_deref()).await?;

    let code = query.code.unwrap_or_default();
    Ok(Json(CodeAvailabilityResponse {
        normalized: normalize_code(&code),
        code,
        available,
    }))
}

/// GET /affiliate-codes/suggestions?base=&count=
pub async fn suggest_codes(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<CodeSuggestionsQuery>,
) -> ApiResult<Json<CodeSuggestionsResponse>> {
    let count = query.count.unwrap_or(DEFAULT_SUGGESTION_COUNT);
    let service = AffiliateCodeService::new(state.service_context());
    let suggestions = service.suggest_alternative_codes(&query.base, count).await?;

    Ok(Json(CodeSuggestionsResponse {
        base: normalize_code(&query.base),
        suggestions,
    }))
}
