//! Route definitions
//!
//! API routes are mounted under /api/v1; health probes live at the root.

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers::{affiliate_codes, campaigns, health, partnerships, users};
use crate::state::AppState;

/// Create the main API router (health probes excluded)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes, mounted outside rate limiting
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(user_routes())
        .merge(affiliate_code_routes())
        .merge(campaign_routes())
        .merge(partnership_routes())
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(users::register))
        .route("/users/@me", get(users::get_current_user))
        .route("/users/@me/affiliate-code", put(users::update_affiliate_code))
        .route("/users/:user_id", get(users::get_user))
}

fn affiliate_code_routes() -> Router<AppState> {
    Router::new()
        .route("/affiliate-codes/check", get(affiliate_codes::check_code))
        .route("/affiliate-codes/suggestions", get(affiliate_codes::suggest_codes))
}

fn campaign_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/campaigns",
            get(campaigns::list_campaigns).post(campaigns::create_campaign),
        )
        .route(
            "/campaigns/:campaign_id",
            get(campaigns::get_campaign).patch(campaigns::update_campaign),
        )
        .route(
            "/campaigns/:campaign_id/partnerships",
            get(partnerships::list_campaign_partnerships).post(partnerships::apply),
        )
}

fn partnership_routes() -> Router<AppState> {
    Router::new()
        .route("/partnerships/pending", get(partnerships::list_pending))
        .route("/partnerships/@me", get(partnerships::list_my_partnerships))
        .route("/partnerships/:partnership_id", get(partnerships::get_partnership))
        .route("/partnerships/:partnership_id/approve", post(partnerships::approve))
        .route("/partnerships/:partnership_id/reject", post(partnerships::reject))
}
