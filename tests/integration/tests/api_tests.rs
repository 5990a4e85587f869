//! API Integration Tests
//!
//! These tests require a running PostgreSQL instance and `DATABASE_URL`.
//! Every other setting has a test default (see `test_config`).
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_error, assert_json, assert_status, check_test_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;
use serde_json::json;

async fn register(server: &TestServer, request: &RegisterRequest) -> RegisterResponse {
    let response = server.post("/api/v1/users", request).await.unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn create_campaign(server: &TestServer, token: &str) -> CampaignResponse {
    let response = server
        .post_auth("/api/v1/campaigns", token, &CreateCampaignRequest::unique())
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn apply(server: &TestServer, campaign_id: &str, token: &str, alias: &str) -> PartnershipResponse {
    let response = server
        .post_auth(
            &format!("/api/v1/campaigns/{campaign_id}/partnerships"),
            token,
            &ApplyRequest::new(alias),
        )
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn approve(server: &TestServer, partnership_id: &str, token: &str) -> reqwest::Response {
    server
        .post_empty_auth(&format!("/api/v1/partnerships/{partnership_id}/approve"), token)
        .await
        .unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert!(response.headers().contains_key("x-request-id"));
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["checks"]["database"], "healthy");
}

// ============================================================================
// User Tests
// ============================================================================

#[tokio::test]
async fn test_register_user() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::athlete();
    let registered = register(&server, &request).await;

    assert_eq!(registered.user.email, request.email);
    assert_eq!(registered.user.role, "athlete");
    assert_eq!(registered.token_type, "Bearer");

    let response = server
        .get_auth("/api/v1/users/@me", &registered.access_token)
        .await
        .unwrap();
    let me: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.id, registered.user.id);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::athlete();
    register(&server, &request).await;

    let response = server.post("/api/v1/users", &request).await.unwrap();
    assert_error(response, StatusCode::CONFLICT, "EMAIL_ALREADY_EXISTS")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_register_admin_forbidden() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .post("/api/v1/users", &RegisterRequest::unique("admin"))
        .await
        .unwrap();
    assert_error(response, StatusCode::FORBIDDEN, "MISSING_PERMISSIONS")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_register_taken_code_offers_suggestions() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let code = unique_tag();
    let first = register(&server, &RegisterRequest::athlete().with_code(&code.to_lowercase())).await;
    assert_eq!(first.user.affiliate_code_suggestion.as_deref(), Some(code.as_str()));

    let response = server
        .post("/api/v1/users", &RegisterRequest::athlete().with_code(&code))
        .await
        .unwrap();
    let error = assert_error(response, StatusCode::CONFLICT, "AFFILIATE_CODE_TAKEN")
        .await
        .unwrap();

    let suggestions = error["details"]["suggestions"].as_array().unwrap();
    assert!(!suggestions.is_empty() && suggestions.len() <= 3);
    for suggestion in suggestions {
        let suggestion = suggestion.as_str().unwrap();
        assert!(suggestion.starts_with(&code));
        assert_ne!(suggestion, code);
    }
}

#[tokio::test]
async fn test_update_affiliate_code() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let holder_code = unique_tag();
    register(&server, &RegisterRequest::athlete().with_code(&holder_code)).await;
    let user = register(&server, &RegisterRequest::athlete()).await;

    let response = server
        .put_auth(
            "/api/v1/users/@me/affiliate-code",
            &user.access_token,
            &json!({ "code": holder_code }),
        )
        .await
        .unwrap();
    assert_error(response, StatusCode::CONFLICT, "AFFILIATE_CODE_TAKEN")
        .await
        .unwrap();

    let fresh = unique_tag();
    let response = server
        .put_auth(
            "/api/v1/users/@me/affiliate-code",
            &user.access_token,
            &json!({ "code": format!("{} fit", fresh.to_lowercase()) }),
        )
        .await
        .unwrap();
    let updated: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.affiliate_code_suggestion, Some(format!("{fresh}FIT")));
}

#[tokio::test]
async fn test_get_user_invalid_id() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = register(&server, &RegisterRequest::athlete()).await;

    let response = server
        .get_auth("/api/v1/users/not-a-snowflake", &user.access_token)
        .await
        .unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "INVALID_PATH_PARAMETER")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_missing_and_invalid_auth() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/v1/users/@me").await.unwrap();
    assert_error(response, StatusCode::UNAUTHORIZED, "MISSING_AUTHORIZATION")
        .await
        .unwrap();

    let response = server.get_auth("/api/v1/users/@me", "not.a.jwt").await.unwrap();
    assert_error(response, StatusCode::UNAUTHORIZED, "INVALID_TOKEN")
        .await
        .unwrap();
}

// ============================================================================
// Affiliate Code Tests
// ============================================================================

#[tokio::test]
async fn test_code_check() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let code = unique_tag();
    register(&server, &RegisterRequest::athlete().with_code(&code)).await;

    let response = server
        .get(&format!("/api/v1/affiliate-codes/check?code={}", code.to_lowercase()))
        .await
        .unwrap();
    let taken: CodeAvailabilityResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(taken.normalized, code);
    assert!(!taken.available);

    let response = server
        .get(&format!("/api/v1/affiliate-codes/check?code={}", unique_tag()))
        .await
        .unwrap();
    let free: CodeAvailabilityResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(free.available);

    // Empty and absent codes are never available
    for path in ["/api/v1/affiliate-codes/check?code=", "/api/v1/affiliate-codes/check"] {
        let response = server.get(path).await.unwrap();
        let body: CodeAvailabilityResponse = assert_json(response, StatusCode::OK).await.unwrap();
        assert!(!body.available);
    }
}

#[tokio::test]
async fn test_code_suggestions() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let base = unique_tag();
    register(&server, &RegisterRequest::athlete().with_code(&format!("{base}1"))).await;

    let response = server
        .get(&format!("/api/v1/affiliate-codes/suggestions?base={}", base.to_lowercase()))
        .await
        .unwrap();
    let body: CodeSuggestionsResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(body.base, base);
    assert!(body.suggestions.len() <= 3);
    assert!(!body.suggestions.contains(&format!("{base}1")));
    assert!(body.suggestions.contains(&format!("{base}2")));

    let response = server
        .get(&format!("/api/v1/affiliate-codes/suggestions?base={base}&count=11"))
        .await
        .unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
        .await
        .unwrap();

    let response = server
        .get("/api/v1/affiliate-codes/suggestions?base=%21%21")
        .await
        .unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "INVALID_AFFILIATE_CODE")
        .await
        .unwrap();
}

// ============================================================================
// Campaign Tests
// ============================================================================

#[tokio::test]
async fn test_create_campaign() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let company = register(&server, &RegisterRequest::company()).await;
    let request = CreateCampaignRequest::unique();

    let response = server
        .post_auth("/api/v1/campaigns", &company.access_token, &request)
        .await
        .unwrap();
    let campaign: CampaignResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(campaign.company_id, company.user.id);
    assert_eq!(campaign.main_affiliate_code, request.main_affiliate_code);
    assert_eq!(campaign.company_short, request.main_affiliate_code.trim_end_matches("-20"));
    assert!(campaign.is_active);

    // Same main code again
    let response = server
        .post_auth("/api/v1/campaigns", &company.access_token, &request)
        .await
        .unwrap();
    assert_error(response, StatusCode::CONFLICT, "CAMPAIGN_CODE_EXISTS")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_athlete_cannot_create_campaign() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let athlete = register(&server, &RegisterRequest::athlete()).await;

    let response = server
        .post_auth("/api/v1/campaigns", &athlete.access_token, &CreateCampaignRequest::unique())
        .await
        .unwrap();
    assert_error(response, StatusCode::FORBIDDEN, "MISSING_PERMISSIONS")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_deactivate_campaign() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let company = register(&server, &RegisterRequest::company()).await;
    let other = register(&server, &RegisterRequest::company()).await;
    let athlete = register(&server, &RegisterRequest::athlete()).await;
    let campaign = create_campaign(&server, &company.access_token).await;
    let path = format!("/api/v1/campaigns/{}", campaign.id);

    let response = server
        .patch_auth(&path, &other.access_token, &json!({ "is_active": false }))
        .await
        .unwrap();
    assert_error(response, StatusCode::FORBIDDEN, "NOT_CAMPAIGN_OWNER")
        .await
        .unwrap();

    let response = server
        .patch_auth(&path, &company.access_token, &json!({ "is_active": false }))
        .await
        .unwrap();
    let updated: CampaignResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!updated.is_active);

    // Inactive campaigns take no applications and drop out of the listing
    let response = server
        .post_auth(
            &format!("{path}/partnerships"),
            &athlete.access_token,
            &ApplyRequest::new("Mike"),
        )
        .await
        .unwrap();
    assert_error(response, StatusCode::CONFLICT, "CAMPAIGN_INACTIVE")
        .await
        .unwrap();

    let response = server
        .get_auth("/api/v1/campaigns", &athlete.access_token)
        .await
        .unwrap();
    let active: Vec<CampaignResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(active.iter().all(|c| c.id != campaign.id));

    let response = server
        .get_auth(
            &format!("/api/v1/campaigns?company_id={}", company.user.id),
            &company.access_token,
        )
        .await
        .unwrap();
    let owned: Vec<CampaignResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(owned.len(), 1);
    assert_eq!(owned[0].id, campaign.id);
}

// ============================================================================
// Partnership Tests
// ============================================================================

#[tokio::test]
async fn test_approval_generates_unique_sub_codes() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, admin_token) = server.seed_admin().await.unwrap();
    let company = register(&server, &RegisterRequest::company()).await;
    let campaign = create_campaign(&server, &company.access_token).await;

    let mut codes = Vec::new();
    for _ in 0..3 {
        let athlete = register(&server, &RegisterRequest::athlete()).await;
        let partnership = apply(&server, &campaign.id, &athlete.access_token, "Mike!!").await;
        assert_eq!(partnership.status, "pending");
        assert!(partnership.generated_sub_code.is_none());

        let response = approve(&server, &partnership.id, &admin_token).await;
        let approved: PartnershipResponse = assert_json(response, StatusCode::OK).await.unwrap();
        assert_eq!(approved.status, "approved");
        codes.push(approved.generated_sub_code.unwrap());
    }

    let base = format!("MIKE-{}", campaign.company_short);
    assert_eq!(codes, vec![base.clone(), format!("{base}1"), format!("{base}2")]);
}

#[tokio::test]
async fn test_second_approval_is_rejected() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, admin_token) = server.seed_admin().await.unwrap();
    let company = register(&server, &RegisterRequest::company()).await;
    let athlete = register(&server, &RegisterRequest::athlete()).await;
    let campaign = create_campaign(&server, &company.access_token).await;
    let partnership = apply(&server, &campaign.id, &athlete.access_token, "natalia fit!").await;

    let response = approve(&server, &partnership.id, &admin_token).await;
    let approved: PartnershipResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(
        approved.generated_sub_code,
        Some(format!("NATALIAFIT-{}", campaign.company_short))
    );

    let response = approve(&server, &partnership.id, &admin_token).await;
    assert_error(response, StatusCode::CONFLICT, "PARTNERSHIP_ALREADY_REVIEWED")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_only_admins_review() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let company = register(&server, &RegisterRequest::company()).await;
    let athlete = register(&server, &RegisterRequest::athlete()).await;
    let campaign = create_campaign(&server, &company.access_token).await;
    let partnership = apply(&server, &campaign.id, &athlete.access_token, "Mike").await;

    for token in [&company.access_token, &athlete.access_token] {
        let response = approve(&server, &partnership.id, token).await;
        assert_error(response, StatusCode::FORBIDDEN, "MISSING_PERMISSIONS")
            .await
            .unwrap();
    }

    let response = server
        .get_auth("/api/v1/partnerships/pending", &company.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_duplicate_application() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let company = register(&server, &RegisterRequest::company()).await;
    let athlete = register(&server, &RegisterRequest::athlete()).await;
    let campaign = create_campaign(&server, &company.access_token).await;
    apply(&server, &campaign.id, &athlete.access_token, "Mike").await;

    let response = server
        .post_auth(
            &format!("/api/v1/campaigns/{}/partnerships", campaign.id),
            &athlete.access_token,
            &ApplyRequest::new("Mikey"),
        )
        .await
        .unwrap();
    assert_error(response, StatusCode::CONFLICT, "ALREADY_APPLIED")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_reject_and_listings() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, admin_token) = server.seed_admin().await.unwrap();
    let company = register(&server, &RegisterRequest::company()).await;
    let athlete = register(&server, &RegisterRequest::athlete()).await;
    let outsider = register(&server, &RegisterRequest::athlete()).await;
    let campaign = create_campaign(&server, &company.access_token).await;
    let first = apply(&server, &campaign.id, &athlete.access_token, "Mike").await;

    let response = server
        .get_auth("/api/v1/partnerships/pending", &admin_token)
        .await
        .unwrap();
    let pending: Vec<PartnershipResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(pending.iter().any(|p| p.id == first.id));

    // Reject with a reason
    let response = server
        .post_auth(
            &format!("/api/v1/partnerships/{}/reject", first.id),
            &admin_token,
            &json!({ "reason": "Audience mismatch" }),
        )
        .await
        .unwrap();
    let rejected: PartnershipResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(rejected.status, "rejected");
    assert_eq!(rejected.rejection_reason.as_deref(), Some("Audience mismatch"));
    assert!(rejected.generated_sub_code.is_none());

    // A rejected application does not block a new one; reject that one bodiless
    let second = apply(&server, &campaign.id, &athlete.access_token, "Mike").await;
    let response = server
        .post_empty_auth(&format!("/api/v1/partnerships/{}/reject", second.id), &admin_token)
        .await
        .unwrap();
    let rejected: PartnershipResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(rejected.rejection_reason.is_none());

    let response = server
        .get_auth("/api/v1/partnerships/@me", &athlete.access_token)
        .await
        .unwrap();
    let mine: Vec<PartnershipResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|p| p.athlete_id == athlete.user.id));

    let response = server
        .get_auth(
            &format!("/api/v1/campaigns/{}/partnerships", campaign.id),
            &company.access_token,
        )
        .await
        .unwrap();
    let listed: Vec<PartnershipResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed.iter().all(|p| p.campaign_id == campaign.id));

    // Outsiders see neither the listing nor the partnership
    let response = server
        .get_auth(
            &format!("/api/v1/campaigns/{}/partnerships", campaign.id),
            &outsider.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .get_auth(&format!("/api/v1/partnerships/{}", first.id), &outsider.access_token)
        .await
        .unwrap();
    assert_error(response, StatusCode::NOT_FOUND, "UNKNOWN_PARTNERSHIP")
        .await
        .unwrap();
}
