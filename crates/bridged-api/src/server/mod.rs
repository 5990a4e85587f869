//! Server setup and initialization
//!
//! Builds the application state and router, then serves it.

use std::sync::Arc;

use axum::Router;
use bridged_common::{AppConfig, AppError, JwtService};
use bridged_core::SnowflakeGenerator;
use bridged_db::{
    create_pool, run_migrations, PgCampaignRepository, PgPartnershipRepository, PgUserRepository,
};
use bridged_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_middleware, apply_probe_middleware};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// # Errors
/// Fails when the rate limit configuration is unusable.
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();
    let worker_id = config.snowflake.worker_id;

    let api = apply_middleware(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
        worker_id,
    )?;
    let probes = apply_probe_middleware(health_routes(), worker_id);

    Ok(api.merge(probes).with_state(state))
}

/// Connect to PostgreSQL, apply migrations, and wire the service context
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let db_config = bridged_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..Default::default()
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        run_migrations(&pool, &config.database.migrations_dir)
            .await
            .map_err(|e| AppError::Database(format!("Migration failed: {e}")))?;
    }

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
    ));

    if config.snowflake.worker_id > 1023 {
        return Err(AppError::Config(format!(
            "WORKER_ID must be below 1024, got {}",
            config.snowflake.worker_id
        )));
    }
    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));

    let service_context = ServiceContextBuilder::new()
        .pool(pool.clone())
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .campaign_repo(Arc::new(PgCampaignRepository::new(pool.clone())))
        .partnership_repo(Arc::new(PgPartnershipRepository::new(pool)))
        .jwt_service(jwt_service)
        .snowflake_generator(snowflake_generator)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Serve `app` on `addr` until the process is stopped
pub async fn run_server(app: Router, addr: &str) -> Result<(), AppError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(anyhow::anyhow!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();

    let state = create_app_state(config).await?;
    let app = create_app(state)?;

    run_server(app, &addr).await
}
