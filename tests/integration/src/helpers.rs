//! Test helpers for integration tests
//!
//! Spawning servers, issuing requests, and seeding accounts that cannot be
//! created over the API.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use bridged_api::{create_app, create_app_state};
use bridged_common::{AppConfig, JwtService};
use bridged_core::traits::UserRepository;
use bridged_core::{Snowflake, SnowflakeGenerator, User, UserRole};
use bridged_db::{create_pool, DatabaseConfig, PgUserRepository};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::fixtures::unique_suffix;

const TEST_JWT_SECRET: &str = "integration-test-secret-long-enough";

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    config: AppConfig,
    _handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Result<Self> {
        Self::start_with_config(test_config()?).await
    }

    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let state = create_app_state(config.clone()).await?;
        let app = create_app(state)?;

        let listener = TcpListener::bind(("127.0.0.1", 0)).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        // Give the accept loop a moment to start
        tokio::time::sleep(Duration::from_millis(50)).await;

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            config,
            _handle: handle,
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    fn authed(builder: RequestBuilder, token: &str) -> RequestBuilder {
        builder.header("Authorization", format!("Bearer {token}"))
    }

    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(Self::authed(self.client.get(self.url(path)), token).send().await?)
    }

    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    pub async fn post_auth<T: Serialize>(&self, path: &str, token: &str, body: &T) -> Result<Response> {
        Ok(Self::authed(self.client.post(self.url(path)), token)
            .json(body)
            .send()
            .await?)
    }

    /// POST with no body at all
    pub async fn post_empty_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(Self::authed(self.client.post(self.url(path)), token).send().await?)
    }

    pub async fn patch_auth<T: Serialize>(&self, path: &str, token: &str, body: &T) -> Result<Response> {
        Ok(Self::authed(self.client.patch(self.url(path)), token)
            .json(body)
            .send()
            .await?)
    }

    pub async fn put_auth<T: Serialize>(&self, path: &str, token: &str, body: &T) -> Result<Response> {
        Ok(Self::authed(self.client.put(self.url(path)), token)
            .json(body)
            .send()
            .await?)
    }

    /// Insert an admin directly and mint a token for it
    ///
    /// Admins cannot register through the API.
    pub async fn seed_admin(&self) -> Result<(Snowflake, String)> {
        let db_config = DatabaseConfig {
            url: self.config.database.url.clone(),
            max_connections: 1,
            min_connections: 0,
            ..Default::default()
        };
        let pool = create_pool(&db_config).await?;

        let id = SnowflakeGenerator::new(self.config.snowflake.worker_id).generate();
        let admin = User::new(
            id,
            format!("admin{}@bridged.test", unique_suffix()),
            "Review Admin".to_string(),
            UserRole::Admin,
        );
        PgUserRepository::new(pool).create(&admin).await?;

        let jwt = JwtService::new(&self.config.jwt.secret, self.config.jwt.access_token_expiry);
        let token = jwt.generate_access_token(id, UserRole::Admin)?;
        Ok((id, token))
    }
}

/// Configuration from the environment, with test defaults for everything
/// but `DATABASE_URL`
pub fn test_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    AppConfig::from_lookup(|key| {
        std::env::var(key).ok().or_else(|| {
            let fallback = match key {
                "API_PORT" => "0",
                "JWT_SECRET" => TEST_JWT_SECRET,
                "RATE_LIMIT_BURST" => "1000",
                "MIGRATIONS_DIR" => concat!(env!("CARGO_MANIFEST_DIR"), "/../../crates/bridged-db/migrations"),
                "WORKER_ID" => "900",
                _ => return None,
            };
            Some(fallback.to_string())
        })
    })
    .map_err(|e| anyhow::anyhow!("Config error: {e}"))
}

/// Whether a database is available; tests return early when it is not
pub fn check_test_env() -> bool {
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }
    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(response: Response, expected_status: StatusCode) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}

/// Assert an error response and return its `error` object
pub async fn assert_error(
    response: Response,
    expected_status: StatusCode,
    expected_code: &str,
) -> Result<serde_json::Value> {
    let body: serde_json::Value = assert_json(response, expected_status).await?;
    let error = body["error"].clone();
    anyhow::ensure!(
        error["code"] == expected_code,
        "Expected error code {expected_code}, got {}",
        error["code"]
    );
    Ok(error)
}
