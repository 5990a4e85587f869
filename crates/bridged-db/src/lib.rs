//! # bridged-db
//!
//! Database layer implementing the repository traits of `bridged-core` with
//! PostgreSQL via SQLx.
//!
//! - Connection pool management and schema migrations
//! - Row models with SQLx `FromRow` derives
//! - Row → entity mappers
//! - Repository implementations
//!
//! ```rust,ignore
//! use bridged_db::{create_pool, run_migrations, DatabaseConfig, PgPartnershipRepository};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::from_env()).await?;
//!     run_migrations(&pool, "crates/bridged-db/migrations").await?;
//!     let partnerships = PgPartnershipRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{PgCampaignRepository, PgPartnershipRepository, PgUserRepository};
