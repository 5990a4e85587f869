//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use bridged_core::entities::User;
use bridged_core::error::DomainError;
use bridged_core::traits::{RepoResult, UserRepository};
use bridged_core::value_objects::Snowflake;

use crate::models::UserModel;

use super::error::{map_db_error, map_unique_violation, USERS_AFFILIATE_CODE_KEY, USERS_EMAIL_KEY};

const USER_COLUMNS: &str =
    "id, email, full_name, role, affiliate_code_suggestion, created_at, updated_at";

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_user_conflict(e: sqlx::Error, code: Option<&str>) -> DomainError {
    map_unique_violation(e, |constraint| match constraint {
        USERS_EMAIL_KEY => Some(DomainError::EmailAlreadyExists),
        USERS_AFFILIATE_CODE_KEY => Some(DomainError::AffiliateCodeTaken {
            code: code.unwrap_or_default().to_string(),
            suggestions: Vec::new(),
        }),
        _ => None,
    })
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(User::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE LOWER(email) = LOWER($1)"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(User::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_affiliate_code(&self, code: &str) -> RepoResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserModel>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE affiliate_code_suggestion = $1"
        ))
        .bind(code)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(User::try_from).collect()
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn create(&self, user: &User) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO users (id, email, full_name, role, affiliate_code_suggestion, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(user.id.into_inner())
        .bind(&user.email)
        .bind(&user.full_name)
        .bind(user.role.as_str())
        .bind(&user.affiliate_code_suggestion)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_user_conflict(e, user.affiliate_code_suggestion.as_deref()))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_affiliate_code(&self, id: Snowflake, code: Option<&str>) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET affiliate_code_suggestion = $2, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .bind(code)
        .execute(&self.pool)
        .await
        .map_err(|e| map_user_conflict(e, code))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::UserNotFound(id));
        }

        Ok(())
    }
}
