//! Error handling utilities for repositories

use bridged_core::error::DomainError;
use sqlx::Error as SqlxError;

pub(crate) const USERS_EMAIL_KEY: &str = "users_email_key";
pub(crate) const USERS_AFFILIATE_CODE_KEY: &str = "users_affiliate_code_key";
pub(crate) const CAMPAIGNS_MAIN_CODE_KEY: &str = "affiliate_campaigns_main_code_key";
pub(crate) const PARTNERSHIPS_SUB_CODE_KEY: &str = "affiliate_partnerships_sub_code_key";
pub(crate) const PARTNERSHIPS_OPEN_KEY: &str = "affiliate_partnerships_open_key";

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Map a unique violation to a domain error chosen by the violated index
///
/// `on_unique` receives the constraint name; returning `None` falls back to
/// a plain `DatabaseError`.
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce(&str) -> Option<DomainError>,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            if let Some(mapped) = on_unique(db_err.constraint().unwrap_or_default()) {
                return mapped;
            }
        }
    }
    map_db_error(e)
}
