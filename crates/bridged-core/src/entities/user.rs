//! User entity - an athlete, company, or administrator account

use chrono::{DateTime, Utc};

use crate::codes::normalize_code;
use crate::value_objects::{Snowflake, UserRole};

/// User account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    /// Personal code the athlete picked at signup, stored normalized
    pub affiliate_code_suggestion: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: Snowflake, email: String, full_name: String, role: UserRole) -> Self {
        let now = Utc::now();
        Self {
            id,
            email,
            full_name,
            role,
            affiliate_code_suggestion: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach a personal affiliate code; empty after normalization means none
    pub fn with_affiliate_code(mut self, code: &str) -> Self {
        let normalized = normalize_code(code);
        self.affiliate_code_suggestion = (!normalized.is_empty()).then_some(normalized);
        self
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
