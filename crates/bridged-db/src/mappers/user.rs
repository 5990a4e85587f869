//! User model -> entity mapper

use bridged_core::entities::User;
use bridged_core::error::DomainError;
use bridged_core::value_objects::Snowflake;

use crate::models::UserModel;

use super::corrupt_column;

impl TryFrom<UserModel> for User {
    type Error = DomainError;

    fn try_from(model: UserModel) -> Result<Self, Self::Error> {
        Ok(User {
            id: Snowflake::new(model.id),
            email: model.email,
            full_name: model.full_name,
            role: model
                .role
                .parse()
                .map_err(|e| corrupt_column("users", "role", e))?,
            affiliate_code_suggestion: model.affiliate_code_suggestion,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
