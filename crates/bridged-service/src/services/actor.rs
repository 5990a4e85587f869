//! The authenticated caller of a service operation

use bridged_core::{Snowflake, UserRole};

use super::error::{ServiceError, ServiceResult};

/// Who is calling, as established from the access token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: Snowflake,
    pub role: UserRole,
}

impl Actor {
    pub fn new(user_id: Snowflake, role: UserRole) -> Self {
        Self { user_id, role }
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Fail with `PermissionDenied` unless the caller has `role`
    pub fn require_role(&self, role: UserRole) -> ServiceResult<()> {
        if self.role == role {
            Ok(())
        } else {
            Err(ServiceError::permission_denied(format!(
                "{} role required",
                role.as_str().to_uppercase()
            )))
        }
    }

    pub fn require_admin(&self) -> ServiceResult<()> {
        self.require_role(UserRole::Admin)
    }

    /// Admins pass, everyone else must be `owner`
    pub fn require_self_or_admin(&self, owner: Snowflake) -> ServiceResult<()> {
        if self.is_admin() || self.user_id == owner {
            Ok(())
        } else {
            Err(ServiceError::permission_denied("resource owner or ADMIN role required"))
        }
    }
}
