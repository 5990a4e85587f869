//! User service
//!
//! Registration and personal affiliate codes. Personal codes live in their
//! own namespace, separate from partnership sub-codes.

use bridged_core::codes::normalize_code;
use bridged_core::entities::User;
use bridged_core::{DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::{
    PublicUserResponse, RegisterResponse, RegisterUserRequest, UpdateAffiliateCodeRequest,
    UserResponse,
};

use super::actor::Actor;
use super::affiliate_code::{AffiliateCodeService, DEFAULT_SUGGESTION_COUNT};
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register an athlete or company account
    ///
    /// Admin accounts are provisioned out of band.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: RegisterUserRequest) -> ServiceResult<RegisterResponse> {
        if request.role.is_admin() {
            return Err(ServiceError::permission_denied("admin accounts cannot self-register"));
        }

        let email = request.email.trim().to_lowercase();
        if self.ctx.user_repo().find_by_email(&email).await?.is_some() {
            return Err(DomainError::EmailAlreadyExists.into());
        }

        let code = match request.affiliate_code_suggestion.as_deref() {
            Some(raw) if !raw.is_empty() => Some(self.claimable_code(raw).await?),
            _ => None,
        };

        let mut user = User::new(
            self.ctx.generate_id(),
            email,
            request.full_name.trim().to_string(),
            request.role,
        );
        user.affiliate_code_suggestion = code;

        if let Err(e) = self.ctx.user_repo().create(&user).await {
            return Err(self.with_suggestions(e).await);
        }

        let access_token = self
            .ctx
            .jwt_service()
            .generate_access_token(user.id, user.role)?;

        info!(user_id = %user.id, role = %user.role, "User registered");

        Ok(RegisterResponse::new(
            UserResponse::from(&user),
            access_token,
            self.ctx.jwt_service().access_token_expiry(),
        ))
    }

    /// Get user by ID (public profile)
    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: Snowflake) -> ServiceResult<PublicUserResponse> {
        let user = self.load(user_id).await?;
        Ok(PublicUserResponse::from(&user))
    }

    /// Get the calling user's full profile
    #[instrument(skip(self))]
    pub async fn get_current_user(&self, actor: Actor) -> ServiceResult<UserResponse> {
        let user = self.load(actor.user_id).await?;
        Ok(UserResponse::from(&user))
    }

    /// Set or clear the caller's personal affiliate code
    #[instrument(skip(self, request))]
    pub async fn update_affiliate_code(
        &self,
        actor: Actor,
        request: UpdateAffiliateCodeRequest,
    ) -> ServiceResult<UserResponse> {
        let mut user = self.load(actor.user_id).await?;

        let code = match request.code.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) if user.affiliate_code_suggestion.as_deref() == Some(normalize_code(raw).as_str()) => {
                return Ok(UserResponse::from(&user));
            }
            Some(raw) => Some(self.claimable_code(raw).await?),
        };

        if let Err(e) = self
            .ctx
            .user_repo()
            .update_affiliate_code(user.id, code.as_deref())
            .await
        {
            return Err(self.with_suggestions(e).await);
        }
        user.affiliate_code_suggestion = code;

        info!(
            user_id = %user.id,
            code = user.affiliate_code_suggestion.as_deref().unwrap_or_default(),
            "Affiliate code updated"
        );

        Ok(UserResponse::from(&user))
    }

    /// Normalize `raw` and make sure nobody holds it yet
    async fn claimable_code(&self, raw: &str) -> ServiceResult<String> {
        let code = normalize_code(raw);
        if code.is_empty() {
            return Err(DomainError::InvalidAffiliateCode(raw.to_string()).into());
        }

        let codes = AffiliateCodeService::new(self.ctx);
        if codes.is_preferred_code_unique(Some(&code)).await? {
            return Ok(code);
        }

        let suggestions = codes
            .suggest_alternative_codes(&code, DEFAULT_SUGGESTION_COUNT)
            .await?;
        Err(DomainError::AffiliateCodeTaken { code, suggestions }.into())
    }

    /// Attach suggestions to a code conflict the store detected
    async fn with_suggestions(&self, err: DomainError) -> ServiceError {
        match err {
            DomainError::AffiliateCodeTaken { code, .. } => {
                let suggestions = AffiliateCodeService::new(self.ctx)
                    .suggest_alternative_codes(&code, DEFAULT_SUGGESTION_COUNT)
                    .await
                    .unwrap_or_default();
                DomainError::AffiliateCodeTaken { code, suggestions }.into()
            }
            other => other.into(),
        }
    }

    async fn load(&self, user_id: Snowflake) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(user_id).into())
    }
}
