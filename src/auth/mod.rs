//! Authentication and authorization
//!
//! Credential handling (JWT, passwords), the role model, and the workspace
//! membership resolver.

pub mod jwt;
pub mod membership;
pub mod password;
pub mod roles;

pub use jwt::{Claims, JwtHandler, TokenPair, TokenType};
pub use membership::{
    MembershipResolver, MembershipStore, ResourceDepth, ResourceGraph, ResourceRef,
};
pub use roles::{MemberRole, SystemRole};

use crate::config::AuthConfig;
use crate::storage::database::Database;
use crate::storage::database::entities::user;
use crate::utils::error::{ApiError, Result};
use crate::utils::validation::DataValidator;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Authentication system facade
///
/// Owns the JWT handler and the credential flows (register, login, refresh,
/// password change/reset). Authorization is handled separately by the
/// [`MembershipResolver`].
#[derive(Clone)]
pub struct AuthSystem {
    db: Arc<Database>,
    jwt: JwtHandler,
}

/// Registration input
#[derive(Debug, Clone)]
pub struct RegisterUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
}

impl AuthSystem {
    pub fn new(config: &AuthConfig, db: Arc<Database>) -> Self {
        Self {
            db,
            jwt: JwtHandler::new(config),
        }
    }

    /// Access the JWT handler
    pub fn jwt(&self) -> &JwtHandler {
        &self.jwt
    }

    /// Register a new user
    pub async fn register(&self, input: RegisterUser) -> Result<user::Model> {
        DataValidator::validate_username(&input.username)?;
        DataValidator::validate_email(&input.email)?;
        DataValidator::validate_password(&input.password)?;

        if self
            .db
            .find_user_by_username(&input.username)
            .await?
            .is_some()
        {
            return Err(ApiError::UserAlreadyExists);
        }

        if self.db.find_user_by_email(&input.email).await?.is_some() {
            return Err(ApiError::UserAlreadyExists);
        }

        let password_hash = password::hash_password(&input.password)?;

        let user = self
            .db
            .create_user(
                &input.username,
                &input.email,
                &password_hash,
                input.full_name.as_deref(),
                SystemRole::User,
            )
            .await?;

        info!("Registered user: {}", user.username);
        Ok(user)
    }

    /// Authenticate with username and password, returning the user and a
    /// token pair
    pub async fn login(&self, username: &str, pass: &str) -> Result<(user::Model, TokenPair)> {
        let user = self
            .db
            .find_user_by_username(username)
            .await?
            .ok_or_else(|| ApiError::auth("Invalid username or password"))?;

        if !password::verify_password(pass, &user.password_hash)? {
            return Err(ApiError::auth("Invalid username or password"));
        }

        let role = SystemRole::from_str(&user.role)?;
        let tokens = self.jwt.create_token_pair(user.id, role)?;

        info!("User logged in: {}", user.username);
        Ok((user, tokens))
    }

    /// Exchange a refresh token for a new token pair
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair> {
        let claims = self.jwt.verify_refresh_token(refresh_token)?;

        // Re-read the role in case it changed since the token was issued
        let user = self
            .db
            .find_user_by_id(claims.sub)
            .await?
            .ok_or(ApiError::UserNotFound)?;

        let role = SystemRole::from_str(&user.role)?;
        self.jwt.create_token_pair(user.id, role)
    }

    /// Change a user's password, verifying the current one first
    pub async fn change_password(
        &self,
        user_id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> Result<()> {
        let user = self
            .db
            .find_user_by_id(user_id)
            .await?
            .ok_or(ApiError::UserNotFound)?;

        if !password::verify_password(current_password, &user.password_hash)? {
            return Err(ApiError::auth("Invalid current password"));
        }

        DataValidator::validate_password(new_password)?;

        let new_hash = password::hash_password(new_password)?;
        self.db.update_user_password(user_id, &new_hash).await?;

        info!("Password changed for user: {}", user_id);
        Ok(())
    }

    /// Issue a password reset token for the given email
    ///
    /// Delivery is out of scope; the token is returned to the caller.
    pub async fn request_password_reset(&self, email: &str) -> Result<String> {
        let user = self
            .db
            .find_user_by_email(email)
            .await?
            .ok_or(ApiError::UserNotFound)?;

        let reset_token = password::generate_token(32);
        let expires_at = chrono::Utc::now() + chrono::Duration::hours(1);

        self.db
            .store_password_reset_token(user.id, &reset_token, expires_at)
            .await?;

        info!("Password reset token generated for user: {}", user.id);
        Ok(reset_token)
    }

    /// Reset a password using a previously issued token
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<()> {
        let user_id = self
            .db
            .verify_password_reset_token(token)
            .await?
            .ok_or_else(|| ApiError::auth("Invalid or expired reset token"))?;

        DataValidator::validate_password(new_password)?;

        let password_hash = password::hash_password(new_password)?;
        self.db.update_user_password(user_id, &password_hash).await?;
        self.db.invalidate_password_reset_token(token).await?;

        info!("Password reset for user: {}", user_id);
        Ok(())
    }
}
