use crate::auth::roles::SystemRole;
use crate::utils::error::{ApiError, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::debug;
use uuid::Uuid;

use super::super::entities::{self, user};
use super::types::Database;

impl Database {
    /// Find user by ID
    pub async fn find_user_by_id(&self, user_id: Uuid) -> Result<Option<user::Model>> {
        debug!("Finding user by ID: {}", user_id);

        let user = entities::User::find_by_id(user_id).one(&self.db).await?;
        Ok(user)
    }

    /// Find user by username
    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<user::Model>> {
        debug!("Finding user by username: {}", username);

        let user = entities::User::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?;
        Ok(user)
    }

    /// Find user by email
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<user::Model>> {
        debug!("Finding user by email: {}", email);

        let user = entities::User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;
        Ok(user)
    }

    /// List all users ordered by username
    pub async fn list_users(&self) -> Result<Vec<user::Model>> {
        let users = entities::User::find()
            .order_by_asc(user::Column::Username)
            .all(&self.db)
            .await?;
        Ok(users)
    }

    /// Create a new user
    pub async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
        full_name: Option<&str>,
        role: SystemRole,
    ) -> Result<user::Model> {
        debug!("Creating user: {}", username);

        let now = chrono::Utc::now();
        let active_model = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(username.to_string()),
            email: Set(email.to_string()),
            password_hash: Set(password_hash.to_string()),
            full_name: Set(full_name.map(str::to_string)),
            avatar: Set(None),
            role: Set(role.as_str().to_string()),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let user = active_model.insert(&self.db).await?;
        Ok(user)
    }

    /// Update user profile fields
    ///
    /// Only the provided fields change; omitted ones keep their value.
    pub async fn update_user_profile(
        &self,
        user_id: Uuid,
        full_name: Option<&str>,
        avatar: Option<&str>,
    ) -> Result<user::Model> {
        debug!("Updating profile for user: {}", user_id);

        let mut user: user::ActiveModel = entities::User::find_by_id(user_id)
            .one(&self.db)
            .await?
            .ok_or(ApiError::UserNotFound)?
            .into();

        if let Some(full_name) = full_name {
            user.full_name = Set(Some(full_name.to_string()));
        }
        if let Some(avatar) = avatar {
            user.avatar = Set(Some(avatar.to_string()));
        }
        user.updated_at = Set(chrono::Utc::now().into());

        let user = user.update(&self.db).await?;
        Ok(user)
    }

    /// Update user password
    pub async fn update_user_password(&self, user_id: Uuid, password_hash: &str) -> Result<()> {
        debug!("Updating password for user: {}", user_id);

        let mut user: user::ActiveModel = entities::User::find_by_id(user_id)
            .one(&self.db)
            .await?
            .ok_or(ApiError::UserNotFound)?
            .into();

        user.password_hash = Set(password_hash.to_string());
        user.updated_at = Set(chrono::Utc::now().into());

        user.update(&self.db).await?;
        Ok(())
    }

    /// Delete a user
    pub async fn delete_user(&self, user_id: Uuid) -> Result<()> {
        debug!("Deleting user: {}", user_id);

        let result = entities::User::delete_by_id(user_id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(ApiError::UserNotFound);
        }
        Ok(())
    }
}
