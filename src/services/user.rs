//! User service
//!
//! Profile reads and updates. Credential flows (register, login, password)
//! live in the auth module.

use crate::storage::database::Database;
use crate::storage::database::entities::user;
use crate::utils::error::{ApiError, Result};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// User service
#[derive(Clone)]
pub struct UserService {
    db: Arc<Database>,
}

impl UserService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// List all users
    pub async fn list(&self) -> Result<Vec<user::Model>> {
        self.db.list_users().await
    }

    /// Fetch one user
    pub async fn get(&self, user_id: Uuid) -> Result<user::Model> {
        self.db
            .find_user_by_id(user_id)
            .await?
            .ok_or(ApiError::UserNotFound)
    }

    /// Update profile fields
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        full_name: Option<&str>,
        avatar: Option<&str>,
    ) -> Result<user::Model> {
        if let Some(full_name) = full_name {
            if full_name.is_empty() || full_name.len() > 100 {
                return Err(ApiError::validation(
                    "Full name must be between 1 and 100 characters",
                ));
            }
        }

        self.db.update_user_profile(user_id, full_name, avatar).await
    }

    /// Delete a user account
    pub async fn delete(&self, user_id: Uuid) -> Result<()> {
        self.db.delete_user(user_id).await?;
        info!("User deleted: {}", user_id);
        Ok(())
    }
}
