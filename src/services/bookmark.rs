//! Bookmark service
//!
//! A user can bookmark a task at most once.

use crate::storage::database::Database;
use crate::storage::database::entities::bookmark;
use crate::utils::error::{ApiError, Result};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Bookmark service
#[derive(Clone)]
pub struct BookmarkService {
    db: Arc<Database>,
}

impl BookmarkService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// List every bookmark
    pub async fn list_all(&self) -> Result<Vec<bookmark::Model>> {
        self.db.list_bookmarks().await
    }

    /// List a user's bookmarks
    pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<bookmark::Model>> {
        self.db.list_bookmarks_by_user(user_id).await
    }

    /// List bookmarks on a task
    pub async fn list_by_task(&self, task_id: Uuid) -> Result<Vec<bookmark::Model>> {
        if self.db.find_task_by_id(task_id).await?.is_none() {
            return Err(ApiError::TaskNotFound);
        }
        self.db.list_bookmarks_by_task(task_id).await
    }

    /// Fetch one bookmark
    pub async fn get(&self, bookmark_id: Uuid) -> Result<bookmark::Model> {
        self.db
            .find_bookmark_by_id(bookmark_id)
            .await?
            .ok_or(ApiError::BookmarkNotFound)
    }

    /// Fetch a user's bookmark on a task
    pub async fn find(&self, user_id: Uuid, task_id: Uuid) -> Result<bookmark::Model> {
        self.db
            .find_bookmark(user_id, task_id)
            .await?
            .ok_or(ApiError::BookmarkNotFound)
    }

    /// Bookmark a task
    pub async fn create(&self, user_id: Uuid, task_id: Uuid) -> Result<bookmark::Model> {
        if self.db.find_task_by_id(task_id).await?.is_none() {
            return Err(ApiError::TaskNotFound);
        }

        if self.db.find_bookmark(user_id, task_id).await?.is_some() {
            return Err(ApiError::BookmarkAlreadyExists);
        }

        let bookmark = self.db.create_bookmark(user_id, task_id).await?;
        info!("Task {} bookmarked by user {}", task_id, user_id);
        Ok(bookmark)
    }

    /// Delete a bookmark
    pub async fn delete(&self, bookmark_id: Uuid) -> Result<()> {
        self.db.delete_bookmark(bookmark_id).await?;
        info!("Bookmark deleted: {}", bookmark_id);
        Ok(())
    }
}
