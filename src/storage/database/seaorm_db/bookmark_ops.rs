use crate::utils::error::{ApiError, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::debug;
use uuid::Uuid;

use super::super::entities::{self, bookmark};
use super::types::Database;

impl Database {
    /// List all bookmarks
    pub async fn list_bookmarks(&self) -> Result<Vec<bookmark::Model>> {
        let bookmarks = entities::Bookmark::find()
            .order_by_asc(bookmark::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(bookmarks)
    }

    /// List a user's bookmarks
    pub async fn list_bookmarks_by_user(&self, user_id: Uuid) -> Result<Vec<bookmark::Model>> {
        debug!("Listing bookmarks for user: {}", user_id);

        let bookmarks = entities::Bookmark::find()
            .filter(bookmark::Column::UserId.eq(user_id))
            .order_by_asc(bookmark::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(bookmarks)
    }

    /// List bookmarks on a task
    pub async fn list_bookmarks_by_task(&self, task_id: Uuid) -> Result<Vec<bookmark::Model>> {
        debug!("Listing bookmarks on task: {}", task_id);

        let bookmarks = entities::Bookmark::find()
            .filter(bookmark::Column::TaskId.eq(task_id))
            .order_by_asc(bookmark::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(bookmarks)
    }

    /// Find bookmark by ID
    pub async fn find_bookmark_by_id(&self, bookmark_id: Uuid) -> Result<Option<bookmark::Model>> {
        let bookmark = entities::Bookmark::find_by_id(bookmark_id)
            .one(&self.db)
            .await?;
        Ok(bookmark)
    }

    /// Find a user's bookmark on a task, if any
    pub async fn find_bookmark(
        &self,
        user_id: Uuid,
        task_id: Uuid,
    ) -> Result<Option<bookmark::Model>> {
        let bookmark = entities::Bookmark::find()
            .filter(bookmark::Column::UserId.eq(user_id))
            .filter(bookmark::Column::TaskId.eq(task_id))
            .one(&self.db)
            .await?;
        Ok(bookmark)
    }

    /// Create a bookmark
    pub async fn create_bookmark(&self, user_id: Uuid, task_id: Uuid) -> Result<bookmark::Model> {
        debug!("Creating bookmark for user {} on task {}", user_id, task_id);

        let bookmark = bookmark::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            task_id: Set(task_id),
            created_at: Set(chrono::Utc::now().into()),
        }
        .insert(&self.db)
        .await?;

        Ok(bookmark)
    }

    /// Delete a bookmark
    pub async fn delete_bookmark(&self, bookmark_id: Uuid) -> Result<()> {
        debug!("Deleting bookmark: {}", bookmark_id);

        let result = entities::Bookmark::delete_by_id(bookmark_id)
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(ApiError::BookmarkNotFound);
        }
        Ok(())
    }
}
