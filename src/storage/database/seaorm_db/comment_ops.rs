use crate::utils::error::{ApiError, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::debug;
use uuid::Uuid;

use super::super::entities::{self, comment};
use super::types::Database;

impl Database {
    /// List comments on a task, oldest first
    pub async fn list_comments_for_task(&self, task_id: Uuid) -> Result<Vec<comment::Model>> {
        debug!("Listing comments on task: {}", task_id);

        let comments = entities::Comment::find()
            .filter(comment::Column::TaskId.eq(task_id))
            .order_by_asc(comment::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(comments)
    }

    /// Find comment by ID
    pub async fn find_comment_by_id(&self, comment_id: Uuid) -> Result<Option<comment::Model>> {
        let comment = entities::Comment::find_by_id(comment_id).one(&self.db).await?;
        Ok(comment)
    }

    /// Create a comment on a task
    pub async fn create_comment(
        &self,
        task_id: Uuid,
        author_id: Uuid,
        content: &str,
        mentions: serde_json::Value,
    ) -> Result<comment::Model> {
        debug!("Creating comment on task: {}", task_id);

        let now = chrono::Utc::now();
        let comment = comment::ActiveModel {
            id: Set(Uuid::new_v4()),
            content: Set(content.to_string()),
            author_id: Set(author_id),
            task_id: Set(task_id),
            mentions: Set(mentions),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&self.db)
        .await?;

        Ok(comment)
    }

    /// Update a comment's content and mentions
    pub async fn update_comment(
        &self,
        comment_id: Uuid,
        content: Option<&str>,
        mentions: Option<serde_json::Value>,
    ) -> Result<comment::Model> {
        debug!("Updating comment: {}", comment_id);

        let mut comment: comment::ActiveModel = entities::Comment::find_by_id(comment_id)
            .one(&self.db)
            .await?
            .ok_or(ApiError::CommentNotFound)?
            .into();

        if let Some(content) = content {
            comment.content = Set(content.to_string());
        }
        if let Some(mentions) = mentions {
            comment.mentions = Set(mentions);
        }
        comment.updated_at = Set(chrono::Utc::now().into());

        let comment = comment.update(&self.db).await?;
        Ok(comment)
    }

    /// Delete a comment
    pub async fn delete_comment(&self, comment_id: Uuid) -> Result<()> {
        debug!("Deleting comment: {}", comment_id);

        let result = entities::Comment::delete_by_id(comment_id)
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(ApiError::CommentNotFound);
        }
        Ok(())
    }
}
