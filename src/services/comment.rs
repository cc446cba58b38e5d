//! Comment service

use crate::storage::database::Database;
use crate::storage::database::entities::comment;
use crate::utils::error::{ApiError, Result};
use crate::utils::validation::DataValidator;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Comment service
#[derive(Clone)]
pub struct CommentService {
    db: Arc<Database>,
}

impl CommentService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// List comments on a task
    pub async fn list_by_task(&self, task_id: Uuid) -> Result<Vec<comment::Model>> {
        if self.db.find_task_by_id(task_id).await?.is_none() {
            return Err(ApiError::TaskNotFound);
        }
        self.db.list_comments_for_task(task_id).await
    }

    /// Fetch one comment
    pub async fn get(&self, comment_id: Uuid) -> Result<comment::Model> {
        self.db
            .find_comment_by_id(comment_id)
            .await?
            .ok_or(ApiError::CommentNotFound)
    }

    /// Post a comment on a task
    pub async fn create(
        &self,
        task_id: Uuid,
        author_id: Uuid,
        content: &str,
        mentions: Option<Vec<Uuid>>,
    ) -> Result<comment::Model> {
        DataValidator::validate_content(content)?;

        if self.db.find_task_by_id(task_id).await?.is_none() {
            return Err(ApiError::TaskNotFound);
        }

        let mentions = serde_json::json!(mentions.unwrap_or_default());
        let comment = self
            .db
            .create_comment(task_id, author_id, content, mentions)
            .await?;
        info!("Comment {} posted on task {}", comment.id, task_id);
        Ok(comment)
    }

    /// Edit a comment
    pub async fn update(
        &self,
        comment_id: Uuid,
        content: Option<&str>,
        mentions: Option<Vec<Uuid>>,
    ) -> Result<comment::Model> {
        if let Some(content) = content {
            DataValidator::validate_content(content)?;
        }

        self.db
            .update_comment(comment_id, content, mentions.map(|m| serde_json::json!(m)))
            .await
    }

    /// Delete a comment
    pub async fn delete(&self, comment_id: Uuid) -> Result<()> {
        self.db.delete_comment(comment_id).await?;
        info!("Comment deleted: {}", comment_id);
        Ok(())
    }
}
