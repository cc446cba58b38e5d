//! Tag service
//!
//! Tags belong to a project and may be assigned to tasks of that same
//! project.

use crate::storage::database::Database;
use crate::storage::database::entities::tag;
use crate::utils::error::{ApiError, Result};
use crate::utils::validation::DataValidator;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Tag service
#[derive(Clone)]
pub struct TagService {
    db: Arc<Database>,
}

impl TagService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// List every tag
    pub async fn list_all(&self) -> Result<Vec<tag::Model>> {
        self.db.list_tags().await
    }

    /// List tags in a project
    pub async fn list_by_project(&self, project_id: Uuid) -> Result<Vec<tag::Model>> {
        if self.db.find_project_by_id(project_id).await?.is_none() {
            return Err(ApiError::ProjectNotFound);
        }
        self.db.list_tags_by_project(project_id).await
    }

    /// List tags assigned to a task
    pub async fn list_by_task(&self, task_id: Uuid) -> Result<Vec<tag::Model>> {
        if self.db.find_task_by_id(task_id).await?.is_none() {
            return Err(ApiError::TaskNotFound);
        }
        self.db.list_tags_for_task(task_id).await
    }

    /// Fetch one tag
    pub async fn get(&self, tag_id: Uuid) -> Result<tag::Model> {
        self.db
            .find_tag_by_id(tag_id)
            .await?
            .ok_or(ApiError::TagNotFound)
    }

    /// Create a tag in a project
    pub async fn create(&self, project_id: Uuid, title: &str, color: &str) -> Result<tag::Model> {
        DataValidator::validate_title(title)?;
        DataValidator::validate_color(color)?;

        if self.db.find_project_by_id(project_id).await?.is_none() {
            return Err(ApiError::ProjectNotFound);
        }

        let tag = self.db.create_tag(project_id, title, color).await?;
        info!("Tag created: {} ({})", tag.title, tag.id);
        Ok(tag)
    }

    /// Update tag fields
    pub async fn update(
        &self,
        tag_id: Uuid,
        title: Option<&str>,
        color: Option<&str>,
    ) -> Result<tag::Model> {
        if let Some(title) = title {
            DataValidator::validate_title(title)?;
        }
        if let Some(color) = color {
            DataValidator::validate_color(color)?;
        }

        self.db.update_tag(tag_id, title, color).await
    }

    /// Delete a tag
    pub async fn delete(&self, tag_id: Uuid) -> Result<()> {
        self.db.delete_tag(tag_id).await?;
        info!("Tag deleted: {}", tag_id);
        Ok(())
    }

    /// Assign a tag to a task
    pub async fn assign(&self, tag_id: Uuid, task_id: Uuid) -> Result<()> {
        let tag = self.get(tag_id).await?;
        let task = self
            .db
            .find_task_by_id(task_id)
            .await?
            .ok_or(ApiError::TaskNotFound)?;

        if tag.project_id != task.project_id {
            return Err(ApiError::validation(
                "Tag and task belong to different projects",
            ));
        }

        if self.db.is_tag_assigned(tag_id, task_id).await? {
            return Err(ApiError::TagAlreadyAssigned);
        }

        self.db.assign_tag_to_task(tag_id, task_id).await?;
        info!("Tag {} assigned to task {}", tag_id, task_id);
        Ok(())
    }

    /// Remove a tag assignment from a task
    pub async fn unassign(&self, tag_id: Uuid, task_id: Uuid) -> Result<()> {
        self.get(tag_id).await?;
        if self.db.find_task_by_id(task_id).await?.is_none() {
            return Err(ApiError::TaskNotFound);
        }

        self.db.unassign_tag_from_task(tag_id, task_id).await?;
        info!("Tag {} unassigned from task {}", tag_id, task_id);
        Ok(())
    }
}
