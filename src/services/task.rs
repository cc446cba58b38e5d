//! Task service

use crate::storage::database::entities::task;
use crate::storage::database::{Database, TaskUpdate};
use crate::utils::error::{ApiError, Result};
use crate::utils::validation::DataValidator;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Task service
#[derive(Clone)]
pub struct TaskService {
    db: Arc<Database>,
}

impl TaskService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// List tasks in a project
    pub async fn list(&self, project_id: Uuid) -> Result<Vec<task::Model>> {
        if self.db.find_project_by_id(project_id).await?.is_none() {
            return Err(ApiError::ProjectNotFound);
        }
        self.db.list_tasks(project_id).await
    }

    /// Fetch one task
    pub async fn get(&self, task_id: Uuid) -> Result<task::Model> {
        self.db
            .find_task_by_id(task_id)
            .await?
            .ok_or(ApiError::TaskNotFound)
    }

    /// Create a task in a project
    ///
    /// Without an explicit status the task lands in the project's first
    /// status column.
    pub async fn create(
        &self,
        project_id: Uuid,
        title: &str,
        description: Option<&str>,
        status: Option<&str>,
        due_date: Option<chrono::DateTime<chrono::Utc>>,
        assignees: Option<Vec<Uuid>>,
    ) -> Result<task::Model> {
        DataValidator::validate_title(title)?;
        if let Some(description) = description {
            DataValidator::validate_content(description)?;
        }

        let project = self
            .db
            .find_project_by_id(project_id)
            .await?
            .ok_or(ApiError::ProjectNotFound)?;

        let status = match status {
            Some(status) => status.to_string(),
            None => project
                .statuses
                .as_array()
                .and_then(|s| s.first())
                .and_then(|s| s.as_str())
                .unwrap_or("Backlog")
                .to_string(),
        };

        let assignees = serde_json::json!(assignees.unwrap_or_default());
        let task = self
            .db
            .create_task(project_id, title, description, &status, due_date, assignees)
            .await?;
        info!("Task created: {} ({})", task.title, task.id);
        Ok(task)
    }

    /// Apply a partial update to a task
    pub async fn update(&self, task_id: Uuid, changes: TaskUpdate) -> Result<task::Model> {
        if let Some(title) = &changes.title {
            DataValidator::validate_title(title)?;
        }
        if let Some(Some(description)) = &changes.description {
            DataValidator::validate_content(description)?;
        }
        if let Some(timer) = changes.timer {
            if timer < 0 {
                return Err(ApiError::validation("Timer cannot be negative"));
            }
        }

        self.db.update_task(task_id, changes).await
    }

    /// Delete a task
    pub async fn delete(&self, task_id: Uuid) -> Result<()> {
        self.db.delete_task(task_id).await?;
        info!("Task deleted: {}", task_id);
        Ok(())
    }
}
