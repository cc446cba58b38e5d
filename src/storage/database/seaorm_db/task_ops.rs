use crate::utils::error::{ApiError, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::debug;
use uuid::Uuid;

use super::super::entities::{self, task};
use super::types::Database;

/// Partial task update; `None` fields keep their value
#[derive(Debug, Clone, Default)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<String>,
    pub due_date: Option<Option<chrono::DateTime<chrono::Utc>>>,
    pub timer: Option<i64>,
    pub assignees: Option<serde_json::Value>,
}

impl Database {
    /// List tasks in a project
    pub async fn list_tasks(&self, project_id: Uuid) -> Result<Vec<task::Model>> {
        debug!("Listing tasks in project: {}", project_id);

        let tasks = entities::Task::find()
            .filter(task::Column::ProjectId.eq(project_id))
            .order_by_asc(task::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(tasks)
    }

    /// Find task by ID
    pub async fn find_task_by_id(&self, task_id: Uuid) -> Result<Option<task::Model>> {
        let task = entities::Task::find_by_id(task_id).one(&self.db).await?;
        Ok(task)
    }

    /// Create a task in a project
    pub async fn create_task(
        &self,
        project_id: Uuid,
        title: &str,
        description: Option<&str>,
        status: &str,
        due_date: Option<chrono::DateTime<chrono::Utc>>,
        assignees: serde_json::Value,
    ) -> Result<task::Model> {
        debug!("Creating task '{}' in project {}", title, project_id);

        let now = chrono::Utc::now();
        let task = task::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(title.to_string()),
            description: Set(description.map(str::to_string)),
            status: Set(status.to_string()),
            due_date: Set(due_date.map(Into::into)),
            timer: Set(0),
            assignees: Set(assignees),
            project_id: Set(project_id),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&self.db)
        .await?;

        Ok(task)
    }

    /// Apply a partial update to a task
    pub async fn update_task(&self, task_id: Uuid, changes: TaskUpdate) -> Result<task::Model> {
        debug!("Updating task: {}", task_id);

        let mut task: task::ActiveModel = entities::Task::find_by_id(task_id)
            .one(&self.db)
            .await?
            .ok_or(ApiError::TaskNotFound)?
            .into();

        if let Some(title) = changes.title {
            task.title = Set(title);
        }
        if let Some(description) = changes.description {
            task.description = Set(description);
        }
        if let Some(status) = changes.status {
            task.status = Set(status);
        }
        if let Some(due_date) = changes.due_date {
            task.due_date = Set(due_date.map(Into::into));
        }
        if let Some(timer) = changes.timer {
            task.timer = Set(timer);
        }
        if let Some(assignees) = changes.assignees {
            task.assignees = Set(assignees);
        }
        task.updated_at = Set(chrono::Utc::now().into());

        let task = task.update(&self.db).await?;
        Ok(task)
    }

    /// Delete a task (cascades to comments, bookmarks, tag links)
    pub async fn delete_task(&self, task_id: Uuid) -> Result<()> {
        debug!("Deleting task: {}", task_id);

        let result = entities::Task::delete_by_id(task_id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(ApiError::TaskNotFound);
        }
        Ok(())
    }
}
