use crate::utils::error::{ApiError, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::debug;
use uuid::Uuid;

use super::super::entities::{self, project};
use super::types::Database;

impl Database {
    /// List projects in a workspace
    pub async fn list_projects(&self, workspace_id: Uuid) -> Result<Vec<project::Model>> {
        debug!("Listing projects in workspace: {}", workspace_id);

        let projects = entities::Project::find()
            .filter(project::Column::WorkspaceId.eq(workspace_id))
            .order_by_asc(project::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(projects)
    }

    /// Find project by ID
    pub async fn find_project_by_id(&self, project_id: Uuid) -> Result<Option<project::Model>> {
        let project = entities::Project::find_by_id(project_id).one(&self.db).await?;
        Ok(project)
    }

    /// Create a project in a workspace
    pub async fn create_project(
        &self,
        workspace_id: Uuid,
        title: &str,
        icon: &str,
        statuses: serde_json::Value,
    ) -> Result<project::Model> {
        debug!("Creating project '{}' in workspace {}", title, workspace_id);

        let now = chrono::Utc::now();
        let project = project::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(title.to_string()),
            icon: Set(icon.to_string()),
            statuses: Set(statuses),
            workspace_id: Set(workspace_id),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&self.db)
        .await?;

        Ok(project)
    }

    /// Update project fields
    pub async fn update_project(
        &self,
        project_id: Uuid,
        title: Option<&str>,
        icon: Option<&str>,
        statuses: Option<serde_json::Value>,
    ) -> Result<project::Model> {
        debug!("Updating project: {}", project_id);

        let mut project: project::ActiveModel = entities::Project::find_by_id(project_id)
            .one(&self.db)
            .await?
            .ok_or(ApiError::ProjectNotFound)?
            .into();

        if let Some(title) = title {
            project.title = Set(title.to_string());
        }
        if let Some(icon) = icon {
            project.icon = Set(icon.to_string());
        }
        if let Some(statuses) = statuses {
            project.statuses = Set(statuses);
        }
        project.updated_at = Set(chrono::Utc::now().into());

        let project = project.update(&self.db).await?;
        Ok(project)
    }

    /// Delete a project (cascades to tasks and tags)
    pub async fn delete_project(&self, project_id: Uuid) -> Result<()> {
        debug!("Deleting project: {}", project_id);

        let result = entities::Project::delete_by_id(project_id)
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(ApiError::ProjectNotFound);
        }
        Ok(())
    }
}
