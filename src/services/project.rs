//! Project service

use crate::storage::database::Database;
use crate::storage::database::entities::project;
use crate::utils::error::{ApiError, Result};
use crate::utils::validation::DataValidator;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Status columns given to a project that does not bring its own
const DEFAULT_STATUSES: &[&str] = &["Backlog", "In Progress", "Done"];

/// Project service
#[derive(Clone)]
pub struct ProjectService {
    db: Arc<Database>,
}

impl ProjectService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// List projects in a workspace
    pub async fn list(&self, workspace_id: Uuid) -> Result<Vec<project::Model>> {
        if self.db.find_workspace_by_id(workspace_id).await?.is_none() {
            return Err(ApiError::WorkspaceNotFound);
        }
        self.db.list_projects(workspace_id).await
    }

    /// Fetch one project
    pub async fn get(&self, project_id: Uuid) -> Result<project::Model> {
        self.db
            .find_project_by_id(project_id)
            .await?
            .ok_or(ApiError::ProjectNotFound)
    }

    /// Create a project in a workspace
    pub async fn create(
        &self,
        workspace_id: Uuid,
        title: &str,
        icon: &str,
        statuses: Option<Vec<String>>,
    ) -> Result<project::Model> {
        DataValidator::validate_title(title)?;

        if self.db.find_workspace_by_id(workspace_id).await?.is_none() {
            return Err(ApiError::WorkspaceNotFound);
        }

        let statuses = match statuses {
            Some(statuses) if !statuses.is_empty() => serde_json::json!(statuses),
            _ => serde_json::json!(DEFAULT_STATUSES),
        };

        let project = self
            .db
            .create_project(workspace_id, title, icon, statuses)
            .await?;
        info!("Project created: {} ({})", project.title, project.id);
        Ok(project)
    }

    /// Update project fields
    pub async fn update(
        &self,
        project_id: Uuid,
        title: Option<&str>,
        icon: Option<&str>,
        statuses: Option<Vec<String>>,
    ) -> Result<project::Model> {
        if let Some(title) = title {
            DataValidator::validate_title(title)?;
        }
        if let Some(statuses) = &statuses {
            if statuses.is_empty() {
                return Err(ApiError::validation("A project needs at least one status"));
            }
        }

        self.db
            .update_project(project_id, title, icon, statuses.map(|s| serde_json::json!(s)))
            .await
    }

    /// Delete a project
    pub async fn delete(&self, project_id: Uuid) -> Result<()> {
        self.db.delete_project(project_id).await?;
        info!("Project deleted: {}", project_id);
        Ok(())
    }
}
