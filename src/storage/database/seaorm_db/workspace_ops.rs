use crate::auth::roles::MemberRole;
use crate::utils::error::{ApiError, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, Set, TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use super::super::entities::{self, workspace, workspace_member};
use super::types::Database;

impl Database {
    /// List all workspaces
    pub async fn list_workspaces(&self) -> Result<Vec<workspace::Model>> {
        let workspaces = entities::Workspace::find()
            .order_by_asc(workspace::Column::Title)
            .all(&self.db)
            .await?;
        Ok(workspaces)
    }

    /// List workspaces the user is a member of
    pub async fn find_workspaces_by_member(&self, user_id: Uuid) -> Result<Vec<workspace::Model>> {
        debug!("Listing workspaces for member: {}", user_id);

        let workspaces = entities::Workspace::find()
            .join(
                JoinType::InnerJoin,
                workspace_member::Relation::Workspace.def().rev(),
            )
            .filter(workspace_member::Column::UserId.eq(user_id))
            .order_by_asc(workspace::Column::Title)
            .all(&self.db)
            .await?;
        Ok(workspaces)
    }

    /// Find workspace by ID
    pub async fn find_workspace_by_id(&self, workspace_id: Uuid) -> Result<Option<workspace::Model>> {
        let workspace = entities::Workspace::find_by_id(workspace_id)
            .one(&self.db)
            .await?;
        Ok(workspace)
    }

    /// Find a workspace owned by the user with the given title
    pub async fn find_workspace_by_title(
        &self,
        owner_id: Uuid,
        title: &str,
    ) -> Result<Option<workspace::Model>> {
        let workspace = entities::Workspace::find()
            .filter(workspace::Column::OwnerId.eq(owner_id))
            .filter(workspace::Column::Title.eq(title))
            .one(&self.db)
            .await?;
        Ok(workspace)
    }

    /// Create a workspace with the owner as its first ADMIN member
    pub async fn create_workspace(&self, title: &str, owner_id: Uuid) -> Result<workspace::Model> {
        debug!("Creating workspace: {}", title);

        let now = chrono::Utc::now();
        let txn = self.db.begin().await?;

        let workspace = workspace::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(title.to_string()),
            owner_id: Set(owner_id),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&txn)
        .await?;

        workspace_member::ActiveModel {
            workspace_id: Set(workspace.id),
            user_id: Set(owner_id),
            member_role: Set(MemberRole::Admin.as_str().to_string()),
            created_at: Set(now.into()),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(workspace)
    }

    /// Rename a workspace
    pub async fn update_workspace_title(
        &self,
        workspace_id: Uuid,
        title: &str,
    ) -> Result<workspace::Model> {
        debug!("Renaming workspace: {}", workspace_id);

        let mut workspace: workspace::ActiveModel = entities::Workspace::find_by_id(workspace_id)
            .one(&self.db)
            .await?
            .ok_or(ApiError::WorkspaceNotFound)?
            .into();

        workspace.title = Set(title.to_string());
        workspace.updated_at = Set(chrono::Utc::now().into());

        let workspace = workspace.update(&self.db).await?;
        Ok(workspace)
    }

    /// Delete a workspace (cascades to members, projects, tasks)
    pub async fn delete_workspace(&self, workspace_id: Uuid) -> Result<()> {
        debug!("Deleting workspace: {}", workspace_id);

        let result = entities::Workspace::delete_by_id(workspace_id)
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(ApiError::WorkspaceNotFound);
        }
        Ok(())
    }
}
