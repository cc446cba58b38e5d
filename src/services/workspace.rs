//! Workspace service
//!
//! Workspace CRUD and member management. Member mutations reject
//! self-modification; invites go by username and refuse duplicates.

use crate::auth::roles::MemberRole;
use crate::storage::database::entities::{workspace, workspace_member};
use crate::storage::database::{Database, WorkspaceMemberInfo};
use crate::utils::error::{ApiError, Result};
use crate::utils::validation::DataValidator;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Workspace service
#[derive(Clone)]
pub struct WorkspaceService {
    db: Arc<Database>,
}

impl WorkspaceService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// List workspaces visible to the user
    pub async fn list(&self, user_id: Uuid, unrestricted: bool) -> Result<Vec<workspace::Model>> {
        if unrestricted {
            self.db.list_workspaces().await
        } else {
            self.db.find_workspaces_by_member(user_id).await
        }
    }

    /// Whether the user can still create a workspace with this title
    pub async fn is_title_available(&self, owner_id: Uuid, title: &str) -> Result<bool> {
        DataValidator::validate_title(title)?;
        let existing = self.db.find_workspace_by_title(owner_id, title).await?;
        Ok(existing.is_none())
    }

    /// Fetch one workspace
    pub async fn get(&self, workspace_id: Uuid) -> Result<workspace::Model> {
        self.db
            .find_workspace_by_id(workspace_id)
            .await?
            .ok_or(ApiError::WorkspaceNotFound)
    }

    /// Create a workspace owned by the user
    pub async fn create(&self, owner_id: Uuid, title: &str) -> Result<workspace::Model> {
        DataValidator::validate_title(title)?;

        if self
            .db
            .find_workspace_by_title(owner_id, title)
            .await?
            .is_some()
        {
            return Err(ApiError::WorkspaceAlreadyExists);
        }

        let workspace = self.db.create_workspace(title, owner_id).await?;
        info!("Workspace created: {} ({})", workspace.title, workspace.id);
        Ok(workspace)
    }

    /// Rename a workspace
    pub async fn rename(&self, workspace_id: Uuid, title: &str) -> Result<workspace::Model> {
        DataValidator::validate_title(title)?;
        self.db.update_workspace_title(workspace_id, title).await
    }

    /// Delete a workspace
    pub async fn delete(&self, workspace_id: Uuid) -> Result<()> {
        self.db.delete_workspace(workspace_id).await?;
        info!("Workspace deleted: {}", workspace_id);
        Ok(())
    }

    /// List the members of a workspace
    pub async fn members(&self, workspace_id: Uuid) -> Result<Vec<WorkspaceMemberInfo>> {
        self.get(workspace_id).await?;
        self.db.list_workspace_members(workspace_id).await
    }

    /// Fetch a single membership
    pub async fn member(
        &self,
        workspace_id: Uuid,
        member_id: Uuid,
    ) -> Result<workspace_member::Model> {
        self.get(workspace_id).await?;
        self.db
            .find_member(workspace_id, member_id)
            .await?
            .ok_or(ApiError::MemberNotFound)
    }

    /// Invite a user into a workspace by username
    pub async fn invite(
        &self,
        workspace_id: Uuid,
        username: &str,
        role: &str,
    ) -> Result<workspace_member::Model> {
        let role = MemberRole::from_str(role)?;
        self.get(workspace_id).await?;

        let user = self
            .db
            .find_user_by_username(username)
            .await?
            .ok_or(ApiError::UserNotFound)?;

        if self.db.find_member(workspace_id, user.id).await?.is_some() {
            return Err(ApiError::UserAlreadyInvited);
        }

        let member = self.db.insert_member(workspace_id, user.id, role).await?;
        info!(
            "User {} invited to workspace {} as {}",
            user.username, workspace_id, role
        );
        Ok(member)
    }

    /// Change a member's role
    ///
    /// A member cannot change their own role.
    pub async fn update_member_role(
        &self,
        workspace_id: Uuid,
        actor_id: Uuid,
        member_id: Uuid,
        role: &str,
    ) -> Result<workspace_member::Model> {
        let role = MemberRole::from_str(role)?;

        if actor_id == member_id {
            return Err(ApiError::MemberSelfModified);
        }

        self.get(workspace_id).await?;
        self.db.update_member_role(workspace_id, member_id, role).await
    }

    /// Remove a member from a workspace
    ///
    /// A member cannot remove themselves.
    pub async fn remove_member(
        &self,
        workspace_id: Uuid,
        actor_id: Uuid,
        member_id: Uuid,
    ) -> Result<()> {
        if actor_id == member_id {
            return Err(ApiError::MemberSelfRemoved);
        }

        self.get(workspace_id).await?;
        self.db.remove_member(workspace_id, member_id).await?;
        info!("Member {} removed from workspace {}", member_id, workspace_id);
        Ok(())
    }
}
