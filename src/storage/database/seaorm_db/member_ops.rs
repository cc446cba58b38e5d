use crate::auth::roles::MemberRole;
use crate::utils::error::{ApiError, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use super::super::entities::{self, workspace_member};
use super::types::Database;

/// A workspace member joined with their user profile
#[derive(Debug, Clone, Serialize)]
pub struct WorkspaceMemberInfo {
    pub user_id: Uuid,
    pub username: String,
    pub full_name: Option<String>,
    pub avatar: Option<String>,
    pub member_role: String,
    pub joined_at: chrono::DateTime<chrono::FixedOffset>,
}

impl Database {
    /// List members of a workspace with their profiles
    pub async fn list_workspace_members(
        &self,
        workspace_id: Uuid,
    ) -> Result<Vec<WorkspaceMemberInfo>> {
        debug!("Listing members of workspace: {}", workspace_id);

        let rows = entities::WorkspaceMember::find()
            .filter(workspace_member::Column::WorkspaceId.eq(workspace_id))
            .find_also_related(entities::User)
            .order_by_asc(workspace_member::Column::CreatedAt)
            .all(&self.db)
            .await?;

        let members = rows
            .into_iter()
            .filter_map(|(member, user)| {
                user.map(|user| WorkspaceMemberInfo {
                    user_id: member.user_id,
                    username: user.username,
                    full_name: user.full_name,
                    avatar: user.avatar,
                    member_role: member.member_role,
                    joined_at: member.created_at,
                })
            })
            .collect();

        Ok(members)
    }

    /// Find a single membership row
    pub async fn find_member(
        &self,
        workspace_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<workspace_member::Model>> {
        let member = entities::WorkspaceMember::find_by_id((workspace_id, user_id))
            .one(&self.db)
            .await?;
        Ok(member)
    }

    /// Add a member to a workspace
    pub async fn insert_member(
        &self,
        workspace_id: Uuid,
        user_id: Uuid,
        role: MemberRole,
    ) -> Result<workspace_member::Model> {
        debug!("Adding member {} to workspace {}", user_id, workspace_id);

        let member = workspace_member::ActiveModel {
            workspace_id: Set(workspace_id),
            user_id: Set(user_id),
            member_role: Set(role.as_str().to_string()),
            created_at: Set(chrono::Utc::now().into()),
        }
        .insert(&self.db)
        .await?;

        Ok(member)
    }

    /// Change a member's role
    pub async fn update_member_role(
        &self,
        workspace_id: Uuid,
        user_id: Uuid,
        role: MemberRole,
    ) -> Result<workspace_member::Model> {
        debug!(
            "Updating role of member {} in workspace {}",
            user_id, workspace_id
        );

        let mut member: workspace_member::ActiveModel =
            entities::WorkspaceMember::find_by_id((workspace_id, user_id))
                .one(&self.db)
                .await?
                .ok_or(ApiError::MemberNotFound)?
                .into();

        member.member_role = Set(role.as_str().to_string());

        let member = member.update(&self.db).await?;
        Ok(member)
    }

    /// Remove a member from a workspace
    pub async fn remove_member(&self, workspace_id: Uuid, user_id: Uuid) -> Result<()> {
        debug!(
            "Removing member {} from workspace {}",
            user_id, workspace_id
        );

        let result = entities::WorkspaceMember::delete_by_id((workspace_id, user_id))
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(ApiError::MemberNotFound);
        }
        Ok(())
    }
}
