//! Resolver-facing lookups
//!
//! `Database` is the production implementation of the resolver's two
//! collaborator traits. Each method is a single-row primary-key read.

use crate::auth::membership::{MembershipStore, ResourceGraph};
use crate::utils::error::Result;
use async_trait::async_trait;
use sea_orm::EntityTrait;
use uuid::Uuid;

use super::super::entities;
use super::types::Database;

#[async_trait]
impl ResourceGraph for Database {
    async fn workspace_exists(&self, workspace_id: Uuid) -> Result<bool> {
        let workspace = entities::Workspace::find_by_id(workspace_id)
            .one(&self.db)
            .await?;
        Ok(workspace.is_some())
    }

    async fn project_workspace(&self, project_id: Uuid) -> Result<Option<Uuid>> {
        let project = entities::Project::find_by_id(project_id)
            .one(&self.db)
            .await?;
        Ok(project.map(|p| p.workspace_id))
    }

    async fn task_project(&self, task_id: Uuid) -> Result<Option<Uuid>> {
        let task = entities::Task::find_by_id(task_id).one(&self.db).await?;
        Ok(task.map(|t| t.project_id))
    }

    async fn tag_project(&self, tag_id: Uuid) -> Result<Option<Uuid>> {
        let tag = entities::Tag::find_by_id(tag_id).one(&self.db).await?;
        Ok(tag.map(|t| t.project_id))
    }

    async fn comment_task(&self, comment_id: Uuid) -> Result<Option<Uuid>> {
        let comment = entities::Comment::find_by_id(comment_id)
            .one(&self.db)
            .await?;
        Ok(comment.map(|c| c.task_id))
    }
}

#[async_trait]
impl MembershipStore for Database {
    async fn role_of(&self, workspace_id: Uuid, user_id: Uuid) -> Result<Option<String>> {
        let member = entities::WorkspaceMember::find_by_id((workspace_id, user_id))
            .one(&self.db)
            .await?;
        Ok(member.map(|m| m.member_role))
    }
}
