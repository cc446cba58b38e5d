use crate::utils::error::Result;
use sea_orm::{
    ColumnTrait, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use super::super::entities::{
    self, project, task, user, workspace, workspace_member,
};
use super::types::Database;

/// Substring search results across the aggregates visible to a user
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub workspaces: Vec<workspace::Model>,
    pub projects: Vec<project::Model>,
    pub tasks: Vec<task::Model>,
    pub users: Vec<user::Model>,
}

impl Database {
    /// Search titles and usernames for a substring
    ///
    /// Workspace, project, and task hits are restricted to workspaces the
    /// user is a member of unless `unrestricted` is set.
    pub async fn search(
        &self,
        user_id: Uuid,
        query: &str,
        unrestricted: bool,
    ) -> Result<SearchResults> {
        debug!("Searching for '{}' as user {}", query, user_id);

        let mut workspaces = entities::Workspace::find()
            .filter(workspace::Column::Title.contains(query));
        if !unrestricted {
            workspaces = workspaces
                .join(
                    JoinType::InnerJoin,
                    workspace_member::Relation::Workspace.def().rev(),
                )
                .filter(workspace_member::Column::UserId.eq(user_id));
        }
        let workspaces = workspaces
            .order_by_asc(workspace::Column::Title)
            .all(&self.db)
            .await?;

        let mut projects = entities::Project::find()
            .filter(project::Column::Title.contains(query));
        if !unrestricted {
            projects = projects
                .join(JoinType::InnerJoin, project::Relation::Workspace.def())
                .join(
                    JoinType::InnerJoin,
                    workspace_member::Relation::Workspace.def().rev(),
                )
                .filter(workspace_member::Column::UserId.eq(user_id));
        }
        let projects = projects
            .order_by_asc(project::Column::Title)
            .all(&self.db)
            .await?;

        let mut tasks = entities::Task::find().filter(task::Column::Title.contains(query));
        if !unrestricted {
            tasks = tasks
                .join(JoinType::InnerJoin, task::Relation::Project.def())
                .join(JoinType::InnerJoin, project::Relation::Workspace.def())
                .join(
                    JoinType::InnerJoin,
                    workspace_member::Relation::Workspace.def().rev(),
                )
                .filter(workspace_member::Column::UserId.eq(user_id));
        }
        let tasks = tasks.order_by_asc(task::Column::Title).all(&self.db).await?;

        let users = entities::User::find()
            .filter(user::Column::Username.contains(query))
            .order_by_asc(user::Column::Username)
            .all(&self.db)
            .await?;

        Ok(SearchResults {
            workspaces,
            projects,
            tasks,
            users,
        })
    }
}
