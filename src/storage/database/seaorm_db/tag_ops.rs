use crate::utils::error::{ApiError, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, Set,
};
use tracing::debug;
use uuid::Uuid;

use super::super::entities::{self, tag, task_tag};
use super::types::Database;

impl Database {
    /// List all tags
    pub async fn list_tags(&self) -> Result<Vec<tag::Model>> {
        let tags = entities::Tag::find()
            .order_by_asc(tag::Column::Title)
            .all(&self.db)
            .await?;
        Ok(tags)
    }

    /// List tags in a project
    pub async fn list_tags_by_project(&self, project_id: Uuid) -> Result<Vec<tag::Model>> {
        debug!("Listing tags in project: {}", project_id);

        let tags = entities::Tag::find()
            .filter(tag::Column::ProjectId.eq(project_id))
            .order_by_asc(tag::Column::Title)
            .all(&self.db)
            .await?;
        Ok(tags)
    }

    /// List tags assigned to a task
    pub async fn list_tags_for_task(&self, task_id: Uuid) -> Result<Vec<tag::Model>> {
        debug!("Listing tags on task: {}", task_id);

        let tags = entities::Tag::find()
            .join(JoinType::InnerJoin, task_tag::Relation::Tag.def().rev())
            .filter(task_tag::Column::TaskId.eq(task_id))
            .order_by_asc(tag::Column::Title)
            .all(&self.db)
            .await?;
        Ok(tags)
    }

    /// Find tag by ID
    pub async fn find_tag_by_id(&self, tag_id: Uuid) -> Result<Option<tag::Model>> {
        let tag = entities::Tag::find_by_id(tag_id).one(&self.db).await?;
        Ok(tag)
    }

    /// Create a tag in a project
    pub async fn create_tag(
        &self,
        project_id: Uuid,
        title: &str,
        color: &str,
    ) -> Result<tag::Model> {
        debug!("Creating tag '{}' in project {}", title, project_id);

        let now = chrono::Utc::now();
        let tag = tag::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(title.to_string()),
            color: Set(color.to_string()),
            project_id: Set(project_id),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&self.db)
        .await?;

        Ok(tag)
    }

    /// Update tag fields
    pub async fn update_tag(
        &self,
        tag_id: Uuid,
        title: Option<&str>,
        color: Option<&str>,
    ) -> Result<tag::Model> {
        debug!("Updating tag: {}", tag_id);

        let mut tag: tag::ActiveModel = entities::Tag::find_by_id(tag_id)
            .one(&self.db)
            .await?
            .ok_or(ApiError::TagNotFound)?
            .into();

        if let Some(title) = title {
            tag.title = Set(title.to_string());
        }
        if let Some(color) = color {
            tag.color = Set(color.to_string());
        }
        tag.updated_at = Set(chrono::Utc::now().into());

        let tag = tag.update(&self.db).await?;
        Ok(tag)
    }

    /// Delete a tag (cascades to its task links)
    pub async fn delete_tag(&self, tag_id: Uuid) -> Result<()> {
        debug!("Deleting tag: {}", tag_id);

        let result = entities::Tag::delete_by_id(tag_id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(ApiError::TagNotFound);
        }
        Ok(())
    }

    /// Whether a tag is assigned to a task
    pub async fn is_tag_assigned(&self, tag_id: Uuid, task_id: Uuid) -> Result<bool> {
        let link = entities::TaskTag::find_by_id((task_id, tag_id))
            .one(&self.db)
            .await?;
        Ok(link.is_some())
    }

    /// Assign a tag to a task
    pub async fn assign_tag_to_task(&self, tag_id: Uuid, task_id: Uuid) -> Result<()> {
        debug!("Assigning tag {} to task {}", tag_id, task_id);

        task_tag::ActiveModel {
            task_id: Set(task_id),
            tag_id: Set(tag_id),
        }
        .insert(&self.db)
        .await?;

        Ok(())
    }

    /// Remove a tag assignment from a task
    pub async fn unassign_tag_from_task(&self, tag_id: Uuid, task_id: Uuid) -> Result<()> {
        debug!("Unassigning tag {} from task {}", tag_id, task_id);

        let result = entities::TaskTag::delete_by_id((task_id, tag_id))
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(ApiError::TagNotFound);
        }
        Ok(())
    }
}
