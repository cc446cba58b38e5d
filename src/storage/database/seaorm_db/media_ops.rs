use crate::utils::error::{ApiError, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::debug;
use uuid::Uuid;

use super::super::entities::{self, media};
use super::types::Database;

impl Database {
    /// Record an uploaded file
    pub async fn create_media(
        &self,
        file_name: &str,
        stored_path: &str,
        content_type: &str,
        size: i64,
        task_id: Option<Uuid>,
        uploaded_by: Uuid,
    ) -> Result<media::Model> {
        debug!("Recording media upload: {}", file_name);

        let media = media::ActiveModel {
            id: Set(Uuid::new_v4()),
            file_name: Set(file_name.to_string()),
            stored_path: Set(stored_path.to_string()),
            content_type: Set(content_type.to_string()),
            size: Set(size),
            task_id: Set(task_id),
            uploaded_by: Set(uploaded_by),
            created_at: Set(chrono::Utc::now().into()),
        }
        .insert(&self.db)
        .await?;

        Ok(media)
    }

    /// Find media by ID
    pub async fn find_media_by_id(&self, media_id: Uuid) -> Result<Option<media::Model>> {
        let media = entities::Media::find_by_id(media_id).one(&self.db).await?;
        Ok(media)
    }

    /// List media attached to a task
    pub async fn list_media_for_task(&self, task_id: Uuid) -> Result<Vec<media::Model>> {
        debug!("Listing media on task: {}", task_id);

        let media = entities::Media::find()
            .filter(media::Column::TaskId.eq(task_id))
            .order_by_asc(media::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(media)
    }

    /// Delete a media record
    pub async fn delete_media(&self, media_id: Uuid) -> Result<()> {
        debug!("Deleting media: {}", media_id);

        let result = entities::Media::delete_by_id(media_id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(ApiError::MediaNotFound);
        }
        Ok(())
    }
}
