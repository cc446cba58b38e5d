//! Media service
//!
//! Uploads go to the file store under generated names; each upload gets a
//! media row, optionally attached to a task.

use crate::storage::database::Database;
use crate::storage::database::entities::media;
use crate::storage::files::FileStorage;
use crate::utils::error::{ApiError, Result};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Media service
#[derive(Clone)]
pub struct MediaService {
    db: Arc<Database>,
    files: Arc<FileStorage>,
}

impl MediaService {
    pub fn new(db: Arc<Database>, files: Arc<FileStorage>) -> Self {
        Self { db, files }
    }

    /// Store an upload and record it
    pub async fn upload(
        &self,
        uploaded_by: Uuid,
        file_name: &str,
        content: &[u8],
        task_id: Option<Uuid>,
    ) -> Result<media::Model> {
        if let Some(task_id) = task_id {
            if self.db.find_task_by_id(task_id).await?.is_none() {
                return Err(ApiError::TaskNotFound);
            }
        }

        let stored = self.files.store(file_name, content).await?;
        let media = self
            .db
            .create_media(
                file_name,
                &stored.stored_path,
                &stored.content_type,
                stored.size as i64,
                task_id,
                uploaded_by,
            )
            .await?;

        info!("Media uploaded: {} ({})", media.file_name, media.id);
        Ok(media)
    }

    /// Fetch one media record
    pub async fn get(&self, media_id: Uuid) -> Result<media::Model> {
        self.db
            .find_media_by_id(media_id)
            .await?
            .ok_or(ApiError::MediaNotFound)
    }

    /// Read a stored file's content
    pub async fn content(&self, media_id: Uuid) -> Result<(media::Model, Vec<u8>)> {
        let media = self.get(media_id).await?;
        let content = self.files.get(&media.stored_path).await?;
        Ok((media, content))
    }

    /// List media attached to a task
    pub async fn list_by_task(&self, task_id: Uuid) -> Result<Vec<media::Model>> {
        if self.db.find_task_by_id(task_id).await?.is_none() {
            return Err(ApiError::TaskNotFound);
        }
        self.db.list_media_for_task(task_id).await
    }

    /// Delete a media record and its file
    pub async fn delete(&self, media_id: Uuid) -> Result<()> {
        let media = self.get(media_id).await?;
        self.files.delete(&media.stored_path).await?;
        self.db.delete_media(media_id).await?;
        info!("Media deleted: {}", media_id);
        Ok(())
    }
}
