use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Uploaded media database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "media")]
pub struct Model {
    /// Media ID (UUID)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Original file name as uploaded
    pub file_name: String,

    /// Path relative to the upload directory
    pub stored_path: String,

    /// MIME type
    pub content_type: String,

    /// File size in bytes
    pub size: i64,

    /// Task the media is attached to (optional)
    pub task_id: Option<Uuid>,

    /// Uploading user
    pub uploaded_by: Uuid,

    /// Creation timestamp
    pub created_at: DateTimeWithTimeZone,
}

/// Media entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Task relation
    #[sea_orm(
        belongs_to = "super::task::Entity",
        from = "Column::TaskId",
        to = "super::task::Column::Id"
    )]
    Task,

    /// Uploader relation
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UploadedBy",
        to = "super::user::Column::Id"
    )]
    Uploader,
}

impl ActiveModelBehavior for ActiveModel {}
