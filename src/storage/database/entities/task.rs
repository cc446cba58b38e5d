use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Task database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    /// Task ID (UUID)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Task title
    pub title: String,

    /// Task description (optional)
    pub description: Option<String>,

    /// Status column the task sits in
    pub status: String,

    /// Due date (optional)
    pub due_date: Option<DateTimeWithTimeZone>,

    /// Accumulated timer in seconds
    pub timer: i64,

    /// Assigned member user ids, stored as a JSON array
    pub assignees: Json,

    /// Owning project
    pub project_id: Uuid,

    /// Creation timestamp
    pub created_at: DateTimeWithTimeZone,

    /// Last update timestamp
    pub updated_at: DateTimeWithTimeZone,
}

/// Task entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Project relation
    #[sea_orm(
        belongs_to = "super::project::Entity",
        from = "Column::ProjectId",
        to = "super::project::Column::Id"
    )]
    Project,

    /// Comments relation
    #[sea_orm(has_many = "super::comment::Entity")]
    Comments,

    /// Tag assignments relation
    #[sea_orm(has_many = "super::task_tag::Entity")]
    TaskTags,

    /// Bookmarks relation
    #[sea_orm(has_many = "super::bookmark::Entity")]
    Bookmarks,
}

impl Related<super::project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl Related<super::task_tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TaskTags.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
