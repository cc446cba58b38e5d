use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Tag-to-task assignment row
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "task_tags")]
pub struct Model {
    /// Task the tag is assigned to
    #[sea_orm(primary_key, auto_increment = false)]
    pub task_id: Uuid,

    /// Assigned tag
    #[sea_orm(primary_key, auto_increment = false)]
    pub tag_id: Uuid,
}

/// Task tag entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Task relation
    #[sea_orm(
        belongs_to = "super::task::Entity",
        from = "Column::TaskId",
        to = "super::task::Column::Id"
    )]
    Task,

    /// Tag relation
    #[sea_orm(
        belongs_to = "super::tag::Entity",
        from = "Column::TagId",
        to = "super::tag::Column::Id"
    )]
    Tag,
}

impl Related<super::task::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Task.def()
    }
}

impl Related<super::tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tag.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
