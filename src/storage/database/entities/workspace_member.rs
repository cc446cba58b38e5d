use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Workspace membership row
///
/// The composite primary key enforces at most one role per
/// (workspace, user) pair.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "workspace_members")]
pub struct Model {
    /// Workspace the membership belongs to
    #[sea_orm(primary_key, auto_increment = false)]
    pub workspace_id: Uuid,

    /// Member user
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: Uuid,

    /// Membership role (READER, COLLABORATOR, or ADMIN)
    pub member_role: String,

    /// Creation timestamp
    pub created_at: DateTimeWithTimeZone,
}

/// Workspace member entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Workspace relation
    #[sea_orm(
        belongs_to = "super::workspace::Entity",
        from = "Column::WorkspaceId",
        to = "super::workspace::Column::Id"
    )]
    Workspace,

    /// User relation
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::workspace::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Workspace.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
