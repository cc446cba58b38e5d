use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// User ID (UUID)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Username (unique)
    #[sea_orm(unique)]
    pub username: String,

    /// Email address (unique)
    #[sea_orm(unique)]
    pub email: String,

    /// Password hash
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Full name (optional)
    pub full_name: Option<String>,

    /// Avatar URL (optional)
    pub avatar: Option<String>,

    /// System role (USER or SYSADMIN)
    pub role: String,

    /// Creation timestamp
    pub created_at: DateTimeWithTimeZone,

    /// Last update timestamp
    pub updated_at: DateTimeWithTimeZone,
}

/// User entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Workspace memberships relation
    #[sea_orm(has_many = "super::workspace_member::Entity")]
    Memberships,

    /// Owned workspaces relation
    #[sea_orm(has_many = "super::workspace::Entity")]
    Workspaces,

    /// Authored comments relation
    #[sea_orm(has_many = "super::comment::Entity")]
    Comments,

    /// Bookmarks relation
    #[sea_orm(has_many = "super::bookmark::Entity")]
    Bookmarks,

    /// Password reset tokens relation
    #[sea_orm(has_many = "super::password_reset_token::Entity")]
    PasswordResetTokens,
}

impl Related<super::workspace_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Memberships.def()
    }
}

impl Related<super::bookmark::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bookmarks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
